/// Case Clicker game state definitions.
use std::fmt;
use std::str::FromStr;

/// An inclusive integer reward interval. Invariant: `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardRange {
    pub min: u64,
    pub max: u64,
}

/// Error for a reward range string that is not `"min-max"` with `min <= max`.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseRangeError;

impl fmt::Display for ParseRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid reward range (expected \"min-max\")")
    }
}

impl RewardRange {
    pub fn new(min: u64, max: u64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Number of distinct outcomes in the interval.
    pub fn span(&self) -> u64 {
        self.max - self.min + 1
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FromStr for RewardRange {
    type Err = ParseRangeError;

    /// Parses the `"15-25"` syntax the case catalog is written in.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s.split_once('-').ok_or(ParseRangeError)?;
        let min: u64 = lo.trim().parse().map_err(|_| ParseRangeError)?;
        let max: u64 = hi.trim().parse().map_err(|_| ParseRangeError)?;
        if min > max {
            return Err(ParseRangeError);
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for RewardRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Kinds of purchasable cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseKind {
    Wooden,
    Silver,
    Golden,
}

impl CaseKind {
    /// All case kinds in display order.
    pub fn all() -> &'static [CaseKind] {
        &[CaseKind::Wooden, CaseKind::Silver, CaseKind::Golden]
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            CaseKind::Wooden => "Wooden Case",
            CaseKind::Silver => "Silver Case",
            CaseKind::Golden => "Golden Case",
        }
    }

    /// Coins deducted when the case is opened.
    pub fn cost(&self) -> u64 {
        match self {
            CaseKind::Wooden => 30,
            CaseKind::Silver => 100,
            CaseKind::Golden => 250,
        }
    }

    /// Inclusive reward interval the case draws from.
    pub fn reward_range(&self) -> RewardRange {
        match self {
            CaseKind::Wooden => RewardRange::new(15, 25),
            CaseKind::Silver => RewardRange::new(60, 150),
            CaseKind::Golden => RewardRange::new(150, 400),
        }
    }

    /// Key to open (1-3 mapped to case index).
    pub fn key(&self) -> char {
        match self {
            CaseKind::Wooden => '1',
            CaseKind::Silver => '2',
            CaseKind::Golden => '3',
        }
    }
}

/// What a one-shot upgrade slot grants when purchased.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeEffect {
    /// +1 coin per manual click.
    ClickPower,
    /// Enable the recurring automatic collection.
    AutoCollect,
}

/// A one-shot purchasable upgrade slot.
#[derive(Clone, Debug)]
pub struct Upgrade {
    pub name: &'static str,
    pub cost: u64,
    pub effect: UpgradeEffect,
    pub purchased: bool,
}

/// A case that has been paid for but whose reward has not been revealed yet.
#[derive(Clone, Debug)]
pub struct PendingReveal {
    pub kind: CaseKind,
    /// Reward drawn at spend time, credited when `ticks_left` reaches zero.
    pub reward: u64,
    pub ticks_left: u32,
}

/// Log entry shown in the history panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a Case Clicker session.
pub struct GameState {
    /// Current coin balance.
    pub balance: u64,
    /// Derived display level, `balance / 100 + 1`. Never recomputed downward.
    pub level: u32,
    /// Coins credited per manual click.
    pub click_power: u64,
    /// Whether the recurring auto-collection has been purchased.
    pub auto_collect: bool,
    /// Ticks until the next automatic `credit(click_power)`.
    pub auto_timer: u32,
    /// Cases paid for but not yet revealed.
    pub pending_reveals: Vec<PendingReveal>,
    /// Upgrade slots in display order.
    pub upgrades: Vec<Upgrade>,
    /// Queued notification messages; the front one is displayed.
    pub notices: Vec<String>,
    /// Message history.
    pub log: Vec<LogEntry>,
    /// Manual clicks count.
    pub total_clicks: u64,
    /// Recent click flash timer (ticks remaining for visual feedback).
    pub click_flash: u32,
    /// xorshift32 state for reward draws.
    pub rng_state: u32,
}

/// Ticks between automatic collections (3 seconds at 10 ticks/sec).
pub const AUTO_COLLECT_INTERVAL: u32 = 30;

/// Delay between paying for a case and revealing its reward (0.5 seconds).
pub const REVEAL_DELAY_TICKS: u32 = 5;

impl GameState {
    pub fn new() -> Self {
        Self {
            balance: 100,
            level: 1,
            click_power: 1,
            auto_collect: false,
            auto_timer: AUTO_COLLECT_INTERVAL,
            pending_reveals: Vec::new(),
            upgrades: vec![
                Upgrade {
                    name: "Stronger Click",
                    cost: 50,
                    effect: UpgradeEffect::ClickPower,
                    purchased: false,
                },
                Upgrade {
                    name: "Auto Collector",
                    cost: 100,
                    effect: UpgradeEffect::AutoCollect,
                    purchased: false,
                },
                Upgrade {
                    name: "Iron Grip",
                    cost: 250,
                    effect: UpgradeEffect::ClickPower,
                    purchased: false,
                },
            ],
            notices: Vec::new(),
            log: vec![LogEntry {
                text: "Welcome to Case Clicker!".into(),
                is_important: true,
            }],
            total_clicks: 0,
            click_flash: 0,
            rng_state: 42,
        }
    }

    /// Level derived from the current balance.
    pub fn derived_level(&self) -> u32 {
        (self.balance / 100) as u32 + 1
    }

    pub fn can_afford(&self, cost: u64) -> bool {
        self.balance >= cost
    }

    /// xorshift32 step. A zero state would be a fixed point, so it is reseeded.
    pub fn next_random(&mut self) -> u32 {
        if self.rng_state == 0 {
            self.rng_state = 0x9E37_79B9;
        }
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Queue a notification message for the presentation layer to drain.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.notices.push(text.into());
    }

    /// The notification currently on display, if any.
    pub fn current_notice(&self) -> Option<&str> {
        self.notices.first().map(String::as_str)
    }

    /// Dismiss the displayed notification; the next queued one takes its place.
    pub fn close_notice(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}

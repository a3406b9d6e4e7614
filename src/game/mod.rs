/// Case Clicker — coins, cases, and upgrades.
pub mod actions;
pub mod logic;
pub mod save;
pub mod state;

use crate::input::InputEvent;

use state::{CaseKind, GameState};

/// The game engine: owns the state and dispatches normalized input to the
/// logic functions. Constructed explicitly and handed to whoever embeds it;
/// there is no ambient global.
pub struct CaseClicker {
    pub state: GameState,
}

impl CaseClicker {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Handle an input event. Returns true if it mutated the game, which is
    /// the caller's cue to persist.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key(' ') | InputEvent::Click(actions::CLICK_COIN) => {
                logic::click(&mut self.state);
                true
            }
            InputEvent::Key(c) if c.is_ascii_digit() => {
                match CaseKind::all().iter().find(|k| k.key() == c) {
                    Some(&kind) => {
                        logic::open_case(&mut self.state, kind);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Key(c @ 'a'..='f') => {
                // Letters map to the unpurchased slots in display order.
                let display_idx = (c as u8 - b'a') as usize;
                let offered: Vec<usize> = self
                    .state
                    .upgrades
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| !u.purchased)
                    .map(|(i, _)| i)
                    .collect();
                match offered.get(display_idx) {
                    Some(&slot) => {
                        logic::buy_upgrade(&mut self.state, slot);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Click(actions::CLOSE_NOTICE) => {
                self.state.close_notice();
                true
            }
            InputEvent::Click(id)
                if (actions::OPEN_CASE_BASE..actions::BUY_UPGRADE_BASE).contains(&id) =>
            {
                let idx = (id - actions::OPEN_CASE_BASE) as usize;
                match CaseKind::all().get(idx) {
                    Some(&kind) => {
                        logic::open_case(&mut self.state, kind);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::Click(id) if id >= actions::BUY_UPGRADE_BASE => {
                let slot = (id - actions::BUY_UPGRADE_BASE) as usize;
                if slot < self.state.upgrades.len() {
                    logic::buy_upgrade(&mut self.state, slot);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Advance game time. Returns true when persistent state changed.
    pub fn tick(&mut self, delta_ticks: u32) -> bool {
        logic::tick(&mut self.state, delta_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::state::REVEAL_DELAY_TICKS;

    #[test]
    fn space_collects_coins() {
        let mut game = CaseClicker::new();
        assert!(game.handle_input(&InputEvent::Key(' ')));
        assert_eq!(game.state.balance, 101);
    }

    #[test]
    fn click_action_collects_coins() {
        let mut game = CaseClicker::new();
        assert!(game.handle_input(&InputEvent::Click(actions::CLICK_COIN)));
        assert_eq!(game.state.balance, 101);
    }

    #[test]
    fn digit_key_opens_matching_case() {
        let mut game = CaseClicker::new();
        assert!(game.handle_input(&InputEvent::Key('1')));
        assert_eq!(game.state.balance, 100 - CaseKind::Wooden.cost());
        assert_eq!(game.state.pending_reveals.len(), 1);
    }

    #[test]
    fn unmapped_digit_is_ignored() {
        let mut game = CaseClicker::new();
        assert!(!game.handle_input(&InputEvent::Key('9')));
        assert_eq!(game.state.balance, 100);
    }

    #[test]
    fn case_click_action_maps_by_index() {
        let mut game = CaseClicker::new();
        game.state.balance = 500;
        assert!(game.handle_input(&InputEvent::Click(actions::OPEN_CASE_BASE + 1)));
        assert_eq!(game.state.balance, 500 - CaseKind::Silver.cost());
    }

    #[test]
    fn out_of_range_case_click_is_ignored() {
        let mut game = CaseClicker::new();
        assert!(!game.handle_input(&InputEvent::Click(actions::OPEN_CASE_BASE + 50)));
        assert_eq!(game.state.balance, 100);
    }

    #[test]
    fn letter_keys_target_unpurchased_slots() {
        let mut game = CaseClicker::new();
        game.state.balance = 500;
        game.state.upgrades[0].purchased = true;
        // 'a' now refers to slot 1 (Auto Collector).
        assert!(game.handle_input(&InputEvent::Key('a')));
        assert!(game.state.auto_collect);
    }

    #[test]
    fn upgrade_click_action_buys_slot() {
        let mut game = CaseClicker::new();
        assert!(game.handle_input(&InputEvent::Click(actions::BUY_UPGRADE_BASE)));
        assert_eq!(game.state.click_power, 2);
    }

    #[test]
    fn close_notice_pops_queue() {
        let mut game = CaseClicker::new();
        game.state.push_notice("hello");
        assert!(game.handle_input(&InputEvent::Click(actions::CLOSE_NOTICE)));
        assert_eq!(game.state.current_notice(), None);
    }

    #[test]
    fn tick_reports_persistent_changes_only() {
        let mut game = CaseClicker::new();
        assert!(!game.tick(100)); // nothing pending, auto off

        game.handle_input(&InputEvent::Key('1'));
        assert!(game.tick(REVEAL_DELAY_TICKS)); // reveal credited
    }
}

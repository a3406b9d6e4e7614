//! Fixed-timestep clock for the render loop.
//!
//! `draw_web()` fires at roughly 60fps with a variable delta. The clock
//! accumulates wall-clock milliseconds and emits whole 10 Hz ticks, so all
//! game timing (auto-collection cadence, case reveal delay) is expressed in
//! deterministic tick counts.

/// Game tick rate. All engine intervals are defined against this.
pub const TICKS_PER_SEC: u32 = 10;

pub struct TickClock {
    /// Milliseconds per emitted tick.
    ms_per_tick: f64,
    /// Milliseconds accumulated but not yet consumed as ticks.
    carry: f64,
    /// Wall-clock time of the previous update, None before the first frame.
    last_now: Option<f64>,
    /// Total ticks emitted since creation.
    pub total_ticks: u64,
}

impl TickClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            carry: 0.0,
            last_now: None,
            total_ticks: 0,
        }
    }

    /// Feed the current wall-clock time in milliseconds and get back how
    /// many whole ticks elapsed. Deltas are clamped to 500ms so a
    /// backgrounded tab does not replay a huge burst on return.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_now {
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_now = Some(now_ms);

        self.carry += delta;
        let ticks = (self.carry / self.ms_per_tick) as u32;
        self.carry -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

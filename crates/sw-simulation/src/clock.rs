/// Default simulation rate: one tick per rendered frame at 60 fps.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// Monotonic tick counter for a fixed-timestep match.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    ticks_per_second: u32,
}

impl SimClock {
    /// Create a new clock at tick 0.
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            tick: 0,
            ticks_per_second: ticks_per_second.max(1),
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Wall-clock seconds the elapsed ticks represent at the target rate.
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick as f64 / f64::from(self.ticks_per_second)
    }

    /// Ticks that make up one second of match time.
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}

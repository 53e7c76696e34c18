//! A single subsystem's energy: a clamped level plus a rate slider.
//!
//! The level is what actions spend. The slider sits in `[0, 100]` with the
//! baseline regeneration rate at 50, so the effective rate ranges from zero
//! to twice the baseline.

use serde::{Deserialize, Serialize};
use sw_core::tuning::{LEVEL_MAX, SLIDER_BASELINE, SLIDER_MAX};

/// Level and regeneration state of one subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyCell {
    level: f64,
    slider: f64,
    baseline_rate: f64,
}

impl EnergyCell {
    /// A full cell with its slider at the baseline position.
    pub fn new(baseline_rate: f64) -> Self {
        Self {
            level: LEVEL_MAX,
            slider: SLIDER_BASELINE,
            baseline_rate,
        }
    }

    /// Current level in `[0, 100]`.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Current slider position in `[0, 100]`.
    pub fn slider(&self) -> f64 {
        self.slider
    }

    /// Regeneration per tick with the slider at baseline.
    pub fn baseline_rate(&self) -> f64 {
        self.baseline_rate
    }

    /// Effective regeneration per tick.
    pub fn rate(&self) -> f64 {
        self.baseline_rate * (self.slider / SLIDER_BASELINE)
    }

    /// Overwrite the level, clamped to bounds.
    pub fn set_level(&mut self, level: f64) {
        self.level = level.clamp(0.0, LEVEL_MAX);
    }

    /// Adjust the level by a delta, clamping to bounds. Returns the new level.
    pub fn adjust(&mut self, delta: f64) -> f64 {
        self.level = (self.level + delta).clamp(0.0, LEVEL_MAX);
        self.level
    }

    /// Returns true if the level covers `cost`.
    pub fn can_afford(&self, cost: f64) -> bool {
        self.level >= cost
    }

    /// Spend `cost` if the level covers it. Returns whether it was spent.
    pub fn spend(&mut self, cost: f64) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.adjust(-cost);
        true
    }

    /// Passive regeneration for one tick.
    pub fn regenerate(&mut self) {
        if !self.is_full() {
            self.level = (self.level + self.rate()).min(LEVEL_MAX);
        }
    }

    /// Returns true if moving the slider by `delta` keeps it inside its bounds.
    pub fn slider_accepts(&self, delta: f64) -> bool {
        (0.0..=SLIDER_MAX).contains(&(self.slider + delta))
    }

    pub(crate) fn shift_slider(&mut self, delta: f64) {
        self.slider = (self.slider + delta).clamp(0.0, SLIDER_MAX);
    }

    #[cfg(test)]
    pub(crate) fn set_slider(&mut self, slider: f64) {
        self.slider = slider.clamp(0.0, SLIDER_MAX);
    }

    /// Refill the level and return the slider to baseline.
    pub fn reset(&mut self) {
        self.level = LEVEL_MAX;
        self.slider = SLIDER_BASELINE;
    }

    /// Fraction of the level that is filled (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        self.level / LEVEL_MAX
    }

    /// Returns true if the level is at its maximum.
    pub fn is_full(&self) -> bool {
        self.level >= LEVEL_MAX
    }
}

impl std::fmt::Display for EnergyCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}/{:.0} @{:.0}", self.level, LEVEL_MAX, self.slider)
    }
}

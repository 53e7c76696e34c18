//! The five-subsystem energy pool and slider redistribution.
//!
//! Redistribution runs in two phases. [`EnergySystem::plan_shift`] is pure:
//! it works out how far the selected slider can move and which donors can
//! pay for it in equal shares. [`EnergySystem::commit`] applies a plan. A
//! donor that cannot absorb its share without leaving `[0, 100]` drops out
//! and the share is recomputed over the rest.
//!
//! Because donors drop out per request, a shift followed by the reverse shift
//! only restores the previous sliders when no donor saturated in between.

use serde::{Deserialize, Serialize};
use sw_core::EnergyTuning;
use sw_core::tuning::SLIDER_MAX;
use tracing::debug;

use crate::cell::EnergyCell;
use crate::outcome::ActionOutcome;
use crate::subsystem::Subsystem;

/// A feasible slider redistribution, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftPlan {
    /// Subsystem whose slider receives `delta`.
    pub target: Subsystem,
    /// Amount added to the target slider.
    pub delta: f64,
    /// Amount added to each donor slider (opposite sign of `delta`).
    pub share: f64,
    /// Donors that pay the share.
    pub donors: Vec<Subsystem>,
}

/// Per-ship energy state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySystem {
    cells: [EnergyCell; 5],
    selected: Subsystem,
    shift_magnitude: f64,
}

impl EnergySystem {
    /// All subsystems full, sliders at baseline, hull selected.
    pub fn new(tuning: &EnergyTuning) -> Self {
        Self {
            cells: Subsystem::ALL.map(|sub| EnergyCell::new(sub.baseline_rate(tuning))),
            selected: Subsystem::Hull,
            shift_magnitude: tuning.shift_magnitude,
        }
    }

    /// The cell backing `sub`.
    pub fn cell(&self, sub: Subsystem) -> &EnergyCell {
        &self.cells[sub.index()]
    }

    /// Mutable access to the cell backing `sub`.
    pub fn cell_mut(&mut self, sub: Subsystem) -> &mut EnergyCell {
        &mut self.cells[sub.index()]
    }

    /// Current level of `sub`.
    pub fn level(&self, sub: Subsystem) -> f64 {
        self.cell(sub).level()
    }

    /// Current slider position of `sub`.
    pub fn slider(&self, sub: Subsystem) -> f64 {
        self.cell(sub).slider()
    }

    /// Effective regeneration per tick of a subsystem.
    pub fn rate(&self, sub: Subsystem) -> f64 {
        self.cell(sub).rate()
    }

    /// Sum of all slider positions.
    pub fn slider_total(&self) -> f64 {
        self.cells.iter().map(EnergyCell::slider).sum()
    }

    /// The subsystem that redistribution targets.
    pub fn selected(&self) -> Subsystem {
        self.selected
    }

    /// Make `sub` the target of the next redistribution.
    pub fn select(&mut self, sub: Subsystem) {
        self.selected = sub;
    }

    /// Move the selection forward (`+1`) or backward (`-1`), wrapping.
    pub fn select_next(&mut self, direction: i32) -> Subsystem {
        self.selected = self.selected.cycle(direction);
        self.selected
    }

    /// Spend `cost` from a subsystem, or report it as short.
    pub fn try_spend(&mut self, sub: Subsystem, cost: f64) -> ActionOutcome {
        if self.cell_mut(sub).spend(cost) {
            ActionOutcome::Performed
        } else {
            ActionOutcome::InsufficientEnergy(sub)
        }
    }

    /// Remove level without a gate (damage). Returns the new level.
    pub fn drain(&mut self, sub: Subsystem, amount: f64) -> f64 {
        self.cell_mut(sub).adjust(-amount)
    }

    /// Passive regeneration of every subsystem for one tick.
    pub fn regenerate(&mut self) {
        for cell in &mut self.cells {
            cell.regenerate();
        }
    }

    /// Refill every level and return every slider to baseline.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Shift the selected slider by the configured magnitude in `direction`.
    pub fn shift(&mut self, direction: i32) -> ActionOutcome {
        let amount = f64::from(direction.signum()) * self.shift_magnitude;
        self.shift_by(self.selected, amount)
    }

    /// Plan and commit a shift of `amount` slider units into `target`.
    pub fn shift_by(&mut self, target: Subsystem, amount: f64) -> ActionOutcome {
        match self.plan_shift(target, amount) {
            Some(plan) => {
                self.commit(&plan);
                ActionOutcome::Performed
            }
            None => ActionOutcome::Saturated,
        }
    }

    /// How far `target`'s slider can actually move toward `amount`.
    pub fn probe_shift(&self, target: Subsystem, amount: f64) -> f64 {
        let slider = self.slider(target);
        (slider + amount).clamp(0.0, SLIDER_MAX) - slider
    }

    /// Find donors that can pay for the shift in equal shares.
    ///
    /// Returns `None` if the target cannot move or no donor set works.
    pub fn plan_shift(&self, target: Subsystem, amount: f64) -> Option<ShiftPlan> {
        let delta = self.probe_shift(target, amount);
        if delta == 0.0 {
            return None;
        }

        let mut donors: Vec<Subsystem> = Subsystem::ALL
            .into_iter()
            .filter(|sub| *sub != target)
            .collect();

        // A donor that fails a share also fails every larger one, so all
        // failing donors can be dropped in the same pass.
        while !donors.is_empty() {
            let share = -delta / donors.len() as f64;
            let before = donors.len();
            donors.retain(|sub| self.cell(*sub).slider_accepts(share));
            if donors.len() == before {
                return Some(ShiftPlan {
                    target,
                    delta,
                    share,
                    donors,
                });
            }
        }
        None
    }

    /// Apply a plan produced by [`EnergySystem::plan_shift`].
    pub fn commit(&mut self, plan: &ShiftPlan) {
        for donor in &plan.donors {
            self.cell_mut(*donor).shift_slider(plan.share);
        }
        self.cell_mut(plan.target).shift_slider(plan.delta);
        debug!(
            target = %plan.target,
            delta = plan.delta,
            donors = plan.donors.len(),
            "energy shifted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sw_core::tuning::SLIDER_BASELINE;

    fn system() -> EnergySystem {
        EnergySystem::new(&EnergyTuning::default())
    }

    fn sliders(energy: &EnergySystem) -> Vec<f64> {
        Subsystem::ALL.iter().map(|s| energy.slider(*s)).collect()
    }

    #[test]
    fn starts_full_and_balanced() {
        let e = system();
        for sub in Subsystem::ALL {
            assert_eq!(e.level(sub), 100.0);
            assert_eq!(e.slider(sub), SLIDER_BASELINE);
        }
        assert_eq!(e.selected(), Subsystem::Hull);
        assert!((e.slider_total() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn shift_draws_equal_shares() {
        let mut e = system();
        e.select(Subsystem::Engine);
        assert_eq!(e.shift(1), ActionOutcome::Performed);
        assert!((e.slider(Subsystem::Engine) - 51.0).abs() < 1e-12);
        for sub in [
            Subsystem::Hull,
            Subsystem::Ammo,
            Subsystem::Shield,
            Subsystem::Jump,
        ] {
            assert!((e.slider(sub) - 49.75).abs() < 1e-12);
        }
        assert!((e.slider_total() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn shift_and_back_restores_sliders() {
        let mut e = system();
        e.select(Subsystem::Shield);
        let before = sliders(&e);
        assert!(e.shift(1).is_performed());
        assert!(e.shift(-1).is_performed());
        for (a, b) in before.iter().zip(sliders(&e)) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn saturated_donor_is_skipped() {
        let mut e = system();
        e.cell_mut(Subsystem::Ammo).set_slider(0.0);
        e.cell_mut(Subsystem::Engine).set_slider(75.0);
        e.select(Subsystem::Shield);

        let plan = e.plan_shift(Subsystem::Shield, 1.0).unwrap();
        assert!(!plan.donors.contains(&Subsystem::Ammo));
        assert_eq!(plan.donors.len(), 3);
        assert!((plan.share + 1.0 / 3.0).abs() < 1e-12);

        assert!(e.shift(1).is_performed());
        assert_eq!(e.slider(Subsystem::Ammo), 0.0);
        assert!((e.slider(Subsystem::Shield) - 51.0).abs() < 1e-12);
    }

    #[test]
    fn reverse_shift_after_saturation_spreads_differently() {
        let mut e = system();
        e.cell_mut(Subsystem::Ammo).set_slider(0.0);
        e.select(Subsystem::Hull);
        assert!(e.shift(1).is_performed());
        assert!(e.shift(-1).is_performed());
        // ammo could not donate on the way up but receives on the way down
        assert!((e.slider(Subsystem::Ammo) - 0.25).abs() < 1e-12);
        assert!((e.slider(Subsystem::Hull) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn full_target_is_a_no_op() {
        let mut e = system();
        e.cell_mut(Subsystem::Jump).set_slider(100.0);
        e.select(Subsystem::Jump);
        let before = sliders(&e);
        assert_eq!(e.probe_shift(Subsystem::Jump, 1.0), 0.0);
        assert_eq!(e.shift(1), ActionOutcome::Saturated);
        assert_eq!(before, sliders(&e));
    }

    #[test]
    fn probe_clamps_partial_move() {
        let mut e = system();
        e.cell_mut(Subsystem::Hull).set_slider(99.5);
        assert!((e.probe_shift(Subsystem::Hull, 1.0) - 0.5).abs() < 1e-12);
        e.cell_mut(Subsystem::Hull).set_slider(0.25);
        assert!((e.probe_shift(Subsystem::Hull, -1.0) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn no_donors_left_is_a_no_op() {
        let mut e = system();
        for sub in [
            Subsystem::Ammo,
            Subsystem::Shield,
            Subsystem::Engine,
            Subsystem::Jump,
        ] {
            e.cell_mut(sub).set_slider(0.0);
        }
        e.select(Subsystem::Hull);
        assert_eq!(e.shift(1), ActionOutcome::Saturated);
        assert_eq!(e.slider(Subsystem::Hull), SLIDER_BASELINE);
    }

    #[test]
    fn lowering_requires_donors_with_headroom() {
        let mut e = system();
        for sub in [
            Subsystem::Hull,
            Subsystem::Ammo,
            Subsystem::Shield,
            Subsystem::Jump,
        ] {
            e.cell_mut(sub).set_slider(100.0);
        }
        e.select(Subsystem::Engine);
        assert_eq!(e.shift(-1), ActionOutcome::Saturated);
    }

    #[test]
    fn plan_does_not_mutate() {
        let e = system();
        let before = e.clone();
        let _ = e.plan_shift(Subsystem::Ammo, 1.0);
        assert_eq!(before, e);
    }

    #[test]
    fn try_spend_reports_shortfall() {
        let mut e = system();
        e.cell_mut(Subsystem::Ammo).set_level(1.0);
        assert_eq!(
            e.try_spend(Subsystem::Ammo, 5.0),
            ActionOutcome::InsufficientEnergy(Subsystem::Ammo)
        );
        assert_eq!(e.level(Subsystem::Ammo), 1.0);
        assert!(e.try_spend(Subsystem::Ammo, 1.0).is_performed());
        assert_eq!(e.level(Subsystem::Ammo), 0.0);
    }

    #[test]
    fn regenerate_uses_each_rate() {
        let tuning = EnergyTuning::default();
        let mut e = EnergySystem::new(&tuning);
        e.drain(Subsystem::Ammo, 50.0);
        e.drain(Subsystem::Engine, 50.0);
        e.cell_mut(Subsystem::Engine).set_slider(100.0);
        e.regenerate();
        assert!((e.level(Subsystem::Ammo) - (50.0 + tuning.ammo_rate)).abs() < 1e-12);
        assert!((e.level(Subsystem::Engine) - (50.0 + 2.0 * tuning.engine_rate)).abs() < 1e-12);
        assert_eq!(e.level(Subsystem::Hull), 100.0);
    }

    #[test]
    fn select_next_wraps() {
        let mut e = system();
        assert_eq!(e.select_next(-1), Subsystem::Jump);
        assert_eq!(e.select_next(1), Subsystem::Hull);
        assert_eq!(e.select_next(1), Subsystem::Ammo);
    }

    #[test]
    fn reset_restores_levels_and_sliders() {
        let mut e = system();
        e.select(Subsystem::Ammo);
        for _ in 0..10 {
            let _ = e.shift(1);
        }
        e.drain(Subsystem::Hull, 80.0);
        e.reset();
        for sub in Subsystem::ALL {
            assert_eq!(e.level(sub), 100.0);
            assert_eq!(e.slider(sub), SLIDER_BASELINE);
        }
    }

    proptest! {
        #[test]
        fn sliders_stay_bounded_and_total_holds(
            steps in prop::collection::vec((0usize..5, prop_oneof![Just(1i32), Just(-1i32)]), 1..300)
        ) {
            let mut e = system();
            for (target, direction) in steps {
                e.select(Subsystem::ALL[target]);
                let _ = e.shift(direction);
                for sub in Subsystem::ALL {
                    let s = e.slider(sub);
                    prop_assert!((0.0..=SLIDER_MAX).contains(&s));
                }
                prop_assert!((e.slider_total() - 250.0).abs() < 1e-6);
            }
        }
    }
}

mod target;

use bon::bon;
use chrono::TimeDelta;

pub use self::target::ChargeTarget;
use crate::{
    core::curve::ChargingCurve,
    error::{Error, Result, ensure_parameter, ensure_state_of_charge},
    prelude::*,
    quantity::{energy::KilowattHours, percent::Percent, time::Hours},
};

pub const DEFAULT_STATE_OF_CHARGE: Percent = Percent(80.0);

/// Simulated traction battery.
///
/// Charging is simulated in fixed time steps, and the charging curve is sampled
/// at the current state-of-charge on every step.
#[must_use]
#[derive(Clone, Debug)]
pub struct Battery {
    capacity: KilowattHours,
    state_of_charge: Percent,
    curve: ChargingCurve,

    /// Simulated time step.
    step: TimeDelta,

    /// Simulated time limit for a single [`Battery::charge_to`] call.
    max_charging_time: TimeDelta,
}

#[bon]
impl Battery {
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] on a non-positive capacity, step or time limit,
    /// or an invalid initial state-of-charge.
    #[builder]
    pub fn new(
        capacity: KilowattHours,
        #[builder(into)] curve: ChargingCurve,
        #[builder(default = DEFAULT_STATE_OF_CHARGE)] state_of_charge: Percent,
        #[builder(default = TimeDelta::seconds(1))] step: TimeDelta,
        #[builder(default = TimeDelta::hours(24))] max_charging_time: TimeDelta,
    ) -> Result<Self> {
        ensure_parameter!(
            capacity.is_finite() && capacity > KilowattHours::ZERO,
            "capacity",
            "must be positive, got {capacity:?}"
        );
        ensure_parameter!(
            step >= TimeDelta::milliseconds(1),
            "step",
            "must be at least one millisecond, got {step}"
        );
        ensure_parameter!(
            max_charging_time >= step,
            "max_charging_time",
            "must not be shorter than the step, got {max_charging_time}"
        );
        ensure_state_of_charge("state_of_charge", state_of_charge)?;
        Ok(Self { capacity, state_of_charge, curve, step, max_charging_time })
    }
}

impl Battery {
    /// Battery with the default state-of-charge and simulation step.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] on a non-positive capacity.
    pub fn try_new(capacity: KilowattHours, curve: impl Into<ChargingCurve>) -> Result<Self> {
        Self::builder().capacity(capacity).curve(curve).build()
    }

    pub const fn capacity(&self) -> KilowattHours {
        self.capacity
    }

    pub const fn state_of_charge(&self) -> Percent {
        self.state_of_charge
    }

    pub const fn curve(&self) -> &ChargingCurve {
        &self.curve
    }

    #[must_use]
    pub const fn step(&self) -> TimeDelta {
        self.step
    }

    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the percentage is outside `0..=100`.
    pub fn set_state_of_charge(&mut self, state_of_charge: Percent) -> Result {
        self.state_of_charge = ensure_state_of_charge("state_of_charge", state_of_charge)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the percentage is outside `0..=100`.
    pub fn with_state_of_charge(mut self, state_of_charge: Percent) -> Result<Self> {
        self.set_state_of_charge(state_of_charge)?;
        Ok(self)
    }

    /// Residual energy at the current state-of-charge.
    pub fn energy(&self) -> KilowattHours {
        self.energy_at(self.state_of_charge)
    }

    /// Residual energy at the given state-of-charge.
    pub fn energy_at(&self, state_of_charge: Percent) -> KilowattHours {
        self.capacity * state_of_charge
    }

    /// State-of-charge corresponding to the residual energy.
    pub fn state_of_charge_at(&self, energy: KilowattHours) -> Percent {
        Percent::from_proportion(energy / self.capacity)
    }

    /// Charge until the target is reached and return the elapsed simulated time.
    ///
    /// The state-of-charge is capped at 100%: charging stops early once the battery is full.
    /// A target that is already met takes no time.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] on an invalid target.
    /// - [`Error::InfeasiblePlan`] when the curve stops delivering power before the target,
    ///   or charging takes longer than the configured limit.
    pub fn charge_to(&mut self, target: impl Into<ChargeTarget>) -> Result<TimeDelta> {
        let target = target.into();
        let mut remaining = match target {
            ChargeTarget::StateOfCharge(state_of_charge) => {
                self.energy_at(ensure_state_of_charge("target", state_of_charge)?) - self.energy()
            }
            ChargeTarget::Energy(energy) => {
                ensure_parameter!(energy.is_finite(), "target", "energy must be finite");
                energy
            }
        };

        let step_millis = self.step.num_milliseconds();
        let max_steps = self.max_charging_time.num_milliseconds() / step_millis;
        let mut n_steps = 0;

        while remaining > KilowattHours::ZERO {
            if n_steps >= max_steps {
                return Err(Error::infeasible(format!(
                    "charging to {target:?} takes longer than {}",
                    self.max_charging_time,
                )));
            }
            let energy = self.step_energy()?;
            if energy <= KilowattHours::ZERO {
                return Err(Error::infeasible(format!(
                    "charging stalls at {:?} before reaching {target:?}",
                    self.state_of_charge,
                )));
            }
            remaining -= energy;
            n_steps += 1;
            if self.add(energy) {
                break;
            }
        }

        let elapsed = TimeDelta::milliseconds(step_millis * n_steps);
        trace!(?target, ?elapsed, state_of_charge = ?self.state_of_charge, "charged");
        Ok(elapsed)
    }

    /// Charge for the fixed duration and return the energy gained.
    ///
    /// The duration is truncated to whole simulation steps.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] on a negative duration.
    /// - [`Error::InfeasiblePlan`] when the curve yields a non-finite rate.
    pub fn charge_for(&mut self, duration: TimeDelta) -> Result<KilowattHours> {
        ensure_parameter!(
            duration >= TimeDelta::zero(),
            "duration",
            "must not be negative, got {duration}"
        );
        let initial_energy = self.energy();
        for _ in 0..(duration.num_milliseconds() / self.step.num_milliseconds()) {
            if self.add(self.step_energy()?) {
                break;
            }
        }
        Ok(self.energy() - initial_energy)
    }

    /// Energy delivered during one step at the current state-of-charge.
    fn step_energy(&self) -> Result<KilowattHours> {
        let rate = self.curve.rate(self.state_of_charge);
        if !rate.is_finite() {
            return Err(Error::infeasible(format!(
                "charging curve yields {rate:?} at {:?}",
                self.state_of_charge,
            )));
        }
        Ok(rate * Hours::from(self.step))
    }

    /// Add the energy and return whether the battery is full.
    fn add(&mut self, energy: KilowattHours) -> bool {
        self.state_of_charge += self.state_of_charge_at(energy);
        if self.state_of_charge >= Percent::FULL {
            self.state_of_charge = Percent::FULL;
            true
        } else {
            false
        }
    }
}

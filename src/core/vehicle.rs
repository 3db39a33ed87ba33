mod speed;
mod stops;

use bon::bon;

pub use self::{speed::MAX_SPEED, stops::MAX_STOPS};
use crate::{
    core::{battery::Battery, curve::ConsumptionCurve},
    error::{Result, ensure_parameter, ensure_state_of_charge},
    quantity::{energy::KilowattHours, percent::Percent, power::Kilowatts},
};

pub const DEFAULT_RESERVE: Percent = Percent(10.0);

/// State-of-charge the stops charge up to, unless the last leg needs more.
///
/// Real charging curves taper sharply above it.
pub const INTERMEDIATE_STATE_OF_CHARGE: Percent = Percent(80.0);

/// Electric vehicle with its battery, reserve and consumption.
///
/// The planning methods never touch the vehicle's own battery: they simulate on a copy.
#[must_use]
#[derive(Clone, Debug)]
pub struct Vehicle {
    battery: Battery,

    /// The battery must never drain below this state-of-charge.
    reserve: Percent,

    consumption: ConsumptionCurve,
}

#[bon]
impl Vehicle {
    /// # Errors
    ///
    /// [`crate::Error::InvalidParameter`] on an invalid reserve.
    #[builder]
    pub fn new(
        battery: Battery,
        #[builder(default = DEFAULT_RESERVE)] reserve: Percent,
        #[builder(default)] consumption: ConsumptionCurve,
    ) -> Result<Self> {
        ensure_state_of_charge("reserve", reserve)?;
        Ok(Self { battery, reserve, consumption })
    }
}

impl Vehicle {
    /// Vehicle from the plain scalar defaults: 75 kWh battery charging at constant 3 kWh/min,
    /// 10% reserve and the default consumption.
    ///
    /// # Errors
    ///
    /// Never fails with the built-in values.
    pub fn try_default() -> Result<Self> {
        let battery = Battery::try_new(
            KilowattHours(75.0),
            Kilowatts::from_kilowatt_hours_per_minute(75.0 * 0.8 / 20.0),
        )?;
        Self::builder().battery(battery).build()
    }

    pub const fn battery(&self) -> &Battery {
        &self.battery
    }

    pub const fn reserve(&self) -> Percent {
        self.reserve
    }

    pub const fn consumption(&self) -> &ConsumptionCurve {
        &self.consumption
    }

    /// Resolve the trip's start and end states-of-charge.
    ///
    /// The end state defaults to the reserve.
    fn trip_states_of_charge(
        &self,
        start: Percent,
        end: Option<Percent>,
    ) -> Result<(Percent, Percent)> {
        let start = ensure_state_of_charge("start_state_of_charge", start)?;
        let end = ensure_state_of_charge("end_state_of_charge", end.unwrap_or(self.reserve))?;
        ensure_parameter!(
            end >= self.reserve,
            "end_state_of_charge",
            "{end:?} is below the reserve of {:?}",
            self.reserve
        );
        ensure_parameter!(
            start >= end,
            "start_state_of_charge",
            "{start:?} is below the end state-of-charge of {end:?}"
        );
        Ok((start, end))
    }
}

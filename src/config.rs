//! Vehicle description files.
//!
//! ```toml
//! capacity = 75.0
//! reserve = 10.0
//!
//! [charging]
//! samples = [[10.0, 211.0], [80.0, 46.0], [100.0, 11.0]]
//! extrapolation = "clamp"
//!
//! [consumption]
//! quadratic = [8.28571, -0.0307143, 0.00107143]
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    core::{
        battery::Battery,
        curve::{ChargingCurve, ConsumptionCurve, Extrapolation},
        vehicle::Vehicle,
    },
    quantity::{energy::KilowattHours, percent::Percent, power::Kilowatts},
};

#[must_use]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    pub capacity: KilowattHours,

    /// Defaults to 10%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<Percent>,

    pub charging: ChargingConfig,

    #[serde(default)]
    pub consumption: ConsumptionConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ChargingConfig {
    /// Same power at any state-of-charge.
    Constant { constant: Kilowatts },

    /// Interpolated `[state-of-charge, power]` pairs.
    Sampled {
        samples: Vec<(Percent, Kilowatts)>,

        #[serde(default)]
        extrapolation: Extrapolation,
    },
}

/// Quadratic consumption coefficients: constant, linear and quadratic in speed.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumptionConfig {
    pub quadratic: [f64; 3],
}

impl Default for ConsumptionConfig {
    fn default() -> Self {
        Self { quadratic: ConsumptionCurve::DEFAULT_COEFFICIENTS }
    }
}

impl TryFrom<ChargingConfig> for ChargingCurve {
    type Error = Error;

    fn try_from(config: ChargingConfig) -> Result<Self, Self::Error> {
        match config {
            ChargingConfig::Constant { constant } => Ok(Self::constant(constant)),
            ChargingConfig::Sampled { samples, extrapolation } => {
                Self::sampled(samples, extrapolation)
            }
        }
    }
}

impl From<ConsumptionConfig> for ConsumptionCurve {
    fn from(config: ConsumptionConfig) -> Self {
        let [constant, linear, quadratic] = config.quadratic;
        Self::quadratic(constant, linear, quadratic)
    }
}

impl TryFrom<VehicleConfig> for Vehicle {
    type Error = Error;

    fn try_from(config: VehicleConfig) -> Result<Self, Self::Error> {
        let battery = Battery::try_new(config.capacity, ChargingCurve::try_from(config.charging)?)?;
        Self::builder()
            .battery(battery)
            .maybe_reserve(config.reserve)
            .consumption(config.consumption.into())
            .build()
    }
}

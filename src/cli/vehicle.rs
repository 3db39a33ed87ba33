//! Vehicle selection arguments.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ev_trip_planner::{config::VehicleConfig, core::vehicle::Vehicle, presets};
use tracing::info;

#[derive(Parser)]
pub struct VehicleArgs {
    /// Built-in vehicle.
    #[clap(long = "vehicle", env = "VEHICLE", default_value = "default")]
    preset: Preset,

    /// TOML vehicle description, takes precedence over the built-in vehicle.
    #[clap(long = "vehicle-file", env = "VEHICLE_FILE")]
    file: Option<PathBuf>,
}

impl VehicleArgs {
    pub fn load(&self) -> Result<Vehicle> {
        let Some(path) = &self.file else {
            info!(preset = ?self.preset, "using the built-in vehicle");
            return self.preset.build();
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let config: VehicleConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(path = %path.display(), "loaded the vehicle");
        Vehicle::try_from(config).with_context(|| format!("invalid vehicle in `{}`", path.display()))
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Preset {
    /// 75 kWh, constant 180 kW charging.
    Default,

    /// 75 kWh, tapering charging from 211 kW.
    TeslaModelYLongRange,
}

impl Preset {
    fn build(self) -> Result<Vehicle> {
        let vehicle = match self {
            Self::Default => presets::default_vehicle()?,
            Self::TeslaModelYLongRange => presets::tesla_model_y_long_range()?,
        };
        Ok(vehicle)
    }
}

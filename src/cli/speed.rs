use anyhow::{Context, Result};
use chrono::TimeDelta;
use clap::Parser;
use ev_trip_planner::quantity::distance::Kilometers;
use tracing::instrument;

use crate::{
    cli::{StateOfChargeArgs, VehicleArgs},
    tables::build_speed_table,
};

#[derive(Parser)]
pub struct SpeedArgs {
    #[clap(flatten)]
    pub vehicle: VehicleArgs,

    /// Trip distance in kilometers.
    #[clap(long, env = "DISTANCE")]
    pub distance: Kilometers,

    /// Number of charging breaks.
    #[clap(long, env = "BREAK_NUMBER", default_value = "0")]
    pub break_number: u32,

    /// Duration of every charging break.
    #[clap(long, env = "BREAK_DURATION", default_value = "15m")]
    break_duration: humantime::Duration,

    #[clap(flatten)]
    pub state_of_charge: StateOfChargeArgs,
}

impl SpeedArgs {
    pub fn break_duration(&self) -> Result<TimeDelta> {
        TimeDelta::from_std(self.break_duration.into()).context("the break duration is too long")
    }
}

#[instrument(skip_all)]
pub fn speed(args: &SpeedArgs) -> Result<()> {
    let vehicle = args.vehicle.load()?;
    let break_duration = args.break_duration()?;
    let speed = vehicle
        .max_trip_speed()
        .distance(args.distance)
        .break_number(args.break_number)
        .break_duration(break_duration)
        .maybe_end_state_of_charge(args.state_of_charge.end)
        .start_state_of_charge(args.state_of_charge.start)
        .call()
        .context("failed to find the maximum speed")?;
    let total_break_duration = i32::try_from(args.break_number)
        .ok()
        .and_then(|break_number| break_duration.checked_mul(break_number))
        .context("the total break duration is too long")?;
    println!("{}", build_speed_table(speed, args.distance / speed, total_break_duration));
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use ev_trip_planner::quantity::{distance::Kilometers, speed::KilometersPerHour};
use tracing::{info, instrument};

use crate::{
    cli::{StateOfChargeArgs, VehicleArgs},
    tables::build_stops_table,
};

#[derive(Parser)]
pub struct StopsArgs {
    #[clap(flatten)]
    pub vehicle: VehicleArgs,

    /// Trip distance in kilometers.
    #[clap(long, env = "DISTANCE")]
    pub distance: Kilometers,

    /// Constant cruising speed in kilometers per hour.
    #[clap(long, env = "SPEED")]
    pub speed: KilometersPerHour,

    #[clap(flatten)]
    pub state_of_charge: StateOfChargeArgs,
}

#[instrument(skip_all)]
pub fn stops(args: &StopsArgs) -> Result<()> {
    let vehicle = args.vehicle.load()?;
    let stops = vehicle
        .min_break_duration()
        .distance(args.distance)
        .speed(args.speed)
        .maybe_end_state_of_charge(args.state_of_charge.end)
        .start_state_of_charge(args.state_of_charge.start)
        .call()
        .context("failed to plan the charging stops")?;
    info!(n_stops = stops.len(), "planned");
    println!("{}", build_stops_table(&stops, args.distance / args.speed));
    Ok(())
}

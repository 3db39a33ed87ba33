mod speed;
mod stops;
mod vehicle;

use clap::{Parser, Subcommand};
use ev_trip_planner::quantity::percent::Percent;

pub use self::{
    speed::{SpeedArgs, speed},
    stops::{StopsArgs, stops},
    vehicle::VehicleArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plan the charging stops for a trip at a constant speed.
    #[clap(name = "stops")]
    Stops(Box<StopsArgs>),

    /// Find the fastest constant speed for a trip with fixed breaks.
    #[clap(name = "speed")]
    Speed(Box<SpeedArgs>),
}

#[derive(Copy, Clone, Parser)]
pub struct StateOfChargeArgs {
    /// State-of-charge at departure, in percent.
    #[clap(long = "start-state-of-charge", env = "START_STATE_OF_CHARGE", default_value = "100")]
    pub start: Percent,

    /// State-of-charge at arrival, in percent. Defaults to the vehicle's reserve.
    #[clap(long = "end-state-of-charge", env = "END_STATE_OF_CHARGE")]
    pub end: Option<Percent>,
}

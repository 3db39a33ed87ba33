#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod tables;

use clap::{Parser, crate_version};
use tracing::info;

use crate::cli::{Args, Command, speed, stops};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Stops(args) => stops(&args)?,
        Command::Speed(args) => speed(&args)?,
    }

    info!("done!");
    Ok(())
}

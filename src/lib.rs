#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod core;
pub mod error;
pub mod presets;
mod prelude;
pub mod quantity;

pub use crate::error::{Error, Result};

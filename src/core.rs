pub mod battery;
pub mod curve;
pub mod optimize;
pub mod vehicle;

#![allow(unused_imports)]

pub use tracing::{debug, info, instrument, trace, warn};

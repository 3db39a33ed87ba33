mod charging;
mod consumption;
mod sampled;

pub use self::{
    charging::ChargingCurve,
    consumption::ConsumptionCurve,
    sampled::{Extrapolation, SampledCurve},
};

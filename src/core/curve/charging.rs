use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use crate::{
    core::curve::{Extrapolation, SampledCurve},
    error::Result,
    quantity::{percent::Percent, power::Kilowatts},
};

/// State-of-charge to charging power.
///
/// Negative rates are treated as zero: charging never discharges the battery.
#[must_use]
#[derive(Clone)]
pub enum ChargingCurve {
    Constant(Kilowatts),
    ClosedForm(Arc<dyn Fn(Percent) -> Kilowatts + Send + Sync>),
    Sampled(SampledCurve),
}

impl ChargingCurve {
    pub const fn constant(rate: Kilowatts) -> Self {
        Self::Constant(rate)
    }

    pub fn closed_form(rate: impl Fn(Percent) -> Kilowatts + Send + Sync + 'static) -> Self {
        Self::ClosedForm(Arc::new(rate))
    }

    /// Linearly interpolated curve, see [`SampledCurve::try_new`].
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidParameter`] on an invalid sample table.
    pub fn sampled(
        samples: impl IntoIterator<Item = (Percent, Kilowatts)>,
        extrapolation: Extrapolation,
    ) -> Result<Self> {
        Ok(Self::Sampled(SampledCurve::try_new(samples, extrapolation)?))
    }

    /// Charging power at the given state-of-charge.
    pub fn rate(&self, state: Percent) -> Kilowatts {
        let rate = match self {
            Self::Constant(rate) => *rate,
            Self::ClosedForm(rate) => rate(state),
            Self::Sampled(curve) => curve.rate(state),
        };
        if rate < Kilowatts::ZERO { Kilowatts::ZERO } else { rate }
    }
}

impl From<Kilowatts> for ChargingCurve {
    fn from(rate: Kilowatts) -> Self {
        Self::Constant(rate)
    }
}

impl From<SampledCurve> for ChargingCurve {
    fn from(curve: SampledCurve) -> Self {
        Self::Sampled(curve)
    }
}

impl Debug for ChargingCurve {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant(rate) => f.debug_tuple("Constant").field(rate).finish(),
            Self::ClosedForm(_) => f.write_str("ClosedForm(..)"),
            Self::Sampled(curve) => f.debug_tuple("Sampled").field(curve).finish(),
        }
    }
}

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ensure_parameter, ensure_state_of_charge},
    quantity::{percent::Percent, power::Kilowatts},
};

/// What a [`SampledCurve`] returns outside of its sampled state-of-charge range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Hold the rate of the nearest sample.
    #[default]
    Clamp,

    /// Extend the first or the last segment.
    ///
    /// The extended line may cross zero, in which case the curve yields no power.
    Linear,
}

/// Piecewise-linear charging curve over `(state-of-charge, rate)` samples.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct SampledCurve {
    samples: Vec<(Percent, Kilowatts)>,
    extrapolation: Extrapolation,
}

impl SampledCurve {
    /// # Errors
    ///
    /// [`crate::Error::InvalidParameter`], unless there are at least two samples,
    /// the states are valid and strictly increasing, and the rates are finite and non-negative.
    pub fn try_new(
        samples: impl IntoIterator<Item = (Percent, Kilowatts)>,
        extrapolation: Extrapolation,
    ) -> Result<Self> {
        let samples = samples.into_iter().collect_vec();
        ensure_parameter!(
            samples.len() >= 2,
            "samples",
            "at least two samples are required, got {}",
            samples.len()
        );
        for (state, rate) in &samples {
            ensure_state_of_charge("samples", *state)?;
            ensure_parameter!(
                rate.is_finite() && *rate >= Kilowatts::ZERO,
                "samples",
                "charging rate must be finite and non-negative, got {rate:?} at {state:?}"
            );
        }
        if let Some(((left, _), (right, _))) =
            samples.iter().tuple_windows().find(|((left, _), (right, _))| left >= right)
        {
            return Err(crate::Error::invalid(
                "samples",
                format!("states must be strictly increasing, but {left:?} is followed by {right:?}"),
            ));
        }
        Ok(Self { samples, extrapolation })
    }

    pub fn samples(&self) -> &[(Percent, Kilowatts)] {
        &self.samples
    }

    pub const fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    pub fn rate(&self, state: Percent) -> Kilowatts {
        let n_samples = self.samples.len();

        // Index of the first sample strictly above the state:
        let index = self.samples.partition_point(|(sample_state, _)| *sample_state <= state);

        let (left, right) = match (index, self.extrapolation) {
            (0, Extrapolation::Clamp) => return self.samples[0].1,
            (index, Extrapolation::Clamp) if index == n_samples => {
                return self.samples[n_samples - 1].1;
            }
            (0, Extrapolation::Linear) => (self.samples[0], self.samples[1]),
            (index, Extrapolation::Linear) if index == n_samples => {
                (self.samples[n_samples - 2], self.samples[n_samples - 1])
            }
            (index, _) => (self.samples[index - 1], self.samples[index]),
        };
        interpolate(left, right, state).max(Kilowatts::ZERO)
    }
}

fn interpolate(
    (left_state, left_rate): (Percent, Kilowatts),
    (right_state, right_rate): (Percent, Kilowatts),
    state: Percent,
) -> Kilowatts {
    let position = (state - left_state) / (right_state - left_state);
    left_rate + (right_rate - left_rate) * position
}

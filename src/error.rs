use std::fmt::Display;

use crate::quantity::percent::Percent;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Trip planning failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Argument is outside of its physically meaningful domain.
    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The trip cannot be completed with the given vehicle and constraints.
    #[error("no feasible plan: {0}")]
    InfeasiblePlan(String),

    /// The bounded search failed or landed on its boundary.
    #[error("search did not converge: {0}")]
    NumericalNonConvergence(String),
}

impl Error {
    pub fn invalid(name: &'static str, reason: impl Display) -> Self {
        Self::InvalidParameter { name, reason: reason.to_string() }
    }

    pub fn infeasible(reason: impl Display) -> Self {
        Self::InfeasiblePlan(reason.to_string())
    }

    pub fn non_convergence(reason: impl Display) -> Self {
        Self::NumericalNonConvergence(reason.to_string())
    }
}

/// Like [`anyhow::ensure`], but fails with [`Error::InvalidParameter`].
macro_rules! ensure_parameter {
    ($condition:expr, $name:expr, $($reason:tt)+) => {
        if !$condition {
            return Err($crate::error::Error::invalid($name, format!($($reason)+)));
        }
    };
}

pub(crate) use ensure_parameter;

pub fn ensure_state_of_charge(name: &'static str, percent: Percent) -> Result<Percent> {
    ensure_parameter!(
        percent.is_state_of_charge(),
        name,
        "must be within 0..=100%, got {percent:?}"
    );
    Ok(percent)
}

//! Bounded scalar minimisation.

use std::ops::RangeInclusive;

use argmin::{
    core::{CostFunction, Executor, State, TerminationReason},
    solver::brent::BrentOpt,
};

use crate::error::{Error, Result, ensure_parameter};

const MAX_ITERATIONS: u64 = 500;

/// Find the argument minimising the objective within the bounds with [Brent's method][1].
///
/// The objective is expected to be unimodal within the bounds. Bounds that are closer
/// to each other than the tolerance collapse to the lower bound.
///
/// [1]: https://en.wikipedia.org/wiki/Brent%27s_method
///
/// # Errors
///
/// - [`Error::InvalidParameter`] on non-finite or reversed bounds.
/// - [`Error::NumericalNonConvergence`] when the search fails or runs out of iterations.
/// - Any error returned by the objective itself.
pub fn minimize_bounded(
    objective: impl Fn(f64) -> Result<f64>,
    bounds: RangeInclusive<f64>,
    tolerance: f64,
) -> Result<f64> {
    let (lower, upper) = bounds.into_inner();
    ensure_parameter!(
        lower.is_finite() && upper.is_finite() && lower <= upper,
        "bounds",
        "expected finite `lower..=upper`, got {lower}..={upper}"
    );
    if upper - lower <= tolerance {
        return Ok(lower);
    }

    let solver = BrentOpt::new(lower, upper).set_tolerance(f64::EPSILON.sqrt(), tolerance);
    let result = Executor::new(Objective(objective), solver)
        .configure(|state| state.max_iters(MAX_ITERATIONS))
        .run()
        .map_err(|error| match error.downcast::<Error>() {
            Ok(error) => error,
            Err(error) => Error::non_convergence(format!("{error:#}")),
        })?;

    let state = result.state();
    if matches!(state.get_termination_reason(), Some(TerminationReason::MaxItersReached)) {
        return Err(Error::non_convergence(format!(
            "no minimum within {lower}..={upper} after {MAX_ITERATIONS} iterations",
        )));
    }
    state
        .get_best_param()
        .copied()
        .ok_or_else(|| Error::non_convergence(format!("no minimum within {lower}..={upper}")))
}

struct Objective<F>(F);

impl<F: Fn(f64) -> Result<f64>> CostFunction for Objective<F> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok((self.0)(*param)?)
    }
}

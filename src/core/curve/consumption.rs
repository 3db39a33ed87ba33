use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use crate::quantity::{consumption::Consumption, speed::KilometersPerHour};

/// Cruising speed to energy consumption.
#[must_use]
#[derive(Clone)]
pub enum ConsumptionCurve {
    /// Polynomial coefficients, lowest order first.
    Quadratic([f64; 3]),

    ClosedForm(Arc<dyn Fn(KilometersPerHour) -> Consumption + Send + Sync>),
}

impl ConsumptionCurve {
    /// About 17 kWh/100km at 110 km/h and 22 kWh/100km at 130 km/h.
    pub const DEFAULT_COEFFICIENTS: [f64; 3] = [8.28571, -0.030_714_3, 0.001_071_43];

    pub const fn quadratic(constant: f64, linear: f64, quadratic: f64) -> Self {
        Self::Quadratic([constant, linear, quadratic])
    }

    pub fn closed_form(
        consumption: impl Fn(KilometersPerHour) -> Consumption + Send + Sync + 'static,
    ) -> Self {
        Self::ClosedForm(Arc::new(consumption))
    }

    pub fn at(&self, speed: KilometersPerHour) -> Consumption {
        match self {
            Self::Quadratic([constant, linear, quadratic]) => {
                Consumption(quadratic.mul_add(speed.0, *linear).mul_add(speed.0, *constant))
            }
            Self::ClosedForm(consumption) => consumption(speed),
        }
    }
}

impl Default for ConsumptionCurve {
    fn default() -> Self {
        Self::Quadratic(Self::DEFAULT_COEFFICIENTS)
    }
}

impl Debug for ConsumptionCurve {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quadratic(coefficients) => f.debug_tuple("Quadratic").field(coefficients).finish(),
            Self::ClosedForm(_) => f.write_str("ClosedForm(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_default() {
        let curve = ConsumptionCurve::default();
        assert_abs_diff_eq!(curve.at(KilometersPerHour(0.0)).0, 8.28571);
        assert_abs_diff_eq!(curve.at(KilometersPerHour(110.0)).0, 17.871_44, epsilon = 1e-6);
        assert_abs_diff_eq!(curve.at(KilometersPerHour(130.0)).0, 22.400_018, epsilon = 1e-6);
    }

    #[test]
    fn test_closed_form() {
        let curve = ConsumptionCurve::closed_form(|speed| Consumption(speed.0 / 10.0));
        assert_abs_diff_eq!(curve.at(KilometersPerHour(120.0)).0, 12.0);
    }
}

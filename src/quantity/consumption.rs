use std::ops::Mul;

use crate::quantity::{distance::Kilometers, energy::KilowattHours};

// Energy per 100 km.
quantity!(Consumption, suffix: "kWh/100km", precision: 2);

impl Mul<Kilometers> for Consumption {
    type Output = KilowattHours;

    fn mul(self, distance: Kilometers) -> Self::Output {
        KilowattHours(self.0 * distance.0 / 100.0)
    }
}

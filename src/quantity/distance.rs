use std::ops::Div;

use crate::quantity::{speed::KilometersPerHour, time::Hours};

quantity!(Kilometers, suffix: "km", precision: 1);

impl Div<KilometersPerHour> for Kilometers {
    type Output = Hours;

    fn div(self, rhs: KilometersPerHour) -> Self::Output {
        Hours(self.0 / rhs.0)
    }
}

use std::ops::Mul;

use crate::quantity::{energy::KilowattHours, time::Hours};

quantity!(Kilowatts, suffix: "kW", precision: 1);

impl Kilowatts {
    pub fn from_kilowatt_hours_per_minute(rate: f64) -> Self {
        Self(rate * 60.0)
    }
}

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}

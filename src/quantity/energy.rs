use std::ops::{Div, Mul};

use crate::quantity::{
    consumption::Consumption,
    distance::Kilometers,
    percent::Percent,
    power::Kilowatts,
    time::Hours,
};

quantity!(KilowattHours, suffix: "kWh", precision: 2);

impl Mul<Percent> for KilowattHours {
    type Output = Self;

    fn mul(self, percent: Percent) -> Self::Output {
        self * percent.to_proportion()
    }
}

impl Div<Kilowatts> for KilowattHours {
    type Output = Hours;

    fn div(self, rhs: Kilowatts) -> Self::Output {
        Hours(self.0 / rhs.0)
    }
}

/// Distance that the energy lasts at the given consumption.
impl Div<Consumption> for KilowattHours {
    type Output = Kilometers;

    fn div(self, rhs: Consumption) -> Self::Output {
        Kilometers(self.0 / rhs.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_percent_of_capacity() {
        assert_abs_diff_eq!((KilowattHours(75.0) * Percent(10.0)).0, 7.5);
    }

    #[test]
    fn test_range() {
        let range = KilowattHours(67.5) / Consumption(20.0);
        assert_abs_diff_eq!(range.0, 337.5);
    }

    #[test]
    fn test_ordering() {
        assert!(KilowattHours(1.0) < KilowattHours(2.0));
        assert_eq!(KilowattHours(3.0).min(KilowattHours(2.0)), KilowattHours(2.0));
        assert_eq!(KilowattHours(-3.0).abs(), KilowattHours(3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours(12.345).to_string(), "12.35 kWh");
    }
}

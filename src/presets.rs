//! Ready-made vehicles.

use crate::{
    Result,
    core::{
        battery::Battery,
        curve::{ChargingCurve, Extrapolation},
        vehicle::Vehicle,
    },
    quantity::{energy::KilowattHours, percent::Percent, power::Kilowatts},
};

/// Tesla Model Y Long Range charging table: state-of-charge in percent, power in kilowatts.
///
/// Scraped from <https://zecar.com/resources/tesla-model-y-charging-guide>,
/// the last two rows are extrapolated.
const TESLA_MODEL_Y_LONG_RANGE_CHARGING: [(f64, f64); 17] = [
    (10.0, 211.0),
    (15.0, 198.0),
    (20.0, 185.0),
    (25.0, 172.0),
    (30.0, 157.0),
    (35.0, 139.0),
    (40.0, 125.0),
    (45.0, 113.0),
    (50.0, 101.0),
    (55.0, 90.0),
    (60.0, 81.0),
    (65.0, 76.0),
    (70.0, 71.0),
    (75.0, 61.0),
    (80.0, 46.0),
    (95.0, 11.0),
    (100.0, 11.0),
];

/// 75 kWh battery with constant 180 kW charging, 10% reserve and the default consumption.
///
/// # Errors
///
/// Never fails with the built-in values.
pub fn default_vehicle() -> Result<Vehicle> {
    Vehicle::try_default()
}

/// 75 kWh Tesla Model Y Long Range with its tapering charging curve.
///
/// # Errors
///
/// Never fails with the built-in values.
pub fn tesla_model_y_long_range() -> Result<Vehicle> {
    let curve = ChargingCurve::sampled(
        TESLA_MODEL_Y_LONG_RANGE_CHARGING
            .into_iter()
            .map(|(state_of_charge, rate)| (Percent(state_of_charge), Kilowatts(rate))),
        Extrapolation::Clamp,
    )?;
    Vehicle::builder().battery(Battery::try_new(KilowattHours(75.0), curve)?).build()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use super::*;
    use crate::quantity::{distance::Kilometers, speed::KilometersPerHour};

    #[test]
    fn test_default_vehicle() {
        let vehicle = default_vehicle().unwrap();
        assert_eq!(vehicle.battery().capacity(), KilowattHours(75.0));
        assert_abs_diff_eq!(vehicle.battery().curve().rate(Percent(50.0)).0, 180.0, epsilon = 1e-9);
        assert_eq!(vehicle.reserve(), Percent(10.0));
    }

    #[test]
    fn test_tesla_charging_curve() {
        let vehicle = tesla_model_y_long_range().unwrap();
        let curve = vehicle.battery().curve();
        assert_abs_diff_eq!(curve.rate(Percent(5.0)).0, 211.0);
        assert_abs_diff_eq!(curve.rate(Percent(12.5)).0, 204.5, epsilon = 1e-9);
        assert_abs_diff_eq!(curve.rate(Percent(87.5)).0, 28.5, epsilon = 1e-9);
        assert_abs_diff_eq!(curve.rate(Percent(100.0)).0, 11.0);
    }

    #[test]
    fn test_tesla_charge_to_80() {
        let mut battery = tesla_model_y_long_range().unwrap().battery().clone();
        battery.set_state_of_charge(Percent(10.0)).unwrap();
        let duration = battery.charge_to(Percent(80.0)).unwrap();
        assert_abs_diff_eq!(duration.as_seconds_f64() / 60.0, 30.7, epsilon = 0.1);
    }

    #[test]
    fn test_tesla_stops() {
        let stops = tesla_model_y_long_range()
            .unwrap()
            .min_break_duration()
            .distance(Kilometers(1000.0))
            .speed(KilometersPerHour(130.0))
            .call()
            .unwrap();
        let minutes: Vec<f64> =
            stops.iter().map(|duration| duration.as_seconds_f64() / 60.0).collect();
        assert_eq!(minutes.len(), 3);
        assert_abs_diff_eq!(minutes[0], 30.7, epsilon = 0.1);
        assert_abs_diff_eq!(minutes[1], 30.7, epsilon = 0.1);
        assert_abs_diff_eq!(minutes[2], 29.43, epsilon = 0.1);
    }

    #[test]
    fn test_tesla_max_trip_speed() {
        let speed = tesla_model_y_long_range()
            .unwrap()
            .max_trip_speed()
            .distance(Kilometers(1000.0))
            .break_number(3)
            .break_duration(TimeDelta::minutes(20))
            .call()
            .unwrap();
        assert_abs_diff_eq!(speed.0, 115.96, epsilon = 0.05);
    }
}

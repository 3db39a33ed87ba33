use bon::bon;
use chrono::TimeDelta;

use crate::{
    core::{optimize::minimize_bounded, vehicle::Vehicle},
    error::{Error, Result, ensure_parameter},
    prelude::*,
    quantity::{
        distance::Kilometers,
        energy::KilowattHours,
        percent::Percent,
        speed::KilometersPerHour,
    },
};

/// Upper bound of the speed search.
pub const MAX_SPEED: KilometersPerHour = KilometersPerHour(999.0);

const SPEED_TOLERANCE: f64 = 1e-6;

/// Speeds closer than this to either search bound are not trusted.
const BOUNDARY_MARGIN: KilometersPerHour = KilometersPerHour(1e-3);

/// Maximum energy imbalance accepted at the found speed.
const ENERGY_TOLERANCE: KilowattHours = KilowattHours(1e-3);

const STATE_OF_CHARGE_TOLERANCE: Percent = Percent(0.01);

#[bon]
impl Vehicle {
    /// Find the fastest constant speed that completes the trip with the given breaks.
    ///
    /// The energy budget is the energy between the start and end states-of-charge, plus:
    ///
    /// - the first break, starting from the state-of-charge at which charging for the break
    ///   duration lands on the end state (but not below the reserve);
    /// - every other break, starting from the reserve.
    ///
    /// The speed is the one at which the consumption over the distance matches the budget.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] on a non-positive distance or break duration,
    ///   or invalid states-of-charge.
    /// - [`Error::NumericalNonConvergence`] when no speed within `0..=999` km/h balances the budget.
    #[builder]
    pub fn max_trip_speed(
        &self,
        distance: Kilometers,
        #[builder(default)] break_number: u32,
        #[builder(default = TimeDelta::minutes(15))] break_duration: TimeDelta,
        end_state_of_charge: Option<Percent>,
        #[builder(default = Percent::FULL)] start_state_of_charge: Percent,
    ) -> Result<KilometersPerHour> {
        ensure_parameter!(
            distance.is_finite() && distance > Kilometers::ZERO,
            "distance",
            "must be positive, got {distance:?}"
        );
        ensure_parameter!(
            break_duration > TimeDelta::zero(),
            "break_duration",
            "must be positive, got {break_duration}"
        );
        let (start, end) = self.trip_states_of_charge(start_state_of_charge, end_state_of_charge)?;

        let mut available_energy = self.battery.energy_at(start) - self.battery.energy_at(end);
        let mut battery = self.battery.clone();
        if break_number >= 1 {
            let first_break_start = self.first_break_start(end, break_duration)?;
            battery.set_state_of_charge(first_break_start)?;
            let energy = battery.charge_for(break_duration)?;
            debug!(?first_break_start, ?energy, "first break");
            available_energy += energy;
        }
        if break_number >= 2 {
            battery.set_state_of_charge(self.reserve)?;
            let energy = battery.charge_for(break_duration)?;
            debug!(?energy, n_breaks = break_number - 1, "breaks from the reserve");
            available_energy += energy * f64::from(break_number - 1);
        }

        let imbalance = |speed: KilometersPerHour| {
            self.consumption.at(speed) * distance - available_energy
        };
        let speed = KilometersPerHour(minimize_bounded(
            |speed| Ok(imbalance(KilometersPerHour(speed)).0.powi(2)),
            0.0..=MAX_SPEED.0,
            SPEED_TOLERANCE,
        )?);

        if speed <= BOUNDARY_MARGIN || speed >= MAX_SPEED - BOUNDARY_MARGIN {
            return Err(Error::non_convergence(format!(
                "the speed search ended on its boundary at {speed:?} for {distance:?} \
                 with {available_energy:?} available",
            )));
        }
        let imbalance = imbalance(speed);
        if imbalance.abs() > ENERGY_TOLERANCE {
            return Err(Error::non_convergence(format!(
                "no speed balances {available_energy:?} over {distance:?}, \
                 the closest is {speed:?} with {imbalance:?} of imbalance",
            )));
        }

        info!(?distance, break_number, %break_duration, ?available_energy, ?speed, "found");
        Ok(speed)
    }
}

impl Vehicle {
    /// State-of-charge from which charging for the duration lands on the end state.
    #[instrument(skip_all, fields(end = ?end))]
    fn first_break_start(&self, end: Percent, duration: TimeDelta) -> Result<Percent> {
        let residual = |start: f64| {
            let mut battery = self.battery.clone().with_state_of_charge(Percent(start))?;
            battery.charge_for(duration)?;
            Ok((battery.state_of_charge() - end).0.powi(2))
        };
        let start = minimize_bounded(residual, self.reserve.0..=end.0, STATE_OF_CHARGE_TOLERANCE.0)?;
        Ok(Percent(start).max(self.reserve))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::battery::Battery,
        quantity::power::Kilowatts,
    };

    fn vehicle() -> Vehicle {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts(50.0)).unwrap();
        Vehicle::builder().battery(battery).build().unwrap()
    }

    fn max_speed(vehicle: &Vehicle, distance: f64, break_number: u32, minutes: i64) -> f64 {
        vehicle
            .max_trip_speed()
            .distance(Kilometers(distance))
            .break_number(break_number)
            .break_duration(TimeDelta::minutes(minutes))
            .call()
            .unwrap()
            .0
    }

    /// 67.5 kWh in the battery, plus 12.5 kWh from each break.
    #[test]
    fn test_two_breaks() {
        let vehicle = vehicle();
        let speed = max_speed(&vehicle, 450.0, 2, 15);
        assert_abs_diff_eq!(speed, 122.302, epsilon = 0.01);
        assert_abs_diff_eq!(
            (vehicle.consumption().at(KilometersPerHour(speed)) * Kilometers(450.0)).0,
            92.5,
            epsilon = ENERGY_TOLERANCE.0,
        );
    }

    #[test]
    fn test_no_breaks() {
        assert_abs_diff_eq!(max_speed(&vehicle(), 450.0, 0, 15), 94.783, epsilon = 0.01);
    }

    #[test]
    fn test_monotonic_in_break_number() {
        let vehicle = vehicle();
        let speeds: Vec<f64> = (0..=4).map(|n| max_speed(&vehicle, 450.0, n, 15)).collect();
        assert!(speeds.windows(2).all(|pair| pair[0] < pair[1]), "{speeds:?}");
    }

    #[test]
    fn test_monotonic_in_break_duration() {
        let vehicle = vehicle();
        let speeds: Vec<f64> =
            [5, 10, 15, 20, 30].into_iter().map(|minutes| max_speed(&vehicle, 450.0, 2, minutes)).collect();
        assert!(speeds.windows(2).all(|pair| pair[0] < pair[1]), "{speeds:?}");
    }

    #[test]
    fn test_monotonic_in_distance() {
        let vehicle = vehicle();
        let speeds: Vec<f64> = [300.0, 450.0, 600.0, 800.0]
            .into_iter()
            .map(|distance| max_speed(&vehicle, distance, 2, 15))
            .collect();
        assert!(speeds.windows(2).all(|pair| pair[0] > pair[1]), "{speeds:?}");
    }

    /// The first break starts above the reserve, so that it lands on the end state.
    #[test]
    fn test_end_state_above_reserve() {
        let speed = vehicle()
            .max_trip_speed()
            .distance(Kilometers(450.0))
            .break_number(2)
            .end_state_of_charge(Percent(30.0))
            .call()
            .unwrap();
        assert_abs_diff_eq!(speed.0, 106.779, epsilon = 0.01);
    }

    #[test]
    fn test_first_break_start() {
        let vehicle = vehicle();

        // 15 minutes at 50 kW add 16.7% to 75 kWh:
        let start = vehicle.first_break_start(Percent(30.0), TimeDelta::minutes(15)).unwrap();
        assert_abs_diff_eq!(start.0, 30.0 - 12.5 / 75.0 * 100.0, epsilon = 0.05);

        // Charging from the reserve already overshoots:
        let start = vehicle.first_break_start(Percent(15.0), TimeDelta::minutes(15)).unwrap();
        assert_abs_diff_eq!(start.0, 10.0, epsilon = 0.05);

        // Collapsed search interval:
        let start = vehicle.first_break_start(Percent(10.0), TimeDelta::minutes(15)).unwrap();
        assert_eq!(start, Percent(10.0));
    }

    /// The stops planned at the maximum speed take as long as the breaks in total, when charging
    /// is linear. The greedy planner may use fewer, longer stops.
    #[test]
    fn test_consistent_with_min_break_duration() {
        let vehicle = vehicle();
        let speed = max_speed(&vehicle, 450.0, 2, 15);
        let stops = vehicle
            .min_break_duration()
            .distance(Kilometers(450.0))
            .speed(KilometersPerHour(speed))
            .call()
            .unwrap();
        let total: TimeDelta = stops.into_iter().sum();
        assert_abs_diff_eq!(total.as_seconds_f64(), 1800.0, epsilon = 5.0);
    }

    #[test]
    fn test_canonical_battery_untouched() {
        let vehicle = vehicle();
        max_speed(&vehicle, 450.0, 3, 20);
        assert_eq!(vehicle.battery().state_of_charge(), Percent(80.0));
    }

    #[test]
    fn test_vanishing_distance() {
        let result = vehicle().max_trip_speed().distance(Kilometers(1e-3)).call();
        assert!(matches!(result, Err(Error::NumericalNonConvergence(_))));
    }

    #[test]
    fn test_insufficient_energy() {
        let result = vehicle().max_trip_speed().distance(Kilometers(2000.0)).call();
        assert!(matches!(result, Err(Error::NumericalNonConvergence(_))));
    }

    #[test]
    fn test_invalid_break_duration() {
        let result = vehicle()
            .max_trip_speed()
            .distance(Kilometers(450.0))
            .break_number(1)
            .break_duration(TimeDelta::zero())
            .call();
        assert!(matches!(result, Err(Error::InvalidParameter { name: "break_duration", .. })));
    }

    #[test]
    fn test_invalid_distance() {
        let result = vehicle().max_trip_speed().distance(Kilometers(-1.0)).call();
        assert!(matches!(result, Err(Error::InvalidParameter { name: "distance", .. })));
    }
}

use bon::bon;
use chrono::TimeDelta;

use crate::{
    core::{
        battery::ChargeTarget,
        vehicle::{INTERMEDIATE_STATE_OF_CHARGE, Vehicle},
    },
    error::{Error, Result, ensure_parameter},
    prelude::*,
    quantity::{
        consumption::Consumption,
        distance::Kilometers,
        percent::Percent,
        speed::KilometersPerHour,
    },
};

/// Upper limit on the number of planned stops.
pub const MAX_STOPS: u32 = 10_000;

#[bon]
impl Vehicle {
    /// Find the charging stops needed to drive the distance at the constant speed.
    ///
    /// The policy is greedy: drive down to the reserve, then charge to 80%, or to exactly
    /// what the remaining distance needs, whichever is lower. When the last leg would end
    /// between the reserve and the end state-of-charge, the final stop tops the battery up
    /// to the end state.
    ///
    /// # Returns
    ///
    /// Stop durations in the order they happen, empty if no stop is needed.
    /// The end state-of-charge defaults to the reserve.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] on a non-positive distance or speed,
    ///   or invalid states-of-charge.
    /// - [`Error::InfeasiblePlan`] when the trip cannot make progress.
    #[builder]
    pub fn min_break_duration(
        &self,
        distance: Kilometers,
        speed: KilometersPerHour,
        end_state_of_charge: Option<Percent>,
        #[builder(default = Percent::FULL)] start_state_of_charge: Percent,
    ) -> Result<Vec<TimeDelta>> {
        ensure_parameter!(
            distance.is_finite() && distance > Kilometers::ZERO,
            "distance",
            "must be positive, got {distance:?}"
        );
        ensure_parameter!(
            speed.is_finite() && speed > KilometersPerHour::ZERO,
            "speed",
            "must be positive, got {speed:?}"
        );
        let (start, end) = self.trip_states_of_charge(start_state_of_charge, end_state_of_charge)?;

        let consumption = self.consumption.at(speed);
        if !consumption.is_finite() || consumption <= Consumption::ZERO {
            return Err(Error::infeasible(format!(
                "consumption at {speed:?} is {consumption:?}, no distance can be planned",
            )));
        }

        let mut battery = self.battery.clone().with_state_of_charge(start)?;

        // Every forced stop covers at least the leg between the reserve and 80%:
        let full_leg = (battery.energy_at(INTERMEDIATE_STATE_OF_CHARGE)
            - battery.energy_at(self.reserve))
            / consumption;
        let max_stops = if full_leg > Kilometers::ZERO {
            let n_legs = (distance / full_leg).ceil();
            if n_legs > f64::from(MAX_STOPS) {
                return Err(Error::infeasible(format!(
                    "{distance:?} needs about {n_legs} stops, more than {MAX_STOPS} are not planned",
                )));
            }
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let n_legs = n_legs as usize;
            n_legs.saturating_add(2)
        } else {
            2
        };
        debug!(?distance, ?speed, ?consumption, ?start, ?end, max_stops, "planning stops…");

        let mut remaining = distance;
        let mut stops = Vec::new();

        while stops.len() <= max_stops {
            if remaining <= Kilometers::ZERO {
                return Ok(stops);
            }
            let required = consumption * remaining;

            if required < battery.energy() - battery.energy_at(end) {
                debug!(?remaining, ?required, n_stops = stops.len(), "arriving");
                return Ok(stops);
            }

            if required < battery.energy() - battery.energy_at(self.reserve) {
                // Arriving below the end state but above the reserve, top up to the end state:
                battery.set_state_of_charge(battery.state_of_charge_at(battery.energy() - required))?;
                let duration = battery.charge_to(ChargeTarget::StateOfCharge(end))?;
                debug!(?remaining, ?duration, "arriving below the end state-of-charge");
                stops.push(duration);
                return Ok(stops);
            }

            // Drive down to the reserve:
            let leg = (battery.energy() - battery.energy_at(self.reserve)) / consumption;
            if leg <= Kilometers::ZERO {
                return Err(Error::infeasible(format!(
                    "stuck at the reserve of {:?} with {remaining:?} to go",
                    self.reserve,
                )));
            }
            remaining -= leg;
            battery.set_state_of_charge(self.reserve)?;
            if remaining <= Kilometers::ZERO {
                debug!(?leg, n_stops = stops.len(), "arriving exactly at the reserve");
                return Ok(stops);
            }

            let required = consumption * remaining;
            let target = if required
                > battery.energy_at(INTERMEDIATE_STATE_OF_CHARGE) - battery.energy_at(end)
            {
                INTERMEDIATE_STATE_OF_CHARGE
            } else {
                battery.state_of_charge_at(required + battery.energy_at(end))
            };
            if target <= self.reserve {
                return Err(Error::infeasible(format!(
                    "charging to {target:?} does not lift the battery above the reserve of {:?}",
                    self.reserve,
                )));
            }
            let duration = battery.charge_to(ChargeTarget::StateOfCharge(target))?;
            debug!(?leg, ?remaining, ?target, ?duration, "stop");
            stops.push(duration);
        }

        Err(Error::infeasible(format!("more than {max_stops} stops are needed")))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::{battery::Battery, curve::ConsumptionCurve},
        quantity::{energy::KilowattHours, power::Kilowatts},
    };

    fn vehicle(rate: f64) -> Vehicle {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts(rate)).unwrap();
        Vehicle::builder().battery(battery).build().unwrap()
    }

    fn total(stops: &[TimeDelta]) -> TimeDelta {
        stops.iter().copied().sum()
    }

    #[test]
    fn test_no_stop_needed() {
        let stops = vehicle(50.0)
            .min_break_duration()
            .distance(Kilometers(200.0))
            .speed(KilometersPerHour(120.0))
            .call()
            .unwrap();
        assert!(stops.is_empty());
    }

    /// 450 km at 120 km/h needs 90.1 kWh, 67.5 kWh of which is available.
    /// The remaining 22.6 kWh at 180 kW take about 7.5 minutes.
    #[test]
    fn test_single_stop() {
        let stops = vehicle(180.0)
            .min_break_duration()
            .distance(Kilometers(450.0))
            .speed(KilometersPerHour(120.0))
            .call()
            .unwrap();
        assert_eq!(stops.len(), 1);
        assert_abs_diff_eq!(stops[0].as_seconds_f64() / 60.0, 7.55, epsilon = 0.05);
    }

    #[test]
    fn test_multiple_stops() {
        let stops = vehicle(180.0)
            .min_break_duration()
            .distance(Kilometers(1000.0))
            .speed(KilometersPerHour(130.0))
            .call()
            .unwrap();
        assert_eq!(stops.len(), 3);

        // Two charges from 10% to 80%, 52.5 kWh each at 180 kW:
        assert_abs_diff_eq!(stops[0].as_seconds_f64(), 1050.0, epsilon = 2.0);
        assert_abs_diff_eq!(stops[1].as_seconds_f64(), 1050.0, epsilon = 2.0);
        assert!(stops[2] < stops[1]);
    }

    /// The trip fits between the reserve and the requested end state,
    /// so the single stop tops the battery up to the end state.
    #[test]
    fn test_top_up_to_end_state() {
        let stops = vehicle(50.0)
            .min_break_duration()
            .distance(Kilometers(300.0))
            .speed(KilometersPerHour(110.0))
            .end_state_of_charge(Percent(40.0))
            .call()
            .unwrap();
        assert_eq!(stops.len(), 1);

        // 53.6 kWh are consumed from 75 kWh, landing at 28.5%, 8.6 kWh below the end state:
        let landing = (75.0 - 53.614_32) / 75.0 * 100.0;
        let expected = (40.0 - landing) / 100.0 * 75.0 / 50.0;
        assert_abs_diff_eq!(stops[0].as_seconds_f64() / 3600.0, expected, epsilon = 0.001);
    }

    #[test]
    fn test_canonical_battery_untouched() {
        let vehicle = vehicle(50.0);
        vehicle
            .min_break_duration()
            .distance(Kilometers(1000.0))
            .speed(KilometersPerHour(130.0))
            .call()
            .unwrap();
        assert_eq!(vehicle.battery().state_of_charge(), Percent(80.0));
    }

    #[test]
    fn test_monotonic_in_distance() {
        let vehicle = vehicle(50.0);
        let mut previous: Vec<TimeDelta> = Vec::new();
        for distance in (100..=1500).step_by(50) {
            let stops = vehicle
                .min_break_duration()
                .distance(Kilometers(f64::from(distance)))
                .speed(KilometersPerHour(120.0))
                .call()
                .unwrap();
            assert!(stops.len() >= previous.len(), "{distance} km");
            assert!(total(&stops) >= total(&previous), "{distance} km");
            previous = stops;
        }
    }

    /// The trip takes exactly the energy down to the reserve.
    #[test]
    fn test_exact_budget() {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts(50.0)).unwrap();
        let vehicle = Vehicle::builder()
            .battery(battery)
            .consumption(ConsumptionCurve::closed_form(|_| Consumption(10.0)))
            .build()
            .unwrap();
        let stops = vehicle
            .min_break_duration()
            .distance(Kilometers(675.0))
            .speed(KilometersPerHour(100.0))
            .call()
            .unwrap();
        assert!(stops.is_empty(), "{stops:?}");
    }

    #[test]
    fn test_too_many_stops() {
        let result = vehicle(50.0)
            .min_break_duration()
            .distance(Kilometers(1e300))
            .speed(KilometersPerHour(120.0))
            .call();
        assert!(matches!(result, Err(Error::InfeasiblePlan(_))), "{result:?}");
    }

    #[test]
    fn test_invalid_distance() {
        let result = vehicle(50.0)
            .min_break_duration()
            .distance(Kilometers::ZERO)
            .speed(KilometersPerHour(120.0))
            .call();
        assert!(matches!(result, Err(Error::InvalidParameter { name: "distance", .. })));
    }

    #[test]
    fn test_invalid_speed() {
        let result = vehicle(50.0)
            .min_break_duration()
            .distance(Kilometers(100.0))
            .speed(KilometersPerHour(-1.0))
            .call();
        assert!(matches!(result, Err(Error::InvalidParameter { name: "speed", .. })));
    }

    #[test]
    fn test_non_positive_consumption() {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts(50.0)).unwrap();
        let vehicle = Vehicle::builder()
            .battery(battery)
            .consumption(ConsumptionCurve::closed_form(|_| Consumption::ZERO))
            .build()
            .unwrap();
        let result = vehicle
            .min_break_duration()
            .distance(Kilometers(100.0))
            .speed(KilometersPerHour(100.0))
            .call();
        assert!(matches!(result, Err(Error::InfeasiblePlan(_))));
    }

    /// With the reserve above 80%, forced stops cannot make progress.
    #[test]
    fn test_reserve_above_intermediate_target() {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts(50.0)).unwrap();
        let vehicle = Vehicle::builder().battery(battery).reserve(Percent(85.0)).build().unwrap();
        let result = vehicle
            .min_break_duration()
            .distance(Kilometers(500.0))
            .speed(KilometersPerHour(100.0))
            .call();
        assert!(matches!(result, Err(Error::InfeasiblePlan(_))));
    }

    #[test]
    fn test_stalling_curve() {
        let battery = Battery::try_new(KilowattHours(75.0), Kilowatts::ZERO).unwrap();
        let vehicle = Vehicle::builder().battery(battery).build().unwrap();
        let result = vehicle
            .min_break_duration()
            .distance(Kilometers(500.0))
            .speed(KilometersPerHour(100.0))
            .call();
        assert!(matches!(result, Err(Error::InfeasiblePlan(_))));
    }
}

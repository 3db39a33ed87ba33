use crate::quantity::{energy::KilowattHours, percent::Percent};

/// Where [`super::Battery::charge_to`] stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChargeTarget {
    /// Charge until the state-of-charge is reached.
    StateOfCharge(Percent),

    /// Charge until the energy is delivered.
    Energy(KilowattHours),
}

impl From<Percent> for ChargeTarget {
    fn from(state_of_charge: Percent) -> Self {
        Self::StateOfCharge(state_of_charge)
    }
}

impl From<KilowattHours> for ChargeTarget {
    fn from(energy: KilowattHours) -> Self {
        Self::Energy(energy)
    }
}

quantity!(Percent, suffix: "%", precision: 1);

impl Percent {
    pub const EMPTY: Self = Self(0.0);
    pub const FULL: Self = Self(100.0);

    pub const fn from_proportion(proportion: f64) -> Self {
        Self(proportion * 100.0)
    }

    /// Convert the percentage into `0.0..=1.0`.
    #[must_use]
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }

    /// Whether the percentage is a valid state-of-charge.
    #[must_use]
    pub fn is_state_of_charge(self) -> bool {
        self.is_finite() && (Self::EMPTY..=Self::FULL).contains(&self)
    }
}

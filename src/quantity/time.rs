use chrono::TimeDelta;

quantity!(Hours, suffix: "h", precision: 2);

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / 3600.0)
    }
}

impl Hours {
    /// Convert to a [`TimeDelta`] with millisecond resolution.
    #[must_use]
    pub fn to_time_delta(self) -> TimeDelta {
        #[expect(clippy::cast_possible_truncation)]
        let milliseconds = (self.0 * 3_600_000.0).round() as i64;
        TimeDelta::milliseconds(milliseconds)
    }
}

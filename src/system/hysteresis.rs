//! Two-sample settling checks for the sensor-driven modes
//!
//! Each sensor mode takes two samples a short gap apart and classifies the
//! pair. Temperature and humidity deliberately use different rules: a
//! temperature burst only follows two identical readings, while humidity
//! bursts on its first reading whether or not the pair left the band.
//!
//! Open question: whether humidity should hold still while the pair stays
//! inside the band. Today it only logs the two cases differently.

use crate::config::HUMIDITY_BAND;
use crate::system::error::SensorError;

/// Classification of a pair of readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Trend {
    /// The readings agree; carries the settled value
    Settled(i32),
    /// The readings disagree; carries the first reading
    Drifting(i32),
    /// At least one sample failed
    Unavailable(SensorError),
}

impl Trend {
    /// First usable reading, if any
    pub fn reading(self) -> Option<i32> {
        match self {
            Self::Settled(value) | Self::Drifting(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }
}

/// Temperature settles only on exact equality
pub fn temperature(
    first: Result<i32, SensorError>,
    second: Result<i32, SensorError>,
) -> Trend {
    match (first, second) {
        (Ok(a), Ok(b)) if a == b => Trend::Settled(a),
        (Ok(a), Ok(_)) => Trend::Drifting(a),
        (Err(e), _) | (_, Err(e)) => Trend::Unavailable(e),
    }
}

/// Humidity drifts only once the second reading leaves the band around the first
pub fn humidity(first: Result<i32, SensorError>, second: Result<i32, SensorError>) -> Trend {
    match (first, second) {
        (Ok(a), Ok(b)) if b > a + HUMIDITY_BAND || b < a - HUMIDITY_BAND => Trend::Drifting(a),
        (Ok(a), Ok(_)) => Trend::Settled(a),
        (Err(e), _) | (_, Err(e)) => Trend::Unavailable(e),
    }
}

/// Burst length for a temperature trend: `0..=T` steps once settled, none otherwise
pub fn temperature_burst(trend: Trend) -> u32 {
    match trend {
        Trend::Settled(value) => u32::try_from(value).map_or(0, |v| v + 1),
        _ => 0,
    }
}

/// Burst length for a humidity trend: the first reading, settled or drifting
pub fn humidity_burst(trend: Trend) -> u32 {
    trend
        .reading()
        .map_or(0, |value| u32::try_from(value).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_settles_only_when_equal() {
        assert_eq!(temperature(Ok(22), Ok(22)), Trend::Settled(22));
        assert_eq!(temperature(Ok(22), Ok(23)), Trend::Drifting(22));
        assert_eq!(temperature(Ok(23), Ok(22)), Trend::Drifting(23));
    }

    #[test]
    fn temperature_burst_is_inclusive() {
        assert_eq!(temperature_burst(Trend::Settled(22)), 23);
        assert_eq!(temperature_burst(Trend::Settled(0)), 1);
        assert_eq!(temperature_burst(Trend::Settled(-5)), 0);
        assert_eq!(temperature_burst(Trend::Drifting(22)), 0);
    }

    #[test]
    fn humidity_band_is_two_units_each_way() {
        assert_eq!(humidity(Ok(40), Ok(42)), Trend::Settled(40));
        assert_eq!(humidity(Ok(40), Ok(38)), Trend::Settled(40));
        assert_eq!(humidity(Ok(40), Ok(43)), Trend::Drifting(40));
        assert_eq!(humidity(Ok(40), Ok(37)), Trend::Drifting(40));
    }

    #[test]
    fn humidity_bursts_on_first_reading_either_way() {
        assert_eq!(humidity_burst(humidity(Ok(40), Ok(45))), 40);
        assert_eq!(humidity_burst(humidity(Ok(40), Ok(41))), 40);
    }

    #[test]
    fn failed_sample_never_moves() {
        let trend = temperature(Err(SensorError::Bus), Ok(0));
        assert_eq!(trend, Trend::Unavailable(SensorError::Bus));
        assert_eq!(temperature_burst(trend), 0);

        let trend = humidity(Ok(0), Err(SensorError::NotReady));
        assert_eq!(trend, Trend::Unavailable(SensorError::NotReady));
        assert_eq!(humidity_burst(trend), 0);
    }
}

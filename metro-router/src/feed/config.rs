//! Ingestion configuration.

use chrono::Duration;

use crate::domain::LineId;

use super::time::minutes_to_duration;

/// How the travel time of a feed edge is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelTime {
    /// Every hop takes [`IngestConfig::hop_time_mins`], whatever the
    /// timetable says.
    ///
    /// This is the long-standing behaviour and stays the default, but it
    /// means travel times ignore the schedule entirely.
    #[default]
    Constant,

    /// Use the gap between the departure from one stop and the arrival at
    /// the next, falling back to the constant when the timestamps are
    /// unusable.
    Timetable,
}

/// Configuration parameters for feed ingestion and fallback synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestConfig {
    /// How edge travel times are computed.
    pub travel_time: TravelTime,

    /// Travel time between consecutive stops (minutes).
    pub hop_time_mins: f64,

    /// Assumed average speed for synthesized edges (km per minute).
    /// 0.67 km/min is roughly 40 km/h.
    pub fallback_speed_km_per_min: f64,

    /// Minimum travel time of a synthesized sequential edge (minutes).
    pub fallback_min_hop_mins: f64,

    /// Index of the last consecutive station pair that gets a synthesized
    /// edge. Pairs are counted from zero.
    pub fallback_last_pair: usize,

    /// Number of consecutive pairs assigned to each synthesized line.
    pub fallback_line_span: usize,

    /// Distance in station positions between cross-connection origins.
    pub cross_stride: usize,

    /// How many positions ahead a cross connection reaches.
    pub cross_offset: usize,

    /// Line used for cross connections.
    pub cross_line: LineId,

    /// Minimum travel time of a cross connection (minutes).
    pub cross_min_hop_mins: f64,
}

impl IngestConfig {
    /// Create a configuration that uses timetable-derived travel times and
    /// default values for everything else.
    pub fn timetable() -> Self {
        Self {
            travel_time: TravelTime::Timetable,
            ..Self::default()
        }
    }

    /// Returns the constant hop time as a Duration.
    pub fn hop_time(&self) -> Duration {
        minutes_to_duration(self.hop_time_mins)
    }

    /// Synthesized travel time for a distance, never below `floor_mins`.
    pub fn fallback_time_mins(&self, distance_km: f64, floor_mins: f64) -> f64 {
        floor_mins.max(distance_km / self.fallback_speed_km_per_min)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            travel_time: TravelTime::Constant,
            hop_time_mins: 3.0,
            fallback_speed_km_per_min: 0.67,
            fallback_min_hop_mins: 3.0,
            fallback_last_pair: 200,
            fallback_line_span: 10,
            cross_stride: 10,
            cross_offset: 30,
            cross_line: LineId(3),
            cross_min_hop_mins: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = IngestConfig::default();

        assert_eq!(config.travel_time, TravelTime::Constant);
        assert_eq!(config.hop_time_mins, 3.0);
        assert_eq!(config.fallback_speed_km_per_min, 0.67);
        assert_eq!(config.fallback_min_hop_mins, 3.0);
        assert_eq!(config.fallback_last_pair, 200);
        assert_eq!(config.fallback_line_span, 10);
        assert_eq!(config.cross_stride, 10);
        assert_eq!(config.cross_offset, 30);
        assert_eq!(config.cross_line, LineId(3));
        assert_eq!(config.cross_min_hop_mins, 4.0);
        assert_eq!(config.hop_time(), Duration::minutes(3));
    }

    #[test]
    fn timetable_config_keeps_other_defaults() {
        let config = IngestConfig::timetable();

        assert_eq!(config.travel_time, TravelTime::Timetable);
        assert_eq!(config.hop_time_mins, 3.0);
        assert_eq!(config.cross_offset, 30);
    }

    #[test]
    fn fallback_time_has_floor() {
        let config = IngestConfig::default();

        // Short hops take the floor
        assert_eq!(config.fallback_time_mins(0.5, 3.0), 3.0);
        assert_eq!(config.fallback_time_mins(0.5, 4.0), 4.0);

        // Long hops use the assumed speed
        let t = config.fallback_time_mins(6.7, 3.0);
        assert!((t - 10.0).abs() < 1e-9);
    }
}

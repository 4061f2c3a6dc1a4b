//! Station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::haversine_km;

/// Numeric station identifier as it appears in the feed's `stops` table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StationId(pub i32);

impl From<i32> for StationId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Short station code, e.g. "RCK".
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    /// Create a new station.
    pub fn new(
        id: impl Into<StationId>,
        code: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another station in kilometres.
    pub fn distance_km(&self, other: &Station) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

//! Domain types for the metro network.
//!
//! Stations, lines and edges are plain values owned by the
//! [`GraphStore`](crate::graph::GraphStore). A [`Path`] is the annotated
//! result of a route query.

mod edge;
mod geo;
mod line;
mod path;
mod station;

pub use edge::Edge;
pub use geo::{EARTH_RADIUS_KM, haversine_km};
pub use line::{Line, LineId, color_token};
pub use path::Path;
pub use station::{Station, StationId};

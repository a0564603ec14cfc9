//! Domain types for the station locator.
//!
//! All types enforce their invariants at construction time, so code that
//! receives a `Coordinate` can compute distances without re-checking ranges.

mod coordinate;
mod distance;
mod station;

pub use coordinate::{Coordinate, Datum, InvalidCoordinate};
pub use distance::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use station::{Station, StationId, UNKNOWN_PHONE};

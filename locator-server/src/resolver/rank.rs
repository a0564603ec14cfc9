//! Distance ranking and top-K selection.

use std::num::NonZeroUsize;

use crate::catalog::Catalog;
use crate::domain::{Coordinate, InvalidCoordinate, Station, StationId, haversine_km};

/// How many ranked stations to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The whole catalog, nearest first.
    All,
    /// At most K stations. K may exceed the catalog size.
    Nearest(NonZeroUsize),
}

impl Selection {
    /// Top-K selection; `None` when `k` is zero.
    pub fn top(k: usize) -> Option<Self> {
        NonZeroUsize::new(k).map(Selection::Nearest)
    }

    /// Number of results this selection yields from `available` candidates.
    pub fn limit(&self, available: usize) -> usize {
        match self {
            Selection::All => available,
            Selection::Nearest(k) => available.min(k.get()),
        }
    }
}

/// A station annotated with its distance from one particular query point.
///
/// Only meaningful for the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation<'a> {
    pub id: StationId,
    pub station: &'a Station,
    pub distance_km: f64,
}

impl RankedStation<'_> {
    /// Distance formatted for display, e.g. `2.34 km`.
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }
}

/// Rank the catalog by distance from `query`.
///
/// Results are ascending by distance. Stations at equal distance keep their
/// catalog order, so repeated calls with the same inputs produce identical
/// output.
pub fn rank(query: Coordinate, catalog: &Catalog, selection: Selection) -> Vec<RankedStation<'_>> {
    let mut ranked: Vec<RankedStation<'_>> = catalog
        .iter()
        .map(|(id, station)| RankedStation {
            id,
            station,
            distance_km: haversine_km(query, station.location),
        })
        .collect();

    // sort_by is stable; ties stay in catalog order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(selection.limit(ranked.len()));

    ranked
}

/// Validate a raw query point, then rank the catalog against it.
pub fn resolve_nearest(
    latitude: f64,
    longitude: f64,
    catalog: &Catalog,
    selection: Selection,
) -> Result<Vec<RankedStation<'_>>, InvalidCoordinate> {
    let query = Coordinate::new(latitude, longitude)?;
    Ok(rank(query, catalog, selection))
}

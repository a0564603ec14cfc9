//! Great-circle distance.
//!
//! Uses the haversine formula on a spherical Earth of mean radius
//! 6371 km. Pure and allocation-free; safe to call from any thread.

use super::coordinate::{Coordinate, InvalidCoordinate};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two validated points, in kilometres.
///
/// # Examples
///
/// ```
/// use station_locator::domain::{Coordinate, haversine_km};
///
/// let a = Coordinate::new(30.0, 114.0).unwrap();
/// assert_eq!(haversine_km(a, a), 0.0);
///
/// let b = Coordinate::new(30.1, 114.1).unwrap();
/// assert!((haversine_km(a, b) - 14.7065).abs() < 1e-3);
/// ```
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let d_lat = (to.latitude() - from.latitude()).to_radians();
    let d_lon = (to.longitude() - from.longitude()).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;

    // Rounding can push `a` fractionally past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two raw decimal-degree pairs.
///
/// Fails with [`InvalidCoordinate`] if either point is out of range.
pub fn distance_km(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
) -> Result<f64, InvalidCoordinate> {
    let from = Coordinate::new(lat1, lon1)?;
    let to = Coordinate::new(lat2, lon2)?;
    Ok(haversine_km(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let p = coord(30.6315, 114.2358);
        assert!(haversine_km(p, p) < 1e-9);
    }

    #[test]
    fn london_to_paris() {
        let london = coord(51.5074, -0.1278);
        let paris = coord(48.8566, 2.3522);
        assert!((haversine_km(london, paris) - 343.556).abs() < 0.01);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 111.1949).abs() < 1e-3);
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((haversine_km(coord(0.0, 0.0), coord(0.0, 180.0)) - half).abs() < 1e-6);
        assert!((haversine_km(coord(90.0, 0.0), coord(-90.0, 0.0)) - half).abs() < 1e-6);
    }

    #[test]
    fn crosses_antimeridian() {
        // 179.5E to 179.5W is one degree of longitude, not 359.
        let d = haversine_km(coord(0.0, 179.5), coord(0.0, -179.5));
        assert!((d - 111.1949).abs() < 1e-3);
    }

    #[test]
    fn raw_distance_validates() {
        assert!(distance_km(30.0, 114.0, 30.5, 114.5).is_ok());

        let err = distance_km(95.0, 114.0, 30.0, 114.0).unwrap_err();
        assert_eq!(err.latitude, 95.0);

        assert!(distance_km(30.0, 114.0, 30.0, 200.0).is_err());
    }

    #[test]
    fn raw_distance_matches_validated() {
        let raw = distance_km(30.0, 114.0, 30.5, 114.5).unwrap();
        let typed = haversine_km(coord(30.0, 114.0), coord(30.5, 114.5));
        assert_eq!(raw, typed);
        assert!((raw - 73.4687).abs() < 1e-3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for any in-range coordinate.
    fn any_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        /// distance(A, B) == distance(B, A)
        #[test]
        fn symmetric(a in any_coordinate(), b in any_coordinate()) {
            prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }

        /// distance(A, A) == 0
        #[test]
        fn self_distance_is_zero(a in any_coordinate()) {
            prop_assert!(haversine_km(a, a) < 1e-9);
        }

        /// Never negative, never more than half the circumference.
        #[test]
        fn bounded(a in any_coordinate(), b in any_coordinate()) {
            let d = haversine_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        /// Out-of-range latitudes are always rejected.
        #[test]
        fn invalid_latitude_rejected(lat in 90.0001f64..1000.0, lon in -180.0f64..=180.0) {
            prop_assert!(distance_km(lat, lon, 0.0, 0.0).is_err());
            prop_assert!(distance_km(-lat, lon, 0.0, 0.0).is_err());
        }
    }
}

//! Service station types.

use std::fmt;

use super::coordinate::Coordinate;

/// Phone value used by the source data when no number is on record.
pub const UNKNOWN_PHONE: &str = "unknown";

/// Position of a station in its catalog.
///
/// Station names are not unique (the source data contains placeholder and
/// duplicated names), so identity is the catalog index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub usize);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One physical service point.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Display name; non-empty but not unique.
    pub name: String,

    /// Free-text street address.
    pub address: String,

    /// Free-text contact. May be the [`UNKNOWN_PHONE`] sentinel.
    pub phone_number: String,

    /// Location in the catalog's datum.
    pub location: Coordinate,
}

impl Station {
    /// Whether a real phone number is on record.
    pub fn has_phone_number(&self) -> bool {
        let phone = self.phone_number.trim();
        !phone.is_empty() && !phone.eq_ignore_ascii_case(UNKNOWN_PHONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(phone: &str) -> Station {
        Station {
            name: "美团外卖(常青花园站)".to_string(),
            address: "湖北省武汉市东西湖区常青花园中路11-1号".to_string(),
            phone_number: phone.to_string(),
            location: Coordinate::new(30.6315, 114.2358).unwrap(),
        }
    }

    #[test]
    fn phone_sentinel_is_not_a_number() {
        assert!(station("18812345678").has_phone_number());
        assert!(!station("unknown").has_phone_number());
        assert!(!station("Unknown").has_phone_number());
        assert!(!station("  ").has_phone_number());
    }

    #[test]
    fn station_id_display() {
        assert_eq!(StationId(4).to_string(), "4");
        assert_eq!(format!("{:?}", StationId(4)), "StationId(4)");
    }

    #[test]
    fn station_id_orders_by_index() {
        assert!(StationId(2) < StationId(5));
    }
}

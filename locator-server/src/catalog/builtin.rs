//! Built-in Wuhan catalog.
//!
//! Used when no catalog file is configured. Coordinates are GCJ-02, as
//! published by domestic map providers.

use super::{Catalog, StationRecord};
use crate::domain::Datum;

/// (name, address, phone, latitude, longitude)
const WUHAN_STATIONS: &[(&str, &str, &str, f64, f64)] = &[
    (
        "美团外卖(常青花园站)",
        "湖北省武汉市东西湖区常青花园中路11-1号",
        "18812345678",
        30.6315,
        114.2358,
    ),
    (
        "美团买菜(金银潭站)",
        "湖北省武汉市东西湖区金银潭大道1号",
        "18823456789",
        30.6420,
        114.2490,
    ),
    (
        "美团优选(将军路站)",
        "湖北省武汉市东西湖区将军路25号",
        "18834567890",
        30.6250,
        114.2280,
    ),
    (
        "美团站点(三民小区服务点)",
        "湖北省武汉市江汉区三民路12号",
        "18845678901",
        30.6198,
        114.2555,
    ),
    (
        "美团配送(汉口火车站)",
        "湖北省武汉市江汉区发展大道185号",
        "18856789012",
        30.6080,
        114.2650,
    ),
    (
        "美团买菜(万科高尔夫店)",
        "湖北省武汉市东西湖区金银潭大道96号",
        "18867890123",
        30.6455,
        114.2178,
    ),
];

impl Catalog {
    /// The default catalog shipped with the server.
    pub fn builtin() -> Self {
        let records = WUHAN_STATIONS
            .iter()
            .map(|&(name, address, phone, latitude, longitude)| StationRecord {
                name: name.to_string(),
                address: address.to_string(),
                phone_number: phone.to_string(),
                latitude,
                longitude,
            });

        // Constant table, checked by builtin_is_valid_and_complete
        Catalog::from_records(Datum::Gcj02, records).expect("built-in catalog is valid")
    }
}

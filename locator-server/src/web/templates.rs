//! Askama templates for the web frontend.

use askama::Template;

use crate::resolver::RankedStation;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the address search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub default_k: usize,
    pub station_count: usize,
    pub address_search_enabled: bool,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Ranked station list fragment.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    /// What the user searched for (address or coordinates)
    pub query: String,

    /// Resolved location, for display
    pub location: String,

    pub stations: Vec<StationView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Station view model for templates.
#[derive(Debug, Clone)]
pub struct StationView {
    /// 1-based position in the result list
    pub rank: usize,
    pub id: usize,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub has_phone: bool,
    pub distance_label: String,
}

impl StationView {
    /// Create from a ranked station at 0-based position `index`.
    pub fn from_ranked(index: usize, ranked: &RankedStation<'_>) -> Self {
        Self {
            rank: index + 1,
            id: ranked.id.0,
            name: ranked.station.name.clone(),
            address: ranked.station.address.clone(),
            phone_number: ranked.station.phone_number.clone(),
            has_phone: ranked.station.has_phone_number(),
            distance_label: ranked.distance_label(),
        }
    }

    /// `tel:` link target with spaces and dashes stripped.
    pub fn tel_href(&self) -> String {
        let digits: String = self
            .phone_number
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

impl StationListTemplate {
    /// Build the fragment for one set of results.
    pub fn new(query: String, location: String, ranked: &[RankedStation<'_>]) -> Self {
        Self {
            query,
            location,
            stations: ranked
                .iter()
                .enumerate()
                .map(|(i, r)| StationView::from_ranked(i, r))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::{Selection, resolve_nearest};

    #[test]
    fn views_are_numbered_from_one() {
        let catalog = Catalog::builtin();
        let ranked = resolve_nearest(30.608, 114.265, &catalog, Selection::top(3).unwrap())
            .unwrap();
        let template = StationListTemplate::new("q".into(), "l".into(), &ranked);

        let ranks: Vec<_> = template.stations.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(template.stations[0].name, "美团配送(汉口火车站)");
        assert!(template.stations[0].has_phone);
    }

    #[test]
    fn tel_href_strips_formatting() {
        let view = StationView {
            rank: 1,
            id: 0,
            name: "x".into(),
            address: "y".into(),
            phone_number: "+86 188-1234-5678".into(),
            has_phone: true,
            distance_label: "0.00 km".into(),
        };
        assert_eq!(view.tel_href(), "tel:+8618812345678");
    }

    #[test]
    fn station_list_renders_and_escapes() {
        let catalog = Catalog::builtin();
        let ranked = resolve_nearest(30.608, 114.265, &catalog, Selection::top(2).unwrap())
            .unwrap();
        let template =
            StationListTemplate::new("<script>".into(), "30.608000, 114.265000".into(), &ranked);

        let html = template.render().unwrap();
        assert!(html.contains("美团配送(汉口火车站)"));
        assert!(html.contains("0.00 km"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_station_list_renders_message() {
        let template = StationListTemplate::new("q".into(), "l".into(), &[]);
        let html = template.render().unwrap();
        assert!(html.contains("No stations"));
    }

    #[test]
    fn index_renders() {
        let html = IndexTemplate {
            default_k: 3,
            station_count: 6,
            address_search_enabled: false,
        }
        .render()
        .unwrap();
        assert!(html.contains("<form"));
        assert!(html.contains("Address search is not configured"));
    }
}

//! Distance filtering over the site table.
//!
//! Coordinates are planar projected values in metres, so plain Euclidean
//! distance is correct here. No ranking is involved; inclusion is a
//! threshold predicate.

use crate::model::SiteRecord;

/// Euclidean distance between two planar points, in coordinate units.
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Returns the sites within `distance_m` metres of (x, y).
///
/// The threshold is inclusive: a site exactly `distance_m` away is
/// returned. `distance_m = 0.0` therefore selects exact-coordinate matches
/// only. Input order is preserved.
pub fn find_sites_by_distance(
    table: &[SiteRecord],
    x: f64,
    y: f64,
    distance_m: f64,
) -> Vec<SiteRecord> {
    table
        .iter()
        .filter(|site| euclidean_distance(x, y, site.x_coordinate, site.y_coordinate) <= distance_m)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: &str, x: f64, y: f64) -> SiteRecord {
        SiteRecord {
            site_id: id.to_string(),
            site_name: format!("Site {}", id),
            x_coordinate: x,
            y_coordinate: y,
            environment_type: "Urban Background".to_string(),
            address: None,
            web_link: String::new(),
        }
    }

    fn ids(records: &[SiteRecord]) -> Vec<&str> {
        records.iter().map(|r| r.site_id.as_str()).collect()
    }

    #[test]
    fn test_sites_within_radius_are_selected() {
        // Site 2 sits at distance exactly 5 (3-4-5 triangle) and must be
        // included by the inclusive threshold; site 3 is far outside.
        let table = vec![site("1", 0.0, 0.0), site("2", 3.0, 4.0), site("3", 100.0, 100.0)];
        let nearby = find_sites_by_distance(&table, 0.0, 0.0, 5.0);
        assert_eq!(ids(&nearby), vec!["1", "2"]);
    }

    #[test]
    fn test_zero_radius_selects_exact_matches_only() {
        let table = vec![site("1", 10.0, 20.0), site("2", 10.0, 20.1)];
        let exact = find_sites_by_distance(&table, 10.0, 20.0, 0.0);
        assert_eq!(ids(&exact), vec!["1"]);
    }

    #[test]
    fn test_zero_radius_with_no_match_is_empty() {
        let table = vec![site("1", 1.0, 1.0)];
        assert!(find_sites_by_distance(&table, 0.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_increasing_radius_never_removes_sites() {
        let table = vec![
            site("1", 0.0, 0.0),
            site("2", 3.0, 4.0),
            site("3", 30.0, 40.0),
            site("4", 300.0, 400.0),
        ];
        let mut previous = Vec::new();
        for radius in [0.0, 5.0, 50.0, 500.0, 5000.0] {
            let selected = find_sites_by_distance(&table, 0.0, 0.0, radius);
            for kept in &previous {
                assert!(
                    selected.contains(kept),
                    "radius {} dropped a site selected at a smaller radius",
                    radius
                );
            }
            previous = selected;
        }
    }

    #[test]
    fn test_empty_table_yields_empty_subset() {
        assert!(find_sites_by_distance(&[], 0.0, 0.0, 1000.0).is_empty());
    }

    #[test]
    fn test_euclidean_distance_is_symmetric() {
        let d1 = euclidean_distance(394366.0, 807397.0, 436276.0, 389930.0);
        let d2 = euclidean_distance(436276.0, 389930.0, 394366.0, 807397.0);
        assert_eq!(d1, d2);
        assert!(d1 > 0.0);
    }
}

//! Facility (point of interest) model

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Name placed by upstream sources when a point has no name tag
pub const UNKNOWN_NAME: &str = "Unknown";

/// A located point of interest as returned by a POI search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Display name, if the source had one
    pub name: Option<String>,
    pub coordinate: Coordinate,
    /// Category tag value, e.g. "hospital" or "clinic"
    pub category: Option<String>,
}

impl Facility {
    #[must_use]
    pub fn new(name: Option<String>, coordinate: Coordinate, category: Option<String>) -> Self {
        Self {
            name,
            coordinate,
            category,
        }
    }

    /// The name to show the user, or `None` when the facility is anonymous
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != UNKNOWN_NAME)
    }
}

/// A facility with its distance from the search center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFacility {
    pub name: String,
    pub coordinate: Coordinate,
    pub category: Option<String>,
    /// Great-circle distance in kilometers, two decimals
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn facility(name: Option<&str>) -> Facility {
        Facility::new(
            name.map(str::to_string),
            Coordinate::new(0.0, 0.0).unwrap(),
            Some("hospital".to_string()),
        )
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("Unknown"))]
    fn test_anonymous_facilities(#[case] name: Option<&str>) {
        assert_eq!(facility(name).display_name(), None);
    }

    #[test]
    fn test_named_facility() {
        let f = facility(Some(" Kenyatta National Hospital "));
        assert_eq!(f.display_name(), Some("Kenyatta National Hospital"));
    }
}

//! Read-only dataset context: every normalized record in dataset order plus
//! an exact name map. Built once, then borrowed by every query.

use fnv::FnvHashMap;

use crate::error::{CorridorError, Endpoint, Result};
use crate::geo::Coordinate;
use crate::record::PlaceRecord;

/// Trimmed, lower-cased form used for both exact keys and substring queries.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Default)]
pub struct PlaceIndex {
    records: Vec<PlaceRecord>,
    by_name: FnvHashMap<String, Coordinate>,
}

impl PlaceIndex {
    pub fn build(records: Vec<PlaceRecord>) -> Self {
        let mut by_name: FnvHashMap<String, Coordinate> = FnvHashMap::default();
        for record in &records {
            let key = normalize_key(record.name());
            if key.is_empty() {
                continue;
            }
            // Repeated names: the last row wins.
            by_name.insert(key, record.coordinate());
        }
        log::debug!(
            "Indexed {} records under {} distinct names",
            records.len(),
            by_name.len()
        );
        Self { records, by_name }
    }

    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact, case-insensitive name lookup.
    ///
    /// This is only a shortcut for keys that are already canonical names.
    /// With duplicate names it returns the *last* row while
    /// [`PlaceIndex::substring_search`] returns the first, so callers that
    /// resolve user input should go through substring search.
    pub fn exact_lookup(&self, key: &str) -> Result<Coordinate> {
        self.by_name
            .get(&normalize_key(key))
            .copied()
            .ok_or_else(|| CorridorError::PlaceNotFound {
                query: key.to_string(),
            })
    }

    /// First record, in dataset order, whose name contains `query`; failing
    /// that, the first whose address does. Case-insensitive.
    pub fn substring_match(&self, query: &str) -> Result<&PlaceRecord> {
        let needle = normalize_key(query);
        let not_found = || CorridorError::PlaceNotFound {
            query: query.to_string(),
        };
        // An empty needle would match every row.
        if needle.is_empty() {
            return Err(not_found());
        }

        self.records
            .iter()
            .find(|r| r.name().to_lowercase().contains(&needle))
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| r.address().to_lowercase().contains(&needle))
            })
            .ok_or_else(not_found)
    }

    pub fn substring_search(&self, query: &str) -> Result<Coordinate> {
        self.substring_match(query).map(PlaceRecord::coordinate)
    }

    /// Resolves both ends of a trip. The coordinates found by substring
    /// search are used as-is.
    pub fn resolve_route(&self, start: &str, end: &str) -> Result<(Coordinate, Coordinate)> {
        let start = self.resolve_endpoint(Endpoint::Start, start)?;
        let end = self.resolve_endpoint(Endpoint::Destination, end)?;
        Ok((start, end))
    }

    fn resolve_endpoint(&self, endpoint: Endpoint, query: &str) -> Result<Coordinate> {
        match self.substring_match(query) {
            Ok(record) => {
                log::debug!(
                    "{} {:?} resolved to row {} ({})",
                    endpoint,
                    query,
                    record.row(),
                    record.display_name()
                );
                Ok(record.coordinate())
            }
            Err(_) => Err(CorridorError::RouteEndpointNotFound {
                endpoint,
                query: query.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PlaceIndex {
        PlaceIndex::build(vec![
            PlaceRecord::new("Hotel Dasaprakash", "Gandhi Square, Mysuru", 12.3096, 76.6533)
                .unwrap(),
            PlaceRecord::new("Bangalore Palace", "Vasanth Nagar, Bengaluru", 12.9987, 77.5921)
                .unwrap(),
            PlaceRecord::new("", "Srirangapatna, Mandya District", 12.4216, 76.6934).unwrap(),
            PlaceRecord::new("Mysuru Palace", "Sayyaji Rao Rd, Mysuru", 12.3052, 76.6552)
                .unwrap(),
            PlaceRecord::new("Chamundi Hills", "Mysuru", 12.2724, 76.6730).unwrap(),
            PlaceRecord::new("Mysuru Palace", "Duplicate entry", 12.0, 76.0).unwrap(),
        ])
    }

    #[test]
    fn substring_finds_partial_name() {
        let coord = index().substring_search("mysuru").unwrap();
        assert_eq!(coord, Coordinate::new(12.3052, 76.6552));
    }

    #[test]
    fn substring_is_case_insensitive_and_trimmed() {
        let coord = index().substring_search("  BANGALORE ").unwrap();
        assert_eq!(coord, Coordinate::new(12.9987, 77.5921));
    }

    #[test]
    fn name_matches_beat_earlier_address_matches() {
        // The hotel comes first and has "Mysuru" in its address.
        let idx = index();
        assert_eq!(idx.substring_match("mysuru").unwrap().name(), "Mysuru Palace");
        assert_eq!(idx.substring_match("palace").unwrap().name(), "Bangalore Palace");
    }

    #[test]
    fn falls_back_to_address() {
        let idx = index();
        let record = idx.substring_match("srirangapatna").unwrap();
        assert_eq!(record.name(), "");
        assert_eq!(record.coordinate(), Coordinate::new(12.4216, 76.6934));
        let record = idx.substring_match("bengaluru").unwrap();
        assert_eq!(record.name(), "Bangalore Palace");
    }

    #[test]
    fn substring_miss_and_empty_query() {
        let idx = index();
        assert_eq!(
            idx.substring_search("hampi"),
            Err(CorridorError::PlaceNotFound {
                query: "hampi".to_string()
            })
        );
        assert!(idx.substring_search("   ").is_err());
    }

    #[test]
    fn exact_lookup_keeps_last_duplicate() {
        let idx = index();
        assert_eq!(
            idx.exact_lookup(" mysuru PALACE ").unwrap(),
            Coordinate::new(12.0, 76.0)
        );
        // Substring search still sees the first row.
        assert_eq!(
            idx.substring_search("mysuru palace").unwrap(),
            Coordinate::new(12.3052, 76.6552)
        );
    }

    #[test]
    fn unnamed_rows_are_not_exact_keys() {
        let idx = index();
        assert!(idx.exact_lookup("").is_err());
        assert!(idx.exact_lookup("srirangapatna").is_err());
        assert!(idx.exact_lookup("mysuru").is_err());
        assert_eq!(idx.len(), 6);
    }

    #[test]
    fn resolve_route_uses_substring_results() {
        // "srirangapatna" only appears in an address; no exact key exists.
        let (start, end) = index().resolve_route("bangalore", "srirangapatna").unwrap();
        assert_eq!(start, Coordinate::new(12.9987, 77.5921));
        assert_eq!(end, Coordinate::new(12.4216, 76.6934));
    }

    #[test]
    fn resolve_route_names_missing_endpoint() {
        let idx = index();
        assert_eq!(
            idx.resolve_route("hampi", "mysuru"),
            Err(CorridorError::RouteEndpointNotFound {
                endpoint: Endpoint::Start,
                query: "hampi".to_string()
            })
        );
        let err = idx.resolve_route("mysuru", "goa").unwrap_err();
        assert_eq!(
            err,
            CorridorError::RouteEndpointNotFound {
                endpoint: Endpoint::Destination,
                query: "goa".to_string()
            }
        );
        assert!(err.to_string().starts_with("destination not found"));
    }
}

use csv::Writer;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt;
use std::io;

use crate::classify::{ClassificationResult, Tag};

/// Rounds to two decimals for display.
pub fn round2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub distance_km: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Distances are to the destination.
    pub near_destination: Vec<ReportEntry>,
    /// Distances are to the midpoint of the route.
    pub on_route: Vec<ReportEntry>,
    pub skipped_records: usize,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    list: &'a str,
    name: &'a str,
    distance_km: String,
}

impl Report {
    /// Lists keep dataset order unless `sort_by_distance` is set; the sort is
    /// stable, so ties stay in dataset order.
    pub fn build(
        results: &[ClassificationResult],
        skipped_records: usize,
        sort_by_distance: bool,
    ) -> Self {
        let entry = |r: &ClassificationResult, km: f64| ReportEntry {
            name: r.record.display_name().to_string(),
            distance_km: round2(km),
        };
        let mut near_destination: Vec<ReportEntry> = results
            .iter()
            .filter(|r| r.has(Tag::NearDestination))
            .map(|r| entry(r, r.distance_km))
            .collect();
        let mut on_route: Vec<ReportEntry> = results
            .iter()
            .filter(|r| r.has(Tag::OnRoute))
            .map(|r| entry(r, r.distance_from_midpoint_km))
            .collect();

        if sort_by_distance {
            near_destination.sort_by_key(|e| OrderedFloat(e.distance_km));
            on_route.sort_by_key(|e| OrderedFloat(e.distance_km));
        }

        Self {
            near_destination,
            on_route,
            skipped_records,
        }
    }

    pub fn write_csv<W: io::Write>(&self, wtr: W) -> csv::Result<()> {
        let mut wtr = Writer::from_writer(wtr);
        let lists = [
            ("near_destination", &self.near_destination),
            ("on_route", &self.on_route),
        ];
        for (list, entries) in lists {
            for e in entries {
                wtr.serialize(CsvRow {
                    list,
                    name: &e.name,
                    distance_km: format!("{:.2}", e.distance_km),
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Places near your destination:")?;
        if self.near_destination.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for e in &self.near_destination {
            writeln!(f, "  - {} ({:.2} km from destination)", e.name, e.distance_km)?;
        }
        writeln!(f)?;
        writeln!(f, "Places along the route:")?;
        if self.on_route.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for e in &self.on_route {
            writeln!(f, "  - {} ({:.2} km from midpoint of route)", e.name, e.distance_km)?;
        }
        if self.skipped_records > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "Skipped {} rows whose coordinates could not be parsed.",
                self.skipped_records
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, ClassifierConfig};
    use crate::geo::Coordinate;
    use crate::record::PlaceRecord;

    const BENGALURU: Coordinate = Coordinate { lat: 12.9716, lon: 77.5946 };
    const MYSURU: Coordinate = Coordinate { lat: 12.2958, lon: 76.6394 };

    fn results() -> Vec<ClassificationResult> {
        let places = vec![
            PlaceRecord::new("Chamundi Hills", "", 12.2724, 76.6730).unwrap(),
            PlaceRecord::new("Mandya", "", 12.5218, 76.8951).unwrap(),
            PlaceRecord::new("", "Mysuru", 12.2958, 76.6394).unwrap(),
            PlaceRecord::new("Mysuru Palace", "", 12.3052, 76.6552).unwrap(),
            PlaceRecord::new("Hampi", "", 15.3350, 76.4600).unwrap(),
        ];
        classify(BENGALURU, MYSURU, &places, &ClassifierConfig::default())
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(2.009738), 2.01);
        assert_eq!(round2(37.454), 37.45);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn lists_keep_dataset_order() {
        let report = Report::build(&results(), 1, false);
        let near: Vec<&str> = report.near_destination.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(near, ["Chamundi Hills", "(unnamed)", "Mysuru Palace"]);
        let route: Vec<&str> = report.on_route.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(route, ["Chamundi Hills", "Mandya", "Mysuru Palace"]);
        assert_eq!(report.near_destination[0].distance_km, 4.48);
        assert_eq!(report.on_route[1].distance_km, 27.11);
    }

    #[test]
    fn sorted_lists_are_ascending() {
        let report = Report::build(&results(), 0, true);
        let near: Vec<&str> = report.near_destination.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(near, ["(unnamed)", "Mysuru Palace", "Chamundi Hills"]);
        let route: Vec<&str> = report.on_route.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(route, ["Mandya", "Mysuru Palace", "Chamundi Hills"]);
    }

    #[test]
    fn text_report() {
        let text = Report::build(&results(), 2, false).to_string();
        assert!(text.contains("  - (unnamed) (0.00 km from destination)"));
        assert!(text.contains("  - Mandya (27.11 km from midpoint of route)"));
        assert!(text.contains("Skipped 2 rows"));
        assert!(!Report::default().to_string().contains("Skipped"));
    }

    #[test]
    fn csv_report() {
        let mut out = Vec::new();
        Report::build(&results(), 0, false).write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "list,name,distance_km");
        assert_eq!(lines[1], "near_destination,Chamundi Hills,4.48");
        assert_eq!(lines[4], "on_route,Chamundi Hills,62.75");
        assert_eq!(lines.len(), 7);
    }
}

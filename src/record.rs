use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use std::io;
use std::path::Path;

use crate::coordinate::{normalize, Axis};
use crate::error::{CorridorError, Result};
use crate::geo::Coordinate;

/// One row of the places CSV, before any cleaning. Empty and missing cells
/// are `None`.
#[derive(Clone, Debug, Default)]
pub struct RawPlaceRow {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Positions of the named columns in the header row.
#[derive(Copy, Clone, Debug, Default)]
struct Columns {
    name: Option<usize>,
    address: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &ByteRecord) -> Self {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == wanted)
        };
        let columns = Self {
            name: find("Name"),
            address: find("Address"),
            latitude: find("Latitude"),
            longitude: find("Longitude"),
        };
        if columns.latitude.is_none() || columns.longitude.is_none() {
            log::warn!("no Latitude/Longitude header; every row will be skipped");
        }
        columns
    }

    fn row(&self, record: &ByteRecord) -> RawPlaceRow {
        RawPlaceRow {
            name: cell(record, self.name),
            address: cell(record, self.address),
            latitude: cell(record, self.latitude),
            longitude: cell(record, self.longitude),
        }
    }
}

// Exports are not always UTF-8 (a Latin-1 degree sign is byte 0xB0); bad
// bytes become U+FFFD, which the coordinate normalizer drops.
fn cell(record: &ByteRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

/// A place with validated coordinates. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceRecord {
    row: usize,
    name: String,
    address: String,
    coordinate: Coordinate,
}

impl PlaceRecord {
    /// Normalizes both coordinate fields of `raw`. `row` is the 1-based data
    /// row number, used only for diagnostics.
    pub fn from_raw(row: usize, raw: &RawPlaceRow) -> Result<Self> {
        let lat = normalize(raw.latitude.as_deref().unwrap_or(""), Axis::Latitude)?;
        let lon = normalize(raw.longitude.as_deref().unwrap_or(""), Axis::Longitude)?;
        Ok(Self {
            row,
            name: raw.name.clone().unwrap_or_default(),
            address: raw.address.clone().unwrap_or_default(),
            coordinate: Coordinate::new(lat, lon),
        })
    }

    /// Builds a record from values that are already numeric.
    pub fn new(name: &str, address: &str, lat: f64, lon: f64) -> Result<Self> {
        Ok(Self {
            row: 0,
            name: name.to_string(),
            address: address.to_string(),
            coordinate: Coordinate::new(
                normalize(lat, Axis::Latitude)?,
                normalize(lon, Axis::Longitude)?,
            ),
        })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.lat
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.lon
    }

    /// Name for display; unnamed rows still show up in reports.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "(unnamed)"
        } else {
            &self.name
        }
    }
}

/// Output row of the cleaning step.
#[derive(Debug, Serialize)]
pub struct CleanPlaceRow<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> From<&'a PlaceRecord> for CleanPlaceRow<'a> {
    fn from(record: &'a PlaceRecord) -> Self {
        Self {
            name: record.name(),
            address: record.address(),
            latitude: record.latitude(),
            longitude: record.longitude(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    pub row: usize,
    pub name: String,
    pub error: CorridorError,
}

/// Records that survived normalization, plus the rows that did not.
#[derive(Clone, Debug, Default)]
pub struct LoadedDataset {
    pub records: Vec<PlaceRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadedDataset {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Normalizes every row, keeping dataset order. Malformed rows are set aside
/// rather than failing the whole load.
pub fn normalize_rows<I: IntoIterator<Item = RawPlaceRow>>(rows: I) -> LoadedDataset {
    let mut dataset = LoadedDataset::default();
    for (i, raw) in rows.into_iter().enumerate() {
        let row = i + 1;
        match PlaceRecord::from_raw(row, &raw) {
            Ok(record) => dataset.records.push(record),
            Err(error) => {
                log::debug!("skipping row {}: {}", row, error);
                dataset.skipped.push(SkippedRecord {
                    row,
                    name: raw.name.unwrap_or_default(),
                    error,
                });
            }
        }
    }
    log::info!(
        "Loaded {} places; skipped {} rows with malformed coordinates",
        dataset.records.len(),
        dataset.skipped.len()
    );
    dataset
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    // Short rows are kept; their missing cells read as empty.
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers);
    builder
}

fn load<R: io::Read>(mut rdr: csv::Reader<R>) -> csv::Result<LoadedDataset> {
    let columns = Columns::from_headers(rdr.byte_headers()?);
    let rows = rdr
        .byte_records()
        .map(|record| record.map(|r| columns.row(&r)))
        .collect::<csv::Result<Vec<_>>>()?;
    Ok(normalize_rows(rows))
}

pub fn read_places<R: io::Read>(reader: R) -> csv::Result<LoadedDataset> {
    load(reader_builder().from_reader(reader))
}

pub fn read_places_from_path<P: AsRef<Path>>(path: P) -> csv::Result<LoadedDataset> {
    load(reader_builder().from_path(path)?)
}

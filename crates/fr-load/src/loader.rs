//! Facility file loaders.
//!
//! # JSON format
//!
//! An array of objects, one per facility.  Field names follow the hospital
//! dataset export; short aliases are accepted as well.
//!
//! ```json
//! [
//!   { "Hospital Name": "AIIMS", "Latitude": 28.5672, "Longitude": 77.2100 },
//!   { "name": "Safdarjung", "lat": 28.5685, "lon": 77.2066 }
//! ]
//! ```
//!
//! Unknown fields are ignored.
//!
//! # CSV format
//!
//! A header row followed by one row per facility:
//!
//! ```csv
//! name,lat,lon
//! AIIMS,28.5672,77.2100
//! Safdarjung,28.5685,77.2066
//! ```
//!
//! # Duplicates
//!
//! A repeated name fails the whole load with
//! `CoreError::DuplicateIdentifier`; no partial set is returned.
//! Coordinates are not range-checked here.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use fr_core::{FacilitySet, GeoPoint};

use crate::{LoadError, LoadResult};

// ── Record ────────────────────────────────────────────────────────────────────

/// One raw facility row, as it appears in a JSON or CSV source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacilityRecord {
    #[serde(rename = "Hospital Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Latitude", alias = "lat", alias = "latitude")]
    pub lat:  f64,
    #[serde(rename = "Longitude", alias = "lon", alias = "lng", alias = "longitude")]
    pub lon:  f64,
}

/// Collect records into a [`FacilitySet`], rejecting duplicate names.
pub fn into_facility_set<I>(records: I) -> LoadResult<FacilitySet>
where
    I: IntoIterator<Item = FacilityRecord>,
{
    let set = FacilitySet::from_records(
        records
            .into_iter()
            .map(|r| (r.name, GeoPoint::new(r.lat, r.lon))),
    )?;
    Ok(set)
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load facilities from a file, choosing the format by extension
/// (`.json` or `.csv`, case-insensitive).
pub fn load_facilities(path: &Path) -> LoadResult<FacilitySet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => load_facilities_json(path),
        Some("csv") => load_facilities_csv(path),
        _ => Err(LoadError::Parse(format!(
            "unsupported facility file {}: expected a .json or .csv extension",
            path.display()
        ))),
    }
}

/// Load facilities from a JSON file.
pub fn load_facilities_json(path: &Path) -> LoadResult<FacilitySet> {
    let file = std::fs::File::open(path)?;
    let set = load_facilities_json_reader(std::io::BufReader::new(file))?;
    info!(path = %path.display(), facilities = set.len(), "loaded facilities");
    Ok(set)
}

/// Like [`load_facilities_json`] but accepts any `Read` source.
pub fn load_facilities_json_reader<R: Read>(reader: R) -> LoadResult<FacilitySet> {
    let records: Vec<FacilityRecord> = serde_json::from_reader(reader)
        .map_err(|e| LoadError::Parse(e.to_string()))?;
    into_facility_set(records)
}

/// Load facilities from a CSV file.
pub fn load_facilities_csv(path: &Path) -> LoadResult<FacilitySet> {
    let file = std::fs::File::open(path)?;
    let set = load_facilities_csv_reader(file)?;
    info!(path = %path.display(), facilities = set.len(), "loaded facilities");
    Ok(set)
}

/// Like [`load_facilities_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_facilities_csv_reader<R: Read>(reader: R) -> LoadResult<FacilitySet> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = csv_reader
        .deserialize::<FacilityRecord>()
        .map(|row| row.map_err(|e| LoadError::Parse(e.to_string())))
        .collect::<LoadResult<Vec<_>>>()?;
    into_facility_set(records)
}

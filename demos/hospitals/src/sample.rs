//! Built-in hospital list used when no `--facilities` file is given.
//!
//! Eight New Delhi hospitals in the hospital-dataset JSON layout.

use std::io::Cursor;

use fr_core::FacilitySet;
use fr_load::{load_facilities_json_reader, LoadResult};

pub const SAMPLE_JSON: &str = r#"[
  { "Hospital Name": "AIIMS",                 "Latitude": 28.5672, "Longitude": 77.2100 },
  { "Hospital Name": "Safdarjung Hospital",   "Latitude": 28.5685, "Longitude": 77.2066 },
  { "Hospital Name": "Ram Manohar Lohia",     "Latitude": 28.6262, "Longitude": 77.2006 },
  { "Hospital Name": "Lok Nayak Hospital",    "Latitude": 28.6390, "Longitude": 77.2376 },
  { "Hospital Name": "GTB Hospital",          "Latitude": 28.6856, "Longitude": 77.3101 },
  { "Hospital Name": "Sir Ganga Ram",         "Latitude": 28.6381, "Longitude": 77.1895 },
  { "Hospital Name": "Max Saket",             "Latitude": 28.5275, "Longitude": 77.2115 },
  { "Hospital Name": "Apollo Indraprastha",   "Latitude": 28.5410, "Longitude": 77.2830 }
]"#;

pub fn sample_facilities() -> LoadResult<FacilitySet> {
    load_facilities_json_reader(Cursor::new(SAMPLE_JSON))
}

//! `fr-load`: facility sources for the facility router.
//!
//! Turns JSON or CSV facility lists into an `fr_core::FacilitySet`.  The
//! graph crates never read files; applications call this once at startup
//! and hand the resulting set to the router.

pub mod error;
pub mod loader;


pub use error::{LoadError, LoadResult};
pub use loader::{
    into_facility_set, load_facilities, load_facilities_csv, load_facilities_csv_reader,
    load_facilities_json, load_facilities_json_reader, FacilityRecord,
};

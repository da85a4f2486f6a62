//! Backend query module for the school's data interface (DBI).
//!
//! This module defines the `DbiBackend` trait the people directory queries,
//! the loosely-typed `RawRecord`/`RecordList` shapes the backend returns,
//! and `DbiSnapshot`, an offline backend served from a JSON export.
//!
//! Transport and login are not handled here; a backend is handed records
//! that were already fetched.

pub mod backend;
pub mod error;
pub mod record;
pub mod snapshot;

pub use backend::DbiBackend;
pub use error::{PeopleError, Result};
pub use record::{RawRecord, RecordList};
pub use snapshot::DbiSnapshot;

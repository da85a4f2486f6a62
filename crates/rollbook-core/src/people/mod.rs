//! People directory: students, teachers and parents from the school's DBI.
//!
//! `People` fetches raw records through a `DbiBackend` and turns each one
//! into a typed account via `FromRawRecord`, deciding per field whether a
//! missing or malformed value is tolerated or fatal.

pub mod directory;
pub mod normalize;

pub use directory::People;
pub use normalize::{date_or_none, int_or_none, parse_person_id, FromRawRecord, DATE_FORMAT};

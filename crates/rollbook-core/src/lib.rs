//! rollbook core - typed people directory for a school-management backend.
//!
//! Raw, loosely-typed person records from the backend's data interface are
//! normalized into `Student`, `Teacher` and `Parent` accounts:
//!
//! ```no_run
//! use rollbook_core::{DbiSnapshot, People, Session};
//!
//! # fn main() -> anyhow::Result<()> {
//! let snapshot = DbiSnapshot::load("dbi.json".as_ref())?;
//! let session = Session::from(snapshot.session.clone());
//! let people = People::new(&session, &snapshot);
//!
//! if let Some(students) = people.get_students()? {
//!     for student in students {
//!         println!("{} {}", student.account().get_id(), student.account().name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod people;
pub mod utils;

pub use api::{DbiBackend, DbiSnapshot, PeopleError, RawRecord, RecordList};
pub use auth::{Session, SessionData};
pub use config::Config;
pub use models::{Account, AccountType, Gender, Parent, Person, PersonSortColumn, Student, Teacher};
pub use people::People;

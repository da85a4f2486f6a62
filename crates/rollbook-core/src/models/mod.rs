//! Data models for the people directory.
//!
//! This module contains the typed entities produced from raw DBI records:
//!
//! - `Gender`, `AccountType`: closed code sets used by the backend
//! - `Account`: identity shared by every person
//! - `Student`, `Teacher`, `Parent`: role-specific accounts
//! - `Person`: any of the above, for mixed listings

pub mod person;

pub use person::{Account, AccountType, Gender, Parent, Person, PersonSortColumn, Student, Teacher};

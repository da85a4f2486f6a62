use crate::models::AccountType;

use super::error::Result;
use super::record::{RawRecord, RecordList};

/// Query side of the school backend's data interface.
///
/// Each DBI table (students, teachers, parents) is addressed by the
/// `AccountType` of the people it holds. `Ok(None)` is the backend's way of
/// saying "nothing there": for `fetch_list` the table is unavailable, for
/// `fetch_record` the person does not exist. An `Err` is a real failure and
/// is passed through to the caller untouched.
pub trait DbiBackend {
    /// Whole table, keyed by stringified person id, in backend order
    fn fetch_list(&self, kind: AccountType) -> Result<Option<RecordList>>;

    /// One person's raw record
    fn fetch_record(&self, kind: AccountType, person_id: i64) -> Result<Option<RawRecord>>;

    /// Display name of a person
    fn fetch_name(&self, kind: AccountType, person_id: i64) -> Result<Option<String>>;

    /// Short label ("number") of a classroom; empty when unknown
    fn fetch_classroom_number(&self, classroom_id: i64) -> Result<String>;
}

impl<B: DbiBackend + ?Sized> DbiBackend for &B {
    fn fetch_list(&self, kind: AccountType) -> Result<Option<RecordList>> {
        (**self).fetch_list(kind)
    }

    fn fetch_record(&self, kind: AccountType, person_id: i64) -> Result<Option<RawRecord>> {
        (**self).fetch_record(kind, person_id)
    }

    fn fetch_name(&self, kind: AccountType, person_id: i64) -> Result<Option<String>> {
        (**self).fetch_name(kind, person_id)
    }

    fn fetch_classroom_number(&self, classroom_id: i64) -> Result<String> {
        (**self).fetch_classroom_number(classroom_id)
    }
}

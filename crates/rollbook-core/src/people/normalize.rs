//! Field coercion and entity assembly for raw DBI records.
//!
//! Every field is coerced by one of two rules. Tolerant coercions turn
//! missing or garbage input into `None`; mandatory coercions turn it into a
//! `PeopleError::DataIntegrity`. Which rule applies depends on the field and
//! on the kind of account being built:
//!
//! | field          | student / parent | teacher   |
//! |----------------|------------------|-----------|
//! | name (lookup)  | mandatory        | mandatory |
//! | gender         | tolerant         | mandatory |
//! | datefrom       | tolerant         | mandatory |
//! | classid etc.   | tolerant         | -         |
//!
//! Tolerant coercions ignore surrounding whitespace; mandatory ones take the
//! raw text as-is, so `" 2010-09-01 "` is a malformed teacher date. Table keys
//! must be canonical positive integers (`"42"`, not `"042"` or `"+42"`).

use chrono::NaiveDate;
use tracing::debug;

use crate::api::{DbiBackend, PeopleError, RawRecord, Result};
use crate::models::{AccountType, Gender, Parent, Student, Teacher};

/// Date pattern used by every DBI date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const FIELD_GENDER: &str = "gender";
pub const FIELD_DATE_FROM: &str = "datefrom";
pub const FIELD_CLASS_ID: &str = "classid";
pub const FIELD_NUMBER_IN_CLASS: &str = "numberinclass";
pub const FIELD_CLASSROOM_ID: &str = "classroomid";

/// Tolerant integer coercion; surrounding whitespace is ignored
pub fn int_or_none(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

/// Tolerant date coercion
pub fn date_or_none(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), DATE_FORMAT).ok()
}

/// Mandatory date coercion; no whitespace trimming
pub fn require_date(
    person_id: i64,
    field: &'static str,
    raw: Option<&str>,
) -> Result<NaiveDate> {
    let raw = raw.ok_or_else(|| PeopleError::missing(person_id, field))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| PeopleError::malformed(person_id, field, raw))
}

/// Mandatory gender coercion
pub fn require_gender(person_id: i64, raw: Option<&str>) -> Result<Gender> {
    match raw {
        None => Err(PeopleError::missing(person_id, FIELD_GENDER)),
        Some(code) => Gender::parse(Some(code))
            .ok_or_else(|| PeopleError::malformed(person_id, FIELD_GENDER, code)),
    }
}

/// Parse a DBI table key into a person id.
///
/// Blank keys are `Ok(None)` so callers can skip them; any other key must be
/// a positive integer written the way the backend writes it. Padded or signed
/// keys (`"042"`, `" 42"`, `"+42"`) would not find their own record again.
pub fn parse_person_id(key: &str) -> Result<Option<i64>> {
    if key.trim().is_empty() {
        return Ok(None);
    }
    match key.parse::<i64>() {
        Ok(id) if id > 0 && id.to_string() == key => Ok(Some(id)),
        _ => Err(PeopleError::malformed(key, "person_id", key)),
    }
}

/// Display name lookup; a person without one is a data fault
fn resolve_name<B: DbiBackend + ?Sized>(
    backend: &B,
    kind: AccountType,
    person_id: i64,
) -> Result<String> {
    backend
        .fetch_name(kind, person_id)?
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| PeopleError::missing(person_id, "name"))
}

/// Classroom label for a teacher, or the empty string when none is assigned
fn resolve_classroom_name<B: DbiBackend + ?Sized>(
    backend: &B,
    raw: Option<&str>,
) -> Result<String> {
    match int_or_none(raw) {
        // 0 is the backend's "no classroom" marker
        Some(classroom_id) if classroom_id != 0 => backend.fetch_classroom_number(classroom_id),
        _ => Ok(String::new()),
    }
}

/// Builds one typed account from one raw DBI record.
///
/// Construction is all-or-nothing: either every mandatory field resolves and
/// a complete entity comes back, or the first failure is returned.
pub trait FromRawRecord: Sized {
    /// DBI table this kind of account lives in
    const KIND: AccountType;

    fn from_raw_record<B: DbiBackend + ?Sized>(
        backend: &B,
        person_id: i64,
        record: &RawRecord,
    ) -> Result<Self>;
}

impl FromRawRecord for Student {
    const KIND: AccountType = AccountType::Student;

    fn from_raw_record<B: DbiBackend + ?Sized>(
        backend: &B,
        person_id: i64,
        record: &RawRecord,
    ) -> Result<Self> {
        let class_id = int_or_none(record.get(FIELD_CLASS_ID));
        let gender = Gender::parse(record.get(FIELD_GENDER));
        let since = date_or_none(record.get(FIELD_DATE_FROM));
        let number_in_class = int_or_none(record.get(FIELD_NUMBER_IN_CLASS));
        let name = resolve_name(backend, Self::KIND, person_id)?;

        if gender.is_none() && record.get(FIELD_GENDER).is_some() {
            debug!(person_id, raw = ?record.get(FIELD_GENDER), "Unrecognized student gender code");
        }

        Student::new(person_id, name, gender, since, class_id, number_in_class)
    }
}

impl FromRawRecord for Parent {
    const KIND: AccountType = AccountType::Parent;

    fn from_raw_record<B: DbiBackend + ?Sized>(
        backend: &B,
        person_id: i64,
        record: &RawRecord,
    ) -> Result<Self> {
        let gender = Gender::parse(record.get(FIELD_GENDER));
        let since = date_or_none(record.get(FIELD_DATE_FROM));
        let name = resolve_name(backend, Self::KIND, person_id)?;

        Parent::new(person_id, name, gender, since)
    }
}

impl FromRawRecord for Teacher {
    const KIND: AccountType = AccountType::Teacher;

    fn from_raw_record<B: DbiBackend + ?Sized>(
        backend: &B,
        person_id: i64,
        record: &RawRecord,
    ) -> Result<Self> {
        // Record-local checks run before any lookup
        let gender = require_gender(person_id, record.get(FIELD_GENDER))?;
        let since = require_date(person_id, FIELD_DATE_FROM, record.get(FIELD_DATE_FROM))?;
        let name = resolve_name(backend, Self::KIND, person_id)?;
        let classroom_name = resolve_classroom_name(backend, record.get(FIELD_CLASSROOM_ID))?;

        Teacher::new(person_id, name, gender, since, classroom_name)
    }
}

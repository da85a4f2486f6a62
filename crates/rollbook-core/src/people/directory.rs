use tracing::debug;

use crate::api::{DbiBackend, Result};
use crate::auth::Session;
use crate::models::{Parent, Person, Student, Teacher};

use super::normalize::{parse_person_id, FromRawRecord};

/// Read-only view of the school's people, served from a DBI backend.
///
/// Every call checks the session first, then issues fresh lookups; nothing
/// is cached between calls. `Ok(None)` means "not found" for single lookups
/// and "list unavailable" for the listing calls.
pub struct People<'a, B: DbiBackend + ?Sized> {
    session: &'a Session,
    backend: &'a B,
}

impl<'a, B: DbiBackend + ?Sized> People<'a, B> {
    pub fn new(session: &'a Session, backend: &'a B) -> Self {
        Self { session, backend }
    }

    pub fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_one(student_id)
    }

    pub fn get_students(&self) -> Result<Option<Vec<Student>>> {
        self.get_many()
    }

    pub fn get_teacher(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        self.get_one(teacher_id)
    }

    pub fn get_teachers(&self) -> Result<Option<Vec<Teacher>>> {
        self.get_many()
    }

    pub fn get_parent(&self, parent_id: i64) -> Result<Option<Parent>> {
        self.get_one(parent_id)
    }

    pub fn get_parents(&self) -> Result<Option<Vec<Parent>>> {
        self.get_many()
    }

    /// Students, then teachers, then parents; `None` if any table is unavailable
    pub fn get_people(&self) -> Result<Option<Vec<Person>>> {
        let Some(students) = self.get_students()? else {
            return Ok(None);
        };
        let Some(teachers) = self.get_teachers()? else {
            return Ok(None);
        };
        let Some(parents) = self.get_parents()? else {
            return Ok(None);
        };

        let people = students
            .into_iter()
            .map(Person::from)
            .chain(teachers.into_iter().map(Person::from))
            .chain(parents.into_iter().map(Person::from))
            .collect();
        Ok(Some(people))
    }

    fn get_one<T: FromRawRecord>(&self, person_id: i64) -> Result<Option<T>> {
        self.session.require_login()?;

        let Some(record) = self.backend.fetch_record(T::KIND, person_id)? else {
            debug!(kind = %T::KIND, person_id, "No such person");
            return Ok(None);
        };

        T::from_raw_record(self.backend, person_id, &record).map(Some)
    }

    fn get_many<T: FromRawRecord>(&self) -> Result<Option<Vec<T>>> {
        self.session.require_login()?;

        let Some(list) = self.backend.fetch_list(T::KIND)? else {
            debug!(kind = %T::KIND, "List unavailable");
            return Ok(None);
        };

        let mut result = Vec::with_capacity(list.len());
        for (key, record) in list.iter() {
            let Some(person_id) = parse_person_id(key)? else {
                debug!(kind = %T::KIND, "Skipping blank list key");
                continue;
            };
            result.push(T::from_raw_record(self.backend, person_id, record)?);
        }

        debug!(kind = %T::KIND, count = result.len(), "Fetched list");
        Ok(Some(result))
    }
}

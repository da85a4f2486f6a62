//! Offline DBI backend built from a JSON export.
//!
//! A snapshot is the DBI payload a logged-in client receives, saved to disk
//! together with the session it was taken under. Serving queries from it
//! needs no transport at all, which makes it the backend of choice for the
//! command-line viewer and for tests.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::auth::SessionData;
use crate::models::AccountType;

use super::backend::DbiBackend;
use super::error::Result as PeopleResult;
use super::record::{RawRecord, RecordList};

/// Field holding a classroom's short label
const CLASSROOM_SHORT_FIELD: &str = "short";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbiSnapshot {
    #[serde(default)]
    pub session: Option<SessionData>,
    #[serde(default)]
    students: Option<RecordList>,
    #[serde(default)]
    teachers: Option<RecordList>,
    #[serde(default)]
    parents: Option<RecordList>,
    #[serde(default)]
    classrooms: RecordList,
}

impl DbiSnapshot {
    /// Parse a snapshot from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse DBI snapshot")
    }

    /// Load a snapshot file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
        let snapshot = Self::from_json(&contents)?;
        debug!(
            path = %path.display(),
            students = snapshot.students.as_ref().map(|t| t.len()),
            teachers = snapshot.teachers.as_ref().map(|t| t.len()),
            parents = snapshot.parents.as_ref().map(|t| t.len()),
            classrooms = snapshot.classrooms.len(),
            "Loaded DBI snapshot"
        );
        Ok(snapshot)
    }

    pub fn with_table(mut self, kind: AccountType, table: RecordList) -> Self {
        match kind {
            AccountType::Student => self.students = Some(table),
            AccountType::Teacher => self.teachers = Some(table),
            AccountType::Parent => self.parents = Some(table),
        }
        self
    }

    pub fn with_classroom(mut self, classroom_id: i64, short: &str) -> Self {
        self.classrooms.push(
            classroom_id.to_string(),
            RawRecord::new().with(CLASSROOM_SHORT_FIELD, short),
        );
        self
    }

    pub fn with_session(mut self, session: SessionData) -> Self {
        self.session = Some(session);
        self
    }

    fn table(&self, kind: AccountType) -> Option<&RecordList> {
        match kind {
            AccountType::Student => self.students.as_ref(),
            AccountType::Teacher => self.teachers.as_ref(),
            AccountType::Parent => self.parents.as_ref(),
        }
    }

    fn record(&self, kind: AccountType, person_id: i64) -> Option<&RawRecord> {
        self.table(kind)?.get(&person_id.to_string())
    }
}

/// "First Last" from the name columns, tolerating either half missing
fn join_name(record: &RawRecord) -> Option<String> {
    let parts: Vec<&str> = ["firstname", "lastname"]
        .iter()
        .filter_map(|field| record.get(field))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

impl DbiBackend for DbiSnapshot {
    fn fetch_list(&self, kind: AccountType) -> PeopleResult<Option<RecordList>> {
        Ok(self.table(kind).cloned())
    }

    fn fetch_record(&self, kind: AccountType, person_id: i64) -> PeopleResult<Option<RawRecord>> {
        Ok(self.record(kind, person_id).cloned())
    }

    fn fetch_name(&self, kind: AccountType, person_id: i64) -> PeopleResult<Option<String>> {
        Ok(self.record(kind, person_id).and_then(join_name))
    }

    fn fetch_classroom_number(&self, classroom_id: i64) -> PeopleResult<String> {
        let short = self
            .classrooms
            .get(&classroom_id.to_string())
            .and_then(|c| c.get(CLASSROOM_SHORT_FIELD))
            .unwrap_or_default();
        Ok(short.to_string())
    }
}

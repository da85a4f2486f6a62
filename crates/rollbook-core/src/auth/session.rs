use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{PeopleError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub username: String,
    pub subdomain: String,
    pub created_at: DateTime<Utc>,
    /// Hard expiry reported by the backend, if any
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn new(username: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            subdomain: subdomain.into(),
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|expiry| Utc::now() > expiry).unwrap_or(false)
    }

    pub fn time_until_expiry(&self) -> Option<Duration> {
        self.expires_at.map(|expiry| expiry - Utc::now())
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> Option<i64> {
        self.time_until_expiry().map(|d| d.num_minutes().max(0))
    }
}

/// Handle to the caller's login state.
///
/// The session is only ever read by the people directory; logging in and
/// out happens elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self { data: None }
    }

    pub fn logged_in(data: SessionData) -> Self {
        Self { data: Some(data) }
    }

    /// Get the username if session exists
    pub fn username(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.username.as_str())
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    /// Guard run before any data is requested
    pub fn require_login(&self) -> Result<&SessionData> {
        match self.data {
            Some(ref data) if !data.is_expired() => Ok(data),
            Some(ref data) => {
                debug!(username = %data.username, "Session expired");
                Err(PeopleError::NotAuthenticated)
            }
            None => Err(PeopleError::NotAuthenticated),
        }
    }
}

impl From<Option<SessionData>> for Session {
    fn from(data: Option<SessionData>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_is_rejected() {
        let session = Session::new();
        assert!(!session.is_valid());
        assert_eq!(session.require_login(), Err(PeopleError::NotAuthenticated));
    }

    #[test]
    fn test_logged_in_session_passes_guard() {
        let session = Session::logged_in(SessionData::new("jnovak", "gymzv"));
        assert!(session.is_valid());
        assert_eq!(session.require_login().map(|d| d.username.as_str()), Ok("jnovak"));
        assert_eq!(session.username(), Some("jnovak"));
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let mut data = SessionData::new("jnovak", "gymzv");
        data.expires_at = Some(Utc::now() - Duration::minutes(1));
        let session = Session::logged_in(data);

        assert!(!session.is_valid());
        assert_eq!(session.require_login().err(), Some(PeopleError::NotAuthenticated));
    }

    #[test]
    fn test_minutes_until_expiry() {
        let mut data = SessionData::new("jnovak", "gymzv");
        assert_eq!(data.minutes_until_expiry(), None);

        data.expires_at = Some(Utc::now() - Duration::minutes(5));
        assert_eq!(data.minutes_until_expiry(), Some(0));

        data.expires_at = Some(Utc::now() + Duration::minutes(30) + Duration::seconds(5));
        assert_eq!(data.minutes_until_expiry(), Some(30));
    }
}

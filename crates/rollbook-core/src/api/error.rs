use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeopleError {
    #[error("Not logged in - open an authenticated session first")]
    NotAuthenticated,

    #[error("Data integrity fault for person {person_id}: {field} {reason}")]
    DataIntegrity {
        person_id: String,
        field: &'static str,
        reason: String,
    },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Maximum length for raw values echoed back in error messages
const MAX_ERROR_VALUE_LENGTH: usize = 64;

impl PeopleError {
    /// Truncate a raw backend value to avoid logging excessive data
    fn truncate_value(value: &str) -> String {
        if value.chars().count() <= MAX_ERROR_VALUE_LENGTH {
            value.to_string()
        } else {
            let head: String = value.chars().take(MAX_ERROR_VALUE_LENGTH).collect();
            format!("{}... (truncated)", head)
        }
    }

    /// A mandatory field had no value at all
    pub fn missing(person_id: impl ToString, field: &'static str) -> Self {
        PeopleError::DataIntegrity {
            person_id: person_id.to_string(),
            field,
            reason: "is missing".to_string(),
        }
    }

    /// A mandatory field was present but could not be coerced
    pub fn malformed(person_id: impl ToString, field: &'static str, raw: &str) -> Self {
        PeopleError::DataIntegrity {
            person_id: person_id.to_string(),
            field,
            reason: format!("is malformed: {:?}", Self::truncate_value(raw)),
        }
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, PeopleError::DataIntegrity { .. })
    }
}

pub type Result<T> = std::result::Result<T, PeopleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let err = PeopleError::missing(42, "name");
        assert_eq!(
            err.to_string(),
            "Data integrity fault for person 42: name is missing"
        );
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_malformed_truncates_long_values() {
        let raw = "x".repeat(200);
        let err = PeopleError::malformed(7, "datefrom", &raw);
        let msg = err.to_string();
        assert!(msg.contains("(truncated)"));
        assert!(msg.len() < 160);
    }

    #[test]
    fn test_not_authenticated_is_not_integrity_fault() {
        assert!(!PeopleError::NotAuthenticated.is_data_integrity());
        assert!(!PeopleError::Backend("down".to_string()).is_data_integrity());
    }
}

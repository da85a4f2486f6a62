use std::cmp::Ordering;

use chrono::NaiveDate;

/// Compare two strings case-insensitively (Unicode-aware)
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or empty
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(default).to_string()
}

/// Format an optional number, "-" when unset
pub fn format_optional_number(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format an optional date in the backend's YYYY-MM-DD form, "-" when unset
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("novák", "Novák"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("adam", "Bára"), Ordering::Less);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        // Multi-byte names must not be cut mid-character
        assert_eq!(truncate_string("Nováková", 6), "Nov...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some("B12"), "-"), "B12");
        assert_eq!(format_optional(Some(""), "-"), "-");
        assert_eq!(format_optional(None, "n/a"), "n/a");
    }

    #[test]
    fn test_format_date_and_number() {
        let date = NaiveDate::from_ymd_opt(2021, 9, 1);
        assert_eq!(format_date(date), "2021-09-01");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_optional_number(Some(3)), "3");
        assert_eq!(format_optional_number(None), "-");
    }
}

//! Explicit identifier parsing.
//!
//! Path segments and JSON bodies carry ids either as numbers or as numeric
//! strings; anything else is a validation error instead of reaching the store.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Parse a textual id (path segment or string body value).
pub fn parse_id(raw: &str, what: &str) -> Result<i32, ServiceError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::Validation(format!("{what} must be a positive integer, got {raw:?}"))),
    }
}

/// An id as it arrives in a JSON body: `7` or `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    pub fn resolve(&self, what: &str) -> Result<i32, ServiceError> {
        match self {
            RawId::Number(n) => i32::try_from(*n)
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| ServiceError::Validation(format!("{what} must be a positive integer, got {n}"))),
            RawId::Text(s) => parse_id(s, what),
        }
    }
}

impl From<i32> for RawId {
    fn from(id: i32) -> Self {
        RawId::Number(id.into())
    }
}

/// A body id that must be present.
pub fn resolve_required(raw: Option<&RawId>, what: &str) -> Result<i32, ServiceError> {
    match raw {
        Some(raw) => raw.resolve(what),
        None => Err(ServiceError::Validation(format!("{what} is required"))),
    }
}

/// Absent stays absent; present must parse.
pub fn resolve_optional(raw: Option<&RawId>, what: &str) -> Result<Option<i32>, ServiceError> {
    raw.map(|r| r.resolve(what)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!(parse_id("12", "id").unwrap(), 12);
        assert_eq!(parse_id(" 7 ", "id").unwrap(), 7);
    }

    #[test]
    fn rejects_non_numeric_and_non_positive() {
        for raw in ["abc", "", "1.5", "0", "-3", "99999999999"] {
            assert!(matches!(parse_id(raw, "id"), Err(ServiceError::Validation(_))), "{raw}");
        }
    }

    #[test]
    fn raw_id_accepts_number_or_string() {
        let n: RawId = serde_json::from_str("5").unwrap();
        let s: RawId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(n.resolve("courseId").unwrap(), 5);
        assert_eq!(s.resolve("courseId").unwrap(), 5);
    }

    #[test]
    fn raw_id_rejects_garbage_string() {
        let s: RawId = serde_json::from_str("\"five\"").unwrap();
        let err = s.resolve("courseId").unwrap_err();
        assert!(err.to_string().contains("courseId"));
    }

    #[test]
    fn raw_id_rejects_out_of_range_number() {
        assert!(RawId::Number(i64::from(i32::MAX) + 1).resolve("id").is_err());
        assert!(RawId::Number(0).resolve("id").is_err());
    }

    #[test]
    fn resolve_optional_passes_none_through() {
        assert_eq!(resolve_optional(None, "fieldId").unwrap(), None);
        assert_eq!(resolve_optional(Some(&RawId::from(3)), "fieldId").unwrap(), Some(3));
    }

    #[test]
    fn resolve_required_rejects_missing() {
        let err = resolve_required(None, "studentId").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "studentId is required"));
        assert_eq!(resolve_required(Some(&RawId::Text("8".into())), "studentId").unwrap(), 8);
    }
}

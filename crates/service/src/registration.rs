//! Student registration codes.
//!
//! A code is a fixed zero prefix followed by the first six hex digits of a
//! random UUID. Codes are not guaranteed unique.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

pub const PREFIX: &str = "00000";
pub const SUFFIX_LEN: usize = 6;
pub const CODE_LEN: usize = PREFIX.len() + SUFFIX_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrationCode(String);

impl RegistrationCode {
    /// Mint a fresh code. The only input is the UUID entropy source.
    ///
    /// ```
    /// use service::registration::{RegistrationCode, CODE_LEN};
    /// let code = RegistrationCode::generate();
    /// assert_eq!(code.as_str().len(), CODE_LEN);
    /// assert!(RegistrationCode::is_well_formed(code.as_str()));
    /// ```
    pub fn generate() -> Self {
        let entropy = Uuid::new_v4().simple().to_string();
        Self(format!("{PREFIX}{}", &entropy[..SUFFIX_LEN]))
    }

    pub fn is_well_formed(code: &str) -> bool {
        code.len() == CODE_LEN
            && code.starts_with(PREFIX)
            && code[PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RegistrationCode> for String {
    fn from(code: RegistrationCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..200 {
            let code = RegistrationCode::generate();
            assert!(RegistrationCode::is_well_formed(code.as_str()), "{code}");
        }
    }

    #[test]
    fn successive_codes_differ() {
        let a = RegistrationCode::generate();
        let b = RegistrationCode::generate();
        let c = RegistrationCode::generate();
        assert!(a != b || b != c);
    }

    #[test]
    fn well_formed_rejects_other_shapes() {
        assert!(!RegistrationCode::is_well_formed("00000abc"));
        assert!(!RegistrationCode::is_well_formed("11111abcdef"));
        assert!(!RegistrationCode::is_well_formed("00000ABCDEF"));
        assert!(!RegistrationCode::is_well_formed("00000abcdeg"));
        assert!(RegistrationCode::is_well_formed("00000a1b2c3"));
    }
}

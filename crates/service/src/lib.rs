//! Business rules for the academic records backend.
//! - Entity definitions and raw persistence helpers live in `models`.
//! - Everything here talks to storage through [`records::RecordStore`].
//! - Reference checks, registration codes and id parsing are decided here, not in handlers.

pub mod errors;
pub mod ids;
pub mod records;
pub mod registration;
#[cfg(test)]
pub mod test_support;

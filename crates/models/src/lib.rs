//! SeaORM entities for the academic records schema plus the small write
//! helpers the store adapter builds on.

pub mod errors;
pub mod db;
pub mod field;
pub mod course;
pub mod student;
pub mod subject;

#[cfg(test)]
mod tests;

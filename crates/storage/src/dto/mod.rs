pub mod common;
pub mod person;
pub mod sport;

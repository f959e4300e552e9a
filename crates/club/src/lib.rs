pub mod config;
pub mod controllers;
pub mod error;

pub use controllers::{PersonController, SportController};
pub use error::{ClubError, Result};

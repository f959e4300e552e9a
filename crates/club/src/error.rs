use storage::error::StorageError;
use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, ClubError>;

/// Errors raised by the controllers.
#[derive(Debug, Error)]
pub enum ClubError {
    /// Missing or malformed input
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// An id or name that does not resolve
    #[error("Not found: {0}")]
    ResourceNotFound(String),

    /// Business rule violation: duplicate email / name, duplicate or missing sport link
    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl ClubError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::ResourceNotFound(format!("{} '{}' does not exist", what, id))
    }
}

impl From<StorageError> for ClubError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::ResourceNotFound("Resource not found".to_string()),
            StorageError::ConstraintViolation(msg) => Self::Conflict(msg),
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationErrors> for ClubError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                })
            })
            .collect();

        // nested structs (address) only show up in the full error listing
        if field_errors.is_empty() {
            field_errors.push(errors.to_string());
        }
        field_errors.sort();

        Self::InvalidData(field_errors.join(", "))
    }
}

impl From<serde_json::Error> for ClubError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidData(error.to_string())
    }
}

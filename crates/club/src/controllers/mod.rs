pub mod person;
pub mod sport;

pub use person::PersonController;
pub use sport::SportController;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{ClubError, Result};

/// Ids come in as text from the front end; anything that is not a UUID
/// cannot name an existing row.
fn parse_id(what: &str, id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| ClubError::not_found(what, id))
}

/// Records must be key/value objects, never positional arrays.
fn record(data: &Value) -> Result<&Value> {
    if data.is_object() {
        Ok(data)
    } else {
        Err(ClubError::InvalidData(
            "expected a key/value record (JSON object)".to_string(),
        ))
    }
}

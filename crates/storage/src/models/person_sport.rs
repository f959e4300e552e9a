use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A person's link to a sport, joined with the sport name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PersonSport {
    pub person_id: Uuid,
    pub sport_id: Uuid,
    pub sport_name: String,
    pub level: String,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sport {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: chrono::NaiveDateTime,
}

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use thiserror::Error;
use uuid::Uuid;

/// Discriminator stored in `persons.person_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PersonKind {
    #[default]
    Person,
    Member,
    Coach,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown person type: '{0}'. Available: person, member, coach")]
pub struct UnknownPersonKind(pub String);

impl PersonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Member => "member",
            Self::Coach => "coach",
        }
    }

    pub fn all() -> &'static [PersonKind] {
        &[Self::Person, Self::Member, Self::Coach]
    }

    fn parse_str(s: &str) -> Result<Self, UnknownPersonKind> {
        match s.trim().to_lowercase().as_str() {
            "person" | "people" => Ok(Self::Person),
            "member" | "members" => Ok(Self::Member),
            "coach" | "coaches" => Ok(Self::Coach),
            _ => Err(UnknownPersonKind(s.to_string())),
        }
    }
}

impl TryFrom<&str> for PersonKind {
    type Error = UnknownPersonKind;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for PersonKind {
    type Err = UnknownPersonKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PersonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subtype specific data of a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Person,
    Member,
    Coach { contract: String, degree: String },
}

impl Role {
    pub fn kind(&self) -> PersonKind {
        match self {
            Self::Person => PersonKind::Person,
            Self::Member => PersonKind::Member,
            Self::Coach { .. } => PersonKind::Coach,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub created_at: chrono::NaiveDateTime,
    pub role: Role,
}

impl Person {
    pub fn kind(&self) -> PersonKind {
        self.role.kind()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Person {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let role = match row.try_get::<PersonKind, _>("person_type")? {
            PersonKind::Person => Role::Person,
            PersonKind::Member => Role::Member,
            PersonKind::Coach => Role::Coach {
                contract: row
                    .try_get::<Option<String>, _>("contract")?
                    .unwrap_or_default(),
                degree: row
                    .try_get::<Option<String>, _>("degree")?
                    .unwrap_or_default(),
            },
        };

        Ok(Self {
            id: row.try_get("id")?,
            firstname: row.try_get("firstname")?,
            lastname: row.try_get("lastname")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
            role,
        })
    }
}

use sqlx::SqlitePool;

use super::person::PersonRepository;
use crate::models::PersonKind;

/// Hands out the person repository matching a subtype tag.
/// Every repository shares the factory's pool.
#[derive(Debug, Clone, Copy)]
pub struct PersonRepositoryFactory<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PersonRepositoryFactory<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// `None` and `Person` both give the repository over every person.
    pub fn get_dao(&self, kind: Option<PersonKind>) -> PersonRepository<'a> {
        match kind {
            None | Some(PersonKind::Person) => PersonRepository::new(self.pool),
            Some(kind @ (PersonKind::Member | PersonKind::Coach)) => {
                PersonRepository::scoped(self.pool, kind)
            }
        }
    }
}

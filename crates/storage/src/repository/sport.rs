use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::sport::{CreateSportRequest, UpdateSportRequest};
use crate::error::{Result, StorageError};
use crate::models::Sport;

/// Repository for Sport database operations
pub struct SportRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SportRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all sports
    pub async fn list(&self) -> Result<Vec<Sport>> {
        let sports = sqlx::query_as::<_, Sport>(
            "SELECT id, name, description, created_at FROM sports ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Sport> {
        let sport = sqlx::query_as::<_, Sport>(
            "SELECT id, name, description, created_at FROM sports WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(sport)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Sport> {
        let sport = sqlx::query_as::<_, Sport>(
            "SELECT id, name, description, created_at FROM sports WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(sport)
    }

    /// Whether `name` is used by a sport other than `except`
    pub async fn name_taken(&self, name: &str, except: Option<Uuid>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM sports WHERE name = ? AND (? IS NULL OR id <> ?))",
        )
        .bind(name)
        .bind(except)
        .bind(except)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Create a new sport
    pub async fn create(&self, req: &CreateSportRequest) -> Result<Sport> {
        let sport = sqlx::query_as::<_, Sport>(
            r#"
            INSERT INTO sports (id, name, description)
            VALUES (?, ?, ?)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(req.name.trim())
        .bind(req.description.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Sport name already exists"))?;

        Ok(sport)
    }

    /// Update an existing sport
    pub async fn update(&self, existing: &Sport, req: &UpdateSportRequest) -> Result<Sport> {
        let name = req.name.as_deref().map(str::trim).unwrap_or(existing.name.as_str());
        let description = req.description.as_ref().unwrap_or(&existing.description);

        let sport = sqlx::query_as::<_, Sport>(
            r#"
            UPDATE sports
            SET name = ?,
                description = ?
            WHERE id = ?
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(existing.id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Sport name already exists"))?
        .ok_or(StorageError::NotFound)?;

        Ok(sport)
    }

    /// Delete a sport by ID; links to people are removed with it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sports WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn repository_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    fn basket() -> CreateSportRequest {
        CreateSportRequest {
            name: "basket".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let db = repository_db().await;
        let repo = SportRepository::new(db.pool());

        let sport = repo.create(&basket()).await.unwrap();

        assert_eq!(repo.find_by_id(sport.id).await.unwrap().name, "basket");
        assert_eq!(repo.find_by_name("basket").await.unwrap().id, sport.id);
        assert!(matches!(
            repo.find_by_name("danse").await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint_violation() {
        let db = repository_db().await;
        let repo = SportRepository::new(db.pool());

        repo.create(&basket()).await.unwrap();
        assert!(repo.name_taken("basket", None).await.unwrap());
        assert!(matches!(
            repo.create(&basket()).await,
            Err(StorageError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_untouched_fields() {
        let db = repository_db().await;
        let repo = SportRepository::new(db.pool());
        let sport = repo.create(&basket()).await.unwrap();

        let updated = repo
            .update(
                &sport,
                &UpdateSportRequest {
                    description: Some("test foot".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "basket");
        assert_eq!(updated.description, "test foot");
        assert!(!repo.name_taken("basket", Some(sport.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let db = repository_db().await;
        let repo = SportRepository::new(db.pool());
        let sport = repo.create(&basket()).await.unwrap();

        repo.delete(sport.id).await.unwrap();
        assert!(matches!(
            repo.delete(sport.id).await,
            Err(StorageError::NotFound)
        ));
        assert_eq!(repo.list().await.unwrap().len(), 0);
    }
}

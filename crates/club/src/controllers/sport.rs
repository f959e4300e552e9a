use serde::Deserialize;
use serde_json::Value;
use storage::{
    Database,
    dto::sport::{CreateSportRequest, SportResponse, UpdateSportRequest},
    error::StorageError,
    models::Sport,
    repository::SportRepository,
};
use tracing::{debug, info, warn};
use validator::Validate;

use super::{parse_id, record};
use crate::error::{ClubError, Result};

#[derive(Debug, Clone)]
pub struct SportController {
    db: Database,
}

impl SportController {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn repository(&self) -> SportRepository<'_> {
        SportRepository::new(self.db.pool())
    }

    pub async fn list_sports(&self) -> Result<Vec<SportResponse>> {
        let sports = self.repository().list().await?;
        debug!(count = sports.len(), "Listed sports");

        Ok(sports.into_iter().map(SportResponse::from).collect())
    }

    pub async fn get_sport(&self, id: &str) -> Result<SportResponse> {
        let sport = self.find_sport(id).await?;
        Ok(SportResponse::from(sport))
    }

    pub async fn create_sport(&self, data: &Value) -> Result<SportResponse> {
        let req = CreateSportRequest::deserialize(record(data)?)?;
        req.validate()?;

        let repo = self.repository();
        self.ensure_name_free(&repo, req.name.trim(), None).await?;

        let sport = repo.create(&req).await?;
        info!(sport_id = %sport.id, name = %sport.name, "Sport created");

        Ok(SportResponse::from(sport))
    }

    /// Update a sport; keys missing from `data` are left untouched
    pub async fn update_sport(&self, id: &str, data: &Value) -> Result<SportResponse> {
        let req = UpdateSportRequest::deserialize(record(data)?)?;
        req.validate()?;

        let repo = self.repository();
        let existing = self.find_sport(id).await?;

        if let Some(name) = &req.name {
            self.ensure_name_free(&repo, name.trim(), Some(&existing)).await?;
        }

        let sport = repo.update(&existing, &req).await?;
        info!(sport_id = %sport.id, "Sport updated");

        Ok(SportResponse::from(sport))
    }

    /// Delete a sport, returning the record as it was before deletion
    pub async fn delete_sport(&self, id: &str) -> Result<SportResponse> {
        let sport = self.find_sport(id).await?;

        self.repository()
            .delete(sport.id)
            .await
            .map_err(|e| not_found_as(e, id))?;
        info!(sport_id = %sport.id, name = %sport.name, "Sport deleted");

        Ok(SportResponse::from(sport))
    }

    pub async fn search_sport(&self, name: &str) -> Result<SportResponse> {
        let sport = self
            .repository()
            .find_by_name(name.trim())
            .await
            .map_err(|e| match e {
                StorageError::NotFound => {
                    ClubError::ResourceNotFound(format!("No sport named '{}'", name.trim()))
                }
                other => other.into(),
            })?;

        Ok(SportResponse::from(sport))
    }

    async fn find_sport(&self, id: &str) -> Result<Sport> {
        let sport_id = parse_id("Sport", id)?;
        self.repository()
            .find_by_id(sport_id)
            .await
            .map_err(|e| not_found_as(e, id))
    }

    async fn ensure_name_free(
        &self,
        repo: &SportRepository<'_>,
        name: &str,
        except: Option<&Sport>,
    ) -> Result<()> {
        if repo.name_taken(name, except.map(|s| s.id)).await? {
            warn!(name, "Sport name already in use");
            return Err(ClubError::Conflict(format!(
                "Sport '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

fn not_found_as(error: StorageError, id: &str) -> ClubError {
    match error {
        StorageError::NotFound => ClubError::not_found("Sport", id),
        other => other.into(),
    }
}

use serde::Deserialize;
use serde_json::Value;
use storage::{
    Database,
    dto::person::{CreatePersonRequest, PersonResponse, SportLevelRequest, UpdatePersonRequest},
    error::StorageError,
    models::{NormalizedName, Person, PersonKind},
    repository::{PersonRepository, PersonRepositoryFactory, SportRepository},
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{parse_id, record};
use crate::error::{ClubError, Result};

/// Validation and orchestration for people (plain persons, members, coaches).
#[derive(Debug, Clone)]
pub struct PersonController {
    db: Database,
}

impl PersonController {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn factory(&self) -> PersonRepositoryFactory<'_> {
        PersonRepositoryFactory::new(self.db.pool())
    }

    /// List people of the given type (everybody when `None`)
    pub async fn list_people(&self, person_type: Option<PersonKind>) -> Result<Vec<PersonResponse>> {
        let repo = self.factory().get_dao(person_type);
        let people = repo.list().await?;

        let mut responses = Vec::with_capacity(people.len());
        for person in people {
            responses.push(self.to_response(&repo, person).await?);
        }

        debug!(count = responses.len(), ?person_type, "Listed people");
        Ok(responses)
    }

    pub async fn get_person(
        &self,
        id: &str,
        person_type: Option<PersonKind>,
    ) -> Result<PersonResponse> {
        let repo = self.factory().get_dao(person_type);
        let person = find_person(&repo, id).await?;

        self.to_response(&repo, person).await
    }

    /// Create a person of the given type from a plain key/value record
    pub async fn create_person(
        &self,
        data: &Value,
        person_type: Option<PersonKind>,
    ) -> Result<PersonResponse> {
        let req = CreatePersonRequest::deserialize(record(data)?)?;
        req.validate()?;

        let kind = person_type.unwrap_or_default();
        match kind {
            PersonKind::Coach if req.contract.is_none() || req.degree.is_none() => {
                return Err(ClubError::InvalidData(
                    "contract and degree are required for a coach".to_string(),
                ));
            }
            PersonKind::Person | PersonKind::Member
                if req.contract.is_some() || req.degree.is_some() =>
            {
                return Err(ClubError::InvalidData(format!(
                    "contract and degree only apply to coaches, not to a {}",
                    kind
                )));
            }
            _ => {}
        }

        let repo = self.factory().get_dao(Some(kind));
        self.ensure_unique(
            &repo,
            &req.email,
            &NormalizedName::new(&req.firstname),
            &NormalizedName::new(&req.lastname),
            None,
        )
        .await?;

        let person = repo.create(&req).await?;
        info!(person_id = %person.id, %kind, "Person created");

        self.to_response(&repo, person).await
    }

    /// Update a person; keys missing from `data` are left untouched
    pub async fn update_person(&self, id: &str, data: &Value) -> Result<PersonResponse> {
        let req = UpdatePersonRequest::deserialize(record(data)?)?;
        req.validate()?;

        let repo = self.factory().get_dao(None);
        let existing = find_person(&repo, id).await?;

        if req.touches_coach_fields() && existing.kind() != PersonKind::Coach {
            return Err(ClubError::InvalidData(format!(
                "contract and degree only apply to coaches, not to a {}",
                existing.kind()
            )));
        }

        let firstname = NormalizedName::new(req.firstname.as_ref().unwrap_or(&existing.firstname));
        let lastname = NormalizedName::new(req.lastname.as_ref().unwrap_or(&existing.lastname));
        let email = req.email.as_ref().unwrap_or(&existing.email);
        self.ensure_unique(&repo, email, &firstname, &lastname, Some(existing.id))
            .await?;

        let person = repo.update(&existing, &req).await?;
        info!(person_id = %person.id, "Person updated");

        self.to_response(&repo, person).await
    }

    /// Delete a person, returning the record as it was before deletion
    pub async fn delete_person(&self, id: &str) -> Result<PersonResponse> {
        let repo = self.factory().get_dao(None);
        let person = find_person(&repo, id).await?;
        let person_id = person.id;
        let snapshot = self.to_response(&repo, person).await?;

        repo.delete(person_id)
            .await
            .map_err(|e| not_found_as(e, "Person", id))?;
        info!(%person_id, "Person deleted");

        Ok(snapshot)
    }

    /// Find a person by name (case-insensitive) within the given type
    pub async fn search_person(
        &self,
        firstname: &str,
        lastname: &str,
        person_type: Option<PersonKind>,
    ) -> Result<PersonResponse> {
        let repo = self.factory().get_dao(person_type);
        let person = repo
            .find_by_name(&NormalizedName::new(firstname), &NormalizedName::new(lastname))
            .await
            .map_err(|e| match e {
                StorageError::NotFound => ClubError::ResourceNotFound(format!(
                    "No {} named '{} {}'",
                    person_type.unwrap_or_default(),
                    firstname.trim(),
                    lastname.trim()
                )),
                other => other.into(),
            })?;

        self.to_response(&repo, person).await
    }

    /// Link a person to a sport with a skill level (or role)
    pub async fn add_sport_person(
        &self,
        person_id: &str,
        sport_id: &str,
        level: &str,
    ) -> Result<PersonResponse> {
        let level = SportLevelRequest {
            level: level.trim().to_string(),
        };
        level.validate()?;

        let repo = self.factory().get_dao(None);
        let person = find_person(&repo, person_id).await?;
        let sport_id = self.find_sport_id(sport_id).await?;

        if repo.has_sport(person.id, sport_id).await? {
            warn!(person_id = %person.id, %sport_id, "Sport already linked");
            return Err(ClubError::Conflict(format!(
                "{} {} already practices this sport",
                person.firstname, person.lastname
            )));
        }

        repo.add_sport(person.id, sport_id, &level.level).await?;
        info!(person_id = %person.id, %sport_id, skill_level = %level.level, "Sport added to person");

        self.to_response(&repo, person).await
    }

    /// Remove a person's link to a sport
    pub async fn delete_sport_person(
        &self,
        person_id: &str,
        sport_id: &str,
    ) -> Result<PersonResponse> {
        let repo = self.factory().get_dao(None);
        let person = find_person(&repo, person_id).await?;

        let linked = match Uuid::parse_str(sport_id.trim()) {
            Ok(sport_id) => repo.has_sport(person.id, sport_id).await?.then_some(sport_id),
            Err(_) => None,
        };
        let Some(sport_id) = linked else {
            warn!(person_id = %person.id, sport_id, "No such sport link");
            return Err(ClubError::Conflict(format!(
                "{} {} does not practice this sport",
                person.firstname, person.lastname
            )));
        };

        repo.remove_sport(person.id, sport_id).await?;
        info!(person_id = %person.id, %sport_id, "Sport removed from person");

        self.to_response(&repo, person).await
    }

    async fn ensure_unique(
        &self,
        repo: &PersonRepository<'_>,
        email: &str,
        firstname: &NormalizedName,
        lastname: &NormalizedName,
        except: Option<Uuid>,
    ) -> Result<()> {
        if repo.email_taken(email, except).await? {
            warn!(email, "Email already in use");
            return Err(ClubError::Conflict(format!(
                "Email '{}' is already in use",
                email
            )));
        }
        if repo.name_taken(firstname, lastname, except).await? {
            warn!(%firstname, %lastname, "Name already in use");
            return Err(ClubError::Conflict(format!(
                "A person named '{} {}' already exists",
                firstname, lastname
            )));
        }
        Ok(())
    }

    async fn find_sport_id(&self, sport_id: &str) -> Result<Uuid> {
        let id = parse_id("Sport", sport_id)?;
        let sport = SportRepository::new(self.db.pool())
            .find_by_id(id)
            .await
            .map_err(|e| not_found_as(e, "Sport", sport_id))?;
        Ok(sport.id)
    }

    async fn to_response(
        &self,
        repo: &PersonRepository<'_>,
        person: Person,
    ) -> Result<PersonResponse> {
        let address = repo.address(person.id).await?;
        let sports = repo.sports(person.id).await?;
        Ok(PersonResponse::new(person, address, sports))
    }
}

async fn find_person(repo: &PersonRepository<'_>, id: &str) -> Result<Person> {
    let person_id = parse_id("Person", id)?;
    repo.find_by_id(person_id)
        .await
        .map_err(|e| not_found_as(e, "Person", id))
}

fn not_found_as(error: StorageError, what: &str, id: &str) -> ClubError {
    match error {
        StorageError::NotFound => ClubError::not_found(what, id),
        other => other.into(),
    }
}

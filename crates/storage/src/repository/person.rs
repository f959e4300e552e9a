use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::dto::person::{AddressRequest, CreatePersonRequest, UpdatePersonRequest};
use crate::error::{Result, StorageError};
use crate::models::{Address, NormalizedName, Person, PersonKind, PersonSport, Role};

/// Repository for Person database operations.
///
/// A repository is bound to a subtype: with `kind == None` it sees every
/// person, otherwise only rows whose discriminator matches.
pub struct PersonRepository<'a> {
    pool: &'a SqlitePool,
    kind: Option<PersonKind>,
}

impl<'a> PersonRepository<'a> {
    /// Repository over every person, whatever the subtype
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool, kind: None }
    }

    /// Repository restricted to one subtype
    pub fn scoped(pool: &'a SqlitePool, kind: PersonKind) -> Self {
        Self {
            pool,
            kind: Some(kind),
        }
    }

    pub fn kind(&self) -> Option<PersonKind> {
        self.kind
    }

    /// List every person in scope
    pub async fn list(&self) -> Result<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, person_type, firstname, lastname, email, contract, degree, created_at
            FROM persons
            WHERE (? IS NULL OR person_type = ?)
            ORDER BY lastname, firstname
            "#,
        )
        .bind(self.kind)
        .bind(self.kind)
        .fetch_all(self.pool)
        .await?;

        Ok(people)
    }

    /// Find person by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, person_type, firstname, lastname, email, contract, degree, created_at
            FROM persons
            WHERE id = ? AND (? IS NULL OR person_type = ?)
            "#,
        )
        .bind(id)
        .bind(self.kind)
        .bind(self.kind)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(person)
    }

    /// Find person by (normalized) first and last name
    pub async fn find_by_name(
        &self,
        firstname: &NormalizedName,
        lastname: &NormalizedName,
    ) -> Result<Person> {
        let person = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, person_type, firstname, lastname, email, contract, degree, created_at
            FROM persons
            WHERE firstname = ? AND lastname = ? AND (? IS NULL OR person_type = ?)
            "#,
        )
        .bind(firstname.as_str())
        .bind(lastname.as_str())
        .bind(self.kind)
        .bind(self.kind)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(person)
    }

    /// Whether `email` belongs to someone other than `except`.
    /// Ignores the repository scope, emails are unique across subtypes.
    pub async fn email_taken(&self, email: &str, except: Option<Uuid>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE email = ? AND (? IS NULL OR id <> ?))",
        )
        .bind(email)
        .bind(except)
        .bind(except)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Whether the name pair belongs to someone other than `except`
    pub async fn name_taken(
        &self,
        firstname: &NormalizedName,
        lastname: &NormalizedName,
        except: Option<Uuid>,
    ) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM persons
                WHERE firstname = ? AND lastname = ? AND (? IS NULL OR id <> ?)
            )
            "#,
        )
        .bind(firstname.as_str())
        .bind(lastname.as_str())
        .bind(except)
        .bind(except)
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    /// Create a person of the repository's subtype, with its address if given
    pub async fn create(&self, req: &CreatePersonRequest) -> Result<Person> {
        let kind = self.kind.unwrap_or_default();
        let (contract, degree) = match kind {
            PersonKind::Coach => match (&req.contract, &req.degree) {
                (Some(contract), Some(degree)) => (Some(contract.as_str()), Some(degree.as_str())),
                _ => {
                    return Err(StorageError::ConstraintViolation(
                        "A coach needs a contract and a degree".to_string(),
                    ));
                }
            },
            PersonKind::Person | PersonKind::Member => (None, None),
        };

        let id = Uuid::new_v4();
        let firstname = NormalizedName::new(&req.firstname);
        let lastname = NormalizedName::new(&req.lastname);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO persons (id, person_type, firstname, lastname, email, contract, degree)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(kind)
        .bind(firstname.as_str())
        .bind(lastname.as_str())
        .bind(req.email.as_str())
        .bind(contract)
        .bind(degree)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Person already exists"))?;

        if let Some(address) = &req.address {
            replace_address(&mut tx, id, address).await?;
        }

        tx.commit().await?;

        debug!(%id, %kind, "person row inserted");

        self.find_by_id(id).await
    }

    /// Update an existing person; fields absent from `req` keep their value
    pub async fn update(&self, existing: &Person, req: &UpdatePersonRequest) -> Result<Person> {
        let firstname = NormalizedName::new(req.firstname.as_ref().unwrap_or(&existing.firstname));
        let lastname = NormalizedName::new(req.lastname.as_ref().unwrap_or(&existing.lastname));
        let email = req.email.as_ref().unwrap_or(&existing.email);
        let (contract, degree) = match &existing.role {
            Role::Coach { contract, degree } => (
                Some(req.contract.as_ref().unwrap_or(contract)),
                Some(req.degree.as_ref().unwrap_or(degree)),
            ),
            Role::Person | Role::Member => (None, None),
        };

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE persons
            SET firstname = ?,
                lastname = ?,
                email = ?,
                contract = ?,
                degree = ?
            WHERE id = ? AND (? IS NULL OR person_type = ?)
            "#,
        )
        .bind(firstname.as_str())
        .bind(lastname.as_str())
        .bind(email)
        .bind(contract)
        .bind(degree)
        .bind(existing.id)
        .bind(self.kind)
        .bind(self.kind)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::on_unique_violation(e, "Person already exists"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        if let Some(address) = &req.address {
            replace_address(&mut tx, existing.id, address).await?;
        }

        tx.commit().await?;

        self.find_by_id(existing.id).await
    }

    /// Delete a person by ID; address and sport links go with it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM persons WHERE id = ? AND (? IS NULL OR person_type = ?)")
                .bind(id)
                .bind(self.kind)
                .bind(self.kind)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn address(&self, person_id: Uuid) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT person_id, street, city, postal_code FROM addresses WHERE person_id = ?",
        )
        .bind(person_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// Sports practiced by a person, ordered by sport name
    pub async fn sports(&self, person_id: Uuid) -> Result<Vec<PersonSport>> {
        let sports = sqlx::query_as::<_, PersonSport>(
            r#"
            SELECT ps.person_id, ps.sport_id, s.name AS sport_name, ps.level
            FROM person_sports ps
            JOIN sports s ON s.id = ps.sport_id
            WHERE ps.person_id = ?
            ORDER BY s.name
            "#,
        )
        .bind(person_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn has_sport(&self, person_id: Uuid, sport_id: Uuid) -> Result<bool> {
        let linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM person_sports WHERE person_id = ? AND sport_id = ?)",
        )
        .bind(person_id)
        .bind(sport_id)
        .fetch_one(self.pool)
        .await?;

        Ok(linked)
    }

    /// Link a person to a sport at the given level
    pub async fn add_sport(&self, person_id: Uuid, sport_id: Uuid, level: &str) -> Result<()> {
        sqlx::query("INSERT INTO person_sports (person_id, sport_id, level) VALUES (?, ?, ?)")
            .bind(person_id)
            .bind(sport_id)
            .bind(level)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let error = StorageError::on_unique_violation(e, "Sport already linked to person");
                if error.is_foreign_key_violation() {
                    StorageError::NotFound
                } else {
                    error
                }
            })?;

        Ok(())
    }

    /// Remove a person's link to a sport
    pub async fn remove_sport(&self, person_id: Uuid, sport_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM person_sports WHERE person_id = ? AND sport_id = ?")
            .bind(person_id)
            .bind(sport_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn replace_address(
    conn: &mut SqliteConnection,
    person_id: Uuid,
    address: &AddressRequest,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO addresses (person_id, street, city, postal_code)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (person_id) DO UPDATE
        SET street = excluded.street,
            city = excluded.city,
            postal_code = excluded.postal_code
        "#,
    )
    .bind(person_id)
    .bind(address.street.trim())
    .bind(address.city.trim())
    .bind(address.postal_code.trim())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#![allow(dead_code)]

use club::{PersonController, SportController};
use serde_json::json;
use storage::{Database, dto::person::PersonResponse, dto::sport::SportResponse, models::PersonKind};

pub struct Club {
    pub people: PersonController,
    pub sports: SportController,
}

pub async fn club() -> Club {
    let db = Database::in_memory().await.unwrap();
    db.run_migrations().await.unwrap();

    Club {
        people: PersonController::new(db.clone()),
        sports: SportController::new(db),
    }
}

impl Club {
    pub async fn sport(&self, name: &str) -> SportResponse {
        self.sports
            .create_sport(&json!({ "name": name, "description": "" }))
            .await
            .unwrap()
    }

    pub async fn coach(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        contract: &str,
        degree: &str,
    ) -> PersonResponse {
        self.people
            .create_person(
                &json!({
                    "firstname": firstname,
                    "lastname": lastname,
                    "email": email,
                    "contract": contract,
                    "degree": degree,
                }),
                Some(PersonKind::Coach),
            )
            .await
            .unwrap()
    }

    pub async fn member(&self, firstname: &str, lastname: &str, email: &str) -> PersonResponse {
        self.people
            .create_person(
                &json!({ "firstname": firstname, "lastname": lastname, "email": email }),
                Some(PersonKind::Member),
            )
            .await
            .unwrap()
    }
}

mod common;

use club::ClubError;
use serde_json::json;
use storage::models::PersonKind;

use common::club;

const MEMBER: Option<PersonKind> = Some(PersonKind::Member);

#[tokio::test]
async fn test_list_members_excludes_coaches() {
    let club = club().await;
    club.member("rob", "stark", "rob.stark@winterfell.com").await;
    club.coach("john", "do", "john.do@mail.com", "CDI", "BPJEPS").await;

    let members = club.people.list_people(MEMBER).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].firstname, "rob");
    assert_eq!(members[0].kind, PersonKind::Member);
    assert!(members[0].contract.is_none());
}

#[tokio::test]
async fn test_member_login_by_name() {
    let club = club().await;
    let rob = club.member("Rob", "Stark", "rob.stark@winterfell.com").await;

    let member = club.people.search_person(" rob ", "stark", MEMBER).await.unwrap();
    assert_eq!(member.id, rob.id);

    let member = club.people.search_person("rob", "stark", None).await.unwrap();
    assert_eq!(member.id, rob.id);
}

#[tokio::test]
async fn test_member_not_found_as_coach() {
    let club = club().await;
    club.member("rob", "stark", "rob.stark@winterfell.com").await;

    let result = club
        .people
        .search_person("rob", "stark", Some(PersonKind::Coach))
        .await;
    assert!(matches!(result, Err(ClubError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_member_sports() {
    let club = club().await;
    let basket = club.sport("basket").await;
    let foot = club.sport("foot").await;
    let rob = club.member("rob", "stark", "rob.stark@winterfell.com").await;
    let id = rob.id.to_string();

    club.people
        .add_sport_person(&id, &foot.id.to_string(), "beginner")
        .await
        .unwrap();
    let member = club
        .people
        .add_sport_person(&id, &basket.id.to_string(), "expert")
        .await
        .unwrap();

    let names: Vec<&str> = member.sports.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["basket", "foot"]);

    let member = club
        .people
        .delete_sport_person(&id, &basket.id.to_string())
        .await
        .unwrap();
    assert_eq!(member.sports.len(), 1);
    assert_eq!(member.sports[0].level, "beginner");
}

#[tokio::test]
async fn test_member_cannot_get_coach_fields() {
    let club = club().await;
    let result = club
        .people
        .create_person(
            &json!({
                "firstname": "rob",
                "lastname": "stark",
                "email": "rob.stark@winterfell.com",
                "degree": "STAPS"
            }),
            MEMBER,
        )
        .await;
    assert!(matches!(result, Err(ClubError::InvalidData(_))));
}

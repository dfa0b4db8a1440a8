use companies_core::AppError;
use companies_core::models::NewUser;

use crate::integration::common::setup_test_db;

fn new_user(user_name: &str) -> NewUser {
    NewUser {
        first_name: Some("Jane".into()),
        last_name: Some("Doe".into()),
        user_name: user_name.into(),
        email: Some("jane@example.com".into()),
        phone_number: None,
        password_hash: "$argon2id$v=19$placeholder".into(),
        roles: vec!["Manager".into()],
    }
}

#[tokio::test]
async fn create_and_find_user() {
    let (db, _container) = setup_test_db().await;
    let repo = db.users();

    let created = repo.create(&new_user("jane")).await.unwrap();
    assert_eq!(created.roles, vec!["Manager".to_string()]);

    let found = repo.find_by_user_name("jane").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.email.as_deref(), Some("jane@example.com"));

    assert!(repo.find_by_user_name("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_user_name_is_conflict() {
    let (db, _container) = setup_test_db().await;
    let repo = db.users();

    repo.create(&new_user("jane")).await.unwrap();
    let err = repo.create(&new_user("jane")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

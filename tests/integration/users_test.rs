//! User directory constraints against PostgreSQL.

use chrono::Utc;
use uuid::Uuid;

use booker_core::error::ErrorKind;
use booker_entity::user::{CreateUser, User};

use crate::helpers::TestDb;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_conflict() {
    let db = TestDb::new().await;
    let existing = db.user().await;

    let twin = User::new(
        CreateUser {
            name: "Twin".to_string(),
            email: existing.email.clone(),
            telegram_id: None,
        },
        Utc::now(),
    );
    let err = db.stores.users.create_user(&twin).await.err().expect("conflict");
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "email already exists");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_lookup_by_email_and_id() {
    let db = TestDb::new().await;
    let user = db.user().await;

    let by_email = db.stores.users.find_user_by_email(&user.email).await.expect("query");
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_id = db.stores.users.find_user_by_id(user.id).await.expect("query");
    assert_eq!(by_id.map(|u| u.email), Some(user.email));

    let missing = db.stores.users.find_user_by_id(Uuid::new_v4()).await.expect("query");
    assert!(missing.is_none());
}

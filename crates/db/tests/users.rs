//! Integration tests for the credential store.

use portcullis_db::models::user::CreateUser;
use portcullis_db::repositories::UserRepo;
use sqlx::PgPool;

fn new_user(email: &str, username: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_by_id(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@b.com", "abc"))
        .await
        .unwrap();

    let found = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(found.email, "a@b.com");
    assert_eq!(found.username, "abc");
    assert_eq!(found.created_at, found.updated_at);

    let profile = UserRepo::find_profile(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.username, "abc");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_identifier_matches_email_or_username(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@b.com", "abc"))
        .await
        .unwrap();

    let by_email = UserRepo::find_by_identifier(&pool, "a@b.com").await.unwrap();
    let by_username = UserRepo::find_by_identifier(&pool, "abc").await.unwrap();
    let missing = UserRepo::find_by_identifier(&pool, "nobody").await.unwrap();

    assert_eq!(by_email.map(|u| u.id), Some(user.id));
    assert_eq!(by_username.map(|u| u.id), Some(user.id));
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identifier_lookup_is_case_sensitive(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@b.com", "abc"))
        .await
        .unwrap();

    let found = UserRepo::find_by_identifier(&pool, "A@B.COM").await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_match_wins_over_username_match(pool: PgPool) {
    // Usernames are alphanumeric at the API layer; insert directly to build
    // the ambiguous case.
    let first = UserRepo::create(&pool, &new_user("x@y.com", "first"))
        .await
        .unwrap();
    let second = UserRepo::create(&pool, &new_user("first", "second"))
        .await
        .unwrap();

    let found = UserRepo::find_by_identifier(&pool, "first")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, second.id);
    assert_ne!(found.id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_or_username_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@b.com", "abc"))
        .await
        .unwrap();

    for dup in [new_user("a@b.com", "other"), new_user("c@d.com", "abc")] {
        let err = UserRepo::create(&pool, &dup).await.unwrap_err();
        let db_err = err.as_database_error().expect("expected a database error");
        assert_eq!(db_err.code().as_deref(), Some("23505"));
    }

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exists_by_email_or_username(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@b.com", "abc"))
        .await
        .unwrap();

    assert!(UserRepo::exists_by_email_or_username(&pool, "a@b.com", "zzz").await.unwrap());
    assert!(UserRepo::exists_by_email_or_username(&pool, "z@z.com", "abc").await.unwrap());
    assert!(!UserRepo::exists_by_email_or_username(&pool, "z@z.com", "zzz").await.unwrap());
}

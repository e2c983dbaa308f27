//! Integration tests for the protected mock dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_with_cookie, login, session_cookie, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_returns_mock_data_for_session_user(pool: PgPool) {
    let user = create_user(&pool, "dash@example.com", "dashuser").await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "dash@example.com", TEST_PASSWORD).await;
    let cookie = session_cookie(&response);

    let response = get_with_cookie(app, "/api/dashboard", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Welcome to Dashboard");
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "dashuser");

    let data = &json["dashboardData"];
    assert_eq!(data["stats"]["totalUsers"], 150);
    assert_eq!(data["stats"]["revenue"], "$15,000");
    assert_eq!(data["recentActivity"].as_array().unwrap().len(), 4);
    assert_eq!(data["quickStats"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_rejects_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app, "/api/dashboard", "token=abc.def.ghi").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHENTICATED");
    assert_eq!(json["error"], "Invalid or expired token");
}

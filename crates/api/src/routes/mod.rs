pub mod auth;
pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public, rate limited)
/// /auth/register                                   register (public)
/// /auth/logout                                     logout (public)
/// /auth/profile                                    stored profile (auth required)
/// /auth/check                                      session check (auth required)
///
/// /dashboard                                       mock dashboard (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
}

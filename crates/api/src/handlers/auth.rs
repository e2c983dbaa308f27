//! Handlers for the `/auth` resource (login, register, logout, profile, check).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portcullis_core::error::CoreError;
use portcullis_core::types::DbId;
use portcullis_core::validation::{LoginInput, RegisterInput};
use portcullis_db::models::user::{CreateUser, UserProfile, UserSummary};
use portcullis_db::repositories::UserRepo;
use serde::Serialize;

use crate::auth::cookie::{build_cleared_session_cookie, build_session_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::middleware::rate_limit::LoginRateLimit;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful login body. The session token itself only travels in the cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub authenticated: bool,
    pub user: AuthUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email-or-username + password. Sets the session cookie.
/// Unknown identifiers and wrong passwords produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    limit: LoginRateLimit,
    JsonBody(input): JsonBody<LoginInput>,
) -> AppResult<impl IntoResponse> {
    // 1. Validate before touching the credential store.
    input.check()?;

    // 2. Find the user by email or username.
    let Some(user) = UserRepo::find_by_identifier(&state.pool, &input.email).await? else {
        tracing::info!(ip = %limit.ip, attempts = ?limit.attempts, "Login failed: unknown identifier");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    };

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(ip = %limit.ip, attempts = ?limit.attempts, "Login failed: wrong password");
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // 4. Mint the session token and hand it over as an HttpOnly cookie.
    let jwt = &state.config.jwt;
    let token = generate_session_token(user.id, &user.email, &user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = build_session_cookie(&token, jwt.expiry_secs(), state.config.cookie_secure);

    tracing::info!(user_id = user.id, ip = %limit.ip, "User logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Login successful",
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/auth/register
///
/// Create a new account. Does not log the new user in.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    input.check()?;

    if UserRepo::exists_by_email_or_username(&state.pool, &input.email, &input.username).await? {
        return Err(AppError::Core(CoreError::UserExists));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the unique
    // constraint violation maps to USER_EXISTS in `AppError`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            username: input.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: user.id,
        }),
    ))
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Idempotent and unauthenticated; the token
/// itself stays valid until expiry if a client kept a copy.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, build_cleared_session_cookie(state.config.cookie_secure))],
        Json(MessageResponse::new("Logout successful")),
    )
}

/// GET /api/auth/profile
///
/// Return the stored record for the authenticated user.
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_profile(&state.pool, auth_user.id)
        .await?
        .ok_or(AppError::Core(CoreError::UserNotFound { id: auth_user.id }))?;

    Ok(Json(ProfileResponse { user }))
}

/// GET /api/auth/check
///
/// Confirm the session is valid and echo the identity from the token.
pub async fn check(auth_user: AuthUser) -> Json<CheckResponse> {
    Json(CheckResponse {
        authenticated: true,
        user: auth_user,
    })
}

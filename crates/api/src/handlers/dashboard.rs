//! Handler for the mock dashboard.

use axum::Json;
use portcullis_core::dashboard::{mock_dashboard, DashboardData};
use serde::Serialize;

use crate::middleware::auth::AuthUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub message: &'static str,
    pub user: AuthUser,
    pub dashboard_data: DashboardData,
}

/// GET /api/dashboard
pub async fn get_dashboard(auth_user: AuthUser) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Welcome to Dashboard",
        user: auth_user,
        dashboard_data: mock_dashboard(),
    })
}

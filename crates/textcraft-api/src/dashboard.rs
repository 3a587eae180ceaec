use crate::{ApiResult, AppState, AuthContext};
use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;
use textcraft_core::DashboardSummary;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub data: DashboardSummary,
}

/// Dashboard aggregation for the signed-in user: counter total, saved
/// count, five most recent records, type distribution and the trailing
/// 7-day activity, anchored at now.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardResponse>> {
    let summary = state
        .store
        .dashboard_summary(auth.user_id, Utc::now())
        .await?;

    Ok(Json(DashboardResponse {
        success: true,
        data: summary,
    }))
}

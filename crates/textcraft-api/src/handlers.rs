use crate::{metrics, ApiError, ApiResult, AppState, AuthContext};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use textcraft_ai::{build_prompt, normalize, LlmProvider};
use textcraft_core::{
    Audience, EmailMetadata, Family, HistoryFilter, NewTransformation, OperationKind,
    TransformationRecord, TransformationStats, DEFAULT_PAGE_SIZE,
};
use tracing::error;
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize)]
pub struct TransformRequest {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct TransformResponse {
    pub success: bool,
    pub data: TransformationRecord,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub family: Option<String>,
    pub saved: Option<bool>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub pagination: Pagination,
    pub data: Vec<TransformationRecord>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: TransformationStats,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// Run one transformation end to end: validate, build the prompt, call the
/// generation backend, normalize, persist, bump the user counter.
pub async fn transform_text(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<TransformRequest>,
) -> ApiResult<Json<TransformResponse>> {
    let text = request.text.trim();
    let kind_tag = request.kind.as_deref().unwrap_or("").trim();
    if text.is_empty() || kind_tag.is_empty() {
        return Err(ApiError::Validation(
            "Please provide text and transformation type".to_string(),
        ));
    }

    let kind = OperationKind::parse_wire_tag(kind_tag);
    let audience = match request.audience.as_deref() {
        None | Some("") => Audience::default(),
        Some(raw) => raw.parse::<Audience>().map_err(ApiError::Core)?,
    };

    let prompt = build_prompt(text, &kind, audience);

    let timer = metrics::GENERATION_DURATION_SECONDS.start_timer();
    let raw = match state.llm.generate(&prompt).await {
        Ok(raw) => raw,
        Err(err) => {
            timer.observe_duration();
            metrics::GENERATION_FAILURES_TOTAL.inc();
            // full detail stays in the log; the caller gets the generic error
            error!(backend = %state.llm.backend(), error = %err, "generation call failed");
            return Err(ApiError::Core(textcraft_core::TextCraftError::Generation));
        }
    };
    timer.observe_duration();

    let normalized = normalize(&raw, &kind);

    let mut new = NewTransformation::new(auth.user_id, text.to_string(), normalized.text, kind.clone())
        .with_audience(audience)
        .with_tags(request.tags)
        .with_backend(state.llm.backend());

    match &kind {
        OperationKind::Email(email_kind) => {
            new = new.with_email_metadata(EmailMetadata {
                subject: request.subject.unwrap_or_default(),
                recipient: request.recipient.unwrap_or_default(),
                email_type: email_kind.as_str().to_string(),
            });
        }
        OperationKind::Insight(_) => {
            if let Some(data) = normalized.structured {
                new = new.with_analysis_data(data);
            }
        }
        OperationKind::Style(_) => {}
    }

    let record = state.store.create(new).await?;
    metrics::TRANSFORMATIONS_TOTAL.inc();

    Ok(Json(TransformResponse {
        success: true,
        data: record,
    }))
}

pub async fn transformation_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let kind = match query.kind.as_deref() {
        None | Some("") | Some("all") => None,
        Some(tag) => Some(OperationKind::parse_wire_tag(tag)),
    };
    let family = match query.family.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<Family>().map_err(ApiError::Core)?),
    };

    let filter = HistoryFilter {
        kind,
        family,
        saved_only: query.saved.unwrap_or(false),
        search: query.search.filter(|s| !s.is_empty()),
    };

    let history = state.store.list(auth.user_id, &filter, page, limit).await?;

    Ok(Json(HistoryResponse {
        success: true,
        count: history.records.len(),
        total: history.total,
        pagination: Pagination {
            page: history.page,
            limit: history.limit,
            pages: history.pages,
        },
        data: history.records,
    }))
}

pub async fn get_transformation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransformResponse>> {
    let id = parse_record_id(&id)?;
    let record = state.store.get(auth.user_id, id).await?;

    Ok(Json(TransformResponse {
        success: true,
        data: record,
    }))
}

pub async fn save_transformation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransformResponse>> {
    let id = parse_record_id(&id)?;
    let record = state.store.toggle_saved(auth.user_id, id).await?;

    Ok(Json(TransformResponse {
        success: true,
        data: record,
    }))
}

pub async fn delete_transformation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = parse_record_id(&id)?;
    state.store.delete(auth.user_id, id).await?;

    Ok(Json(json!({ "success": true, "data": {} })))
}

pub async fn transformation_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<StatsResponse>> {
    let stats = state.store.stats(auth.user_id).await?;

    Ok(Json(StatsResponse {
        success: true,
        data: stats,
    }))
}

pub async fn metrics_handler() -> (StatusCode, String) {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metrics::REGISTRY.gather(), &mut buffer) {
        error!("could not encode metrics: {}", e);
    }
    let body = String::from_utf8(buffer).unwrap_or_default();
    (StatusCode::OK, body)
}

/// Record ids are UUIDs; anything else is a bad request, not a 404.
fn parse_record_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid transformation ID format".to_string()))
}

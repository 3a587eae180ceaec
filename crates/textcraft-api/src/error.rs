use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use textcraft_core::TextCraftError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("TextCraft error: {0}")]
    Core(#[from] TextCraftError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Core(ref err) => match err {
                TextCraftError::NotFound => (StatusCode::NOT_FOUND, "Transformation not found".to_string()),
                TextCraftError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                // opaque by design: the cause is already logged server-side
                TextCraftError::Generation => (StatusCode::BAD_GATEWAY, err.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()),
            },
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        let not_found = ApiError::Core(TextCraftError::NotFound).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let validation = ApiError::Validation("empty text".into()).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let generation = ApiError::Core(TextCraftError::Generation).into_response();
        assert_eq!(generation.status(), StatusCode::BAD_GATEWAY);

        let store = ApiError::Core(TextCraftError::Store("down".into())).into_response();
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

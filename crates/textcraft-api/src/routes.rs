use crate::{auth, dashboard, handlers, AppState};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    // everything under /api requires a verified bearer identity
    let protected = Router::new()
        .route("/transform/text", post(handlers::transform_text))
        .route("/transform/history", get(handlers::transformation_history))
        .route("/transform/stats", get(handlers::transformation_stats))
        .route(
            "/transform/{id}",
            get(handlers::get_transformation).delete(handlers::delete_transformation),
        )
        .route("/transform/{id}/save", put(handlers::save_transformation))
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/api", protected)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}

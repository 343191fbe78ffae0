pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{create_attendance_handler, list_attendance_handler, ApiDoc};

use axum::{routing::get, Router};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application: the attendance routes, open CORS, and Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Any origin may read and write; there is no authentication to protect.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .route(
            "/attendance",
            get(list_attendance_handler).post(create_attendance_handler),
        )
        .layer(cors)
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

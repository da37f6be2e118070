use crate::auth::require_login;
use crate::handlers::{
    academic::academic_analysis,
    auth::{login, login_page, logout},
    dropdowns::{corporation_options, get_years, school_options},
    health::health_check,
    pages::dashboard_page,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Login flow
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        // Dashboard pages
        .route("/", get(dashboard_page))
        .route("/academic_analysis", get(dashboard_page))
        // Dashboard callbacks
        .route("/api/v1/years", get(get_years))
        .route("/api/v1/dropdowns/corporations", post(corporation_options))
        .route("/api/v1/dropdowns/schools", post(school_options))
        .route("/api/v1/academic-analysis", post(academic_analysis))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Every route above sits behind the login gate
        .layer(middleware::from_fn_with_state(state.clone(), require_login))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

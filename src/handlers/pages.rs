use axum::response::Html;
use tracing::trace;

const DASHBOARD_PAGE: &str = include_str!("../../templates/dashboard.html");

/// Dashboard shell. Serves both `/` and `/academic_analysis`; the page fills
/// itself from the dropdown and analysis callbacks.
pub async fn dashboard_page() -> Html<&'static str> {
    trace!("Serving dashboard page");
    Html(DASHBOARD_PAGE)
}

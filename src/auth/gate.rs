use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, trace, warn};

use super::session::{new_session_id, session_cookie, session_id};
use crate::schemas::{AppState, UnauthorizedResponse};

pub const LOGIN_PATH: &str = "/login";

/// Paths reachable without logging in
pub const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, "/health"];

/// Pages a user is sent back to after logging in
pub const DASHBOARD_PAGES: [&str; 2] = ["/", "/academic_analysis"];

/// Runs before every route. Unauthenticated GETs are redirected to the login
/// page, remembering dashboard pages as the post-login target. Any other
/// unauthenticated method gets a JSON 401 unless it targets the login form.
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if state.sessions.from_jar(&jar).await.is_some() {
        trace!("Authenticated request to {}", path);
        return next.run(request).await;
    }

    if request.method() != Method::GET {
        if path == LOGIN_PATH {
            return next.run(request).await;
        }
        warn!("Rejecting unauthenticated {} {}", request.method(), path);
        return (StatusCode::UNAUTHORIZED, Json(UnauthorizedResponse::default())).into_response();
    }

    if PUBLIC_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let mut jar = jar;
    if DASHBOARD_PAGES.contains(&path.as_str()) {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or(path.clone());
        debug!("Remembering {} for after login", target);

        let id = match session_id(&jar) {
            Some(id) => id,
            None => {
                let id = new_session_id();
                jar = jar.add(session_cookie(id.clone()));
                id
            }
        };
        state.sessions.remember_redirect(&id, target).await;
    }

    debug!("Redirecting unauthenticated request for {} to login", path);
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

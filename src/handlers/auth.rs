use axum::{
    extract::{Query, State, rejection::FormRejection},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::auth::{
    Session, verify_credentials,
    session::{removal_cookie, session_cookie, session_id},
};
use crate::schemas::AppState;

const LOGIN_PAGE: &str = include_str!("../../templates/login.html");

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username and/or password.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Login form fields. Missing fields deserialize as empty and fail the check.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query of the login page; `error` is set after a failed attempt
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

pub fn render_login_page(message: &str) -> Html<String> {
    Html(LOGIN_PAGE.replace("{{message}}", message))
}

fn login_failed() -> Response {
    Redirect::to("/login?error=1").into_response()
}

/// Login page, or the dashboard for a user who is already logged in
#[instrument(skip(state, jar))]
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    if state.sessions.from_jar(&jar).await.is_some() {
        debug!("Already logged in, redirecting to dashboard");
        return Redirect::to("/").into_response();
    }

    let message = if query.error.is_some() {
        INVALID_CREDENTIALS_MESSAGE
    } else {
        ""
    };
    render_login_page(message).into_response()
}

/// Credential check. On success the session is replaced by a fresh
/// authenticated one and the browser is sent to the page it originally asked for.
#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    trace!("Entering login function");
    let Ok(Form(form)) = form else {
        warn!("Login attempt with an unreadable form");
        return login_failed();
    };

    if form.username.is_empty() || form.password.is_empty() {
        debug!("Login attempt with missing credentials");
        return login_failed();
    }

    let user = match verify_credentials(&state.db, &form.username, &form.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Rejected login for '{}'", form.username);
            return login_failed();
        }
        Err(e) => {
            error!("Failed to verify credentials for '{}': {}", form.username, e);
            return login_failed();
        }
    };

    let mut target = "/".to_string();
    if let Some(old_id) = session_id(&jar) {
        if let Some(remembered) = state.sessions.take_redirect(&old_id).await {
            target = remembered;
        }
        state.sessions.remove(&old_id).await;
    }

    let id = state
        .sessions
        .create(Session::new(user.id, user.username.clone()))
        .await;
    info!("User '{}' logged in, redirecting to {}", user.username, target);

    (jar.add(session_cookie(id)), Redirect::to(&target)).into_response()
}

/// End the session and show the login page again
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some((_, session)) = state.sessions.from_jar(&jar).await {
        info!("User '{}' logged out", session.username);
    }
    if let Some(id) = session_id(&jar) {
        state.sessions.remove(&id).await;
    }

    (jar.remove(removal_cookie()), render_login_page(LOGGED_OUT_MESSAGE)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_message_slot() {
        let Html(page) = render_login_page(LOGGED_OUT_MESSAGE);
        assert!(page.contains("You have been logged out."));
        assert!(!page.contains("{{message}}"));

        let Html(page) = render_login_page("");
        assert!(!page.contains(INVALID_CREDENTIALS_MESSAGE));
    }
}

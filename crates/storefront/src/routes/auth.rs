//! Authentication route handlers.

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthService, Registration};
use crate::state::AppState;

/// Login and registration form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Register a new account and log it in.
///
/// A taken username answers 409 rather than an error.
#[instrument(skip(state, session, form), fields(username = %form.username.trim()))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let registration = AuthService::new(state.pool())
        .register(&form.username, &form.password)
        .await?;

    let response = match registration {
        Registration::Created(user) => {
            let current = CurrentUser::from(&user);
            set_current_user(&session, &current).await?;
            set_sentry_user(&user.id, user.username.as_str());
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "user": current })),
            )
                .into_response()
        }
        Registration::UsernameTaken => (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "error": "Username already taken." })),
        )
            .into_response(),
    };
    Ok(response)
}

/// Log in with a username and password.
#[instrument(skip(state, session, form), fields(username = %form.username.trim()))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    let user = AuthService::new(state.pool())
        .authenticate(&form.username, &form.password)
        .await?;

    let Some(user) = user else {
        tracing::info!("Login failed");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid username or password." })),
        )
            .into_response());
    };

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;
    set_sentry_user(&user.id, user.username.as_str());
    tracing::info!(user_id = %user.id, "Login succeeded");

    Ok(Json(json!({ "success": true, "user": current })).into_response())
}

/// Log out. Succeeds whether or not anyone was logged in.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Json(json!({ "success": true })))
}

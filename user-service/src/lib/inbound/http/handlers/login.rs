use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session_cookie;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<([(header::HeaderName, String); 1], ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = body?;

    let session = state
        .auth_service
        .login(Credentials {
            email: body.email,
            password: body.password,
        })
        .await?;

    let cookie = session_cookie::build(&session.token, session.max_age, state.session_cookie);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "Logged in".to_string(),
                expires_at: session.expires_at,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// The token itself only travels in the cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

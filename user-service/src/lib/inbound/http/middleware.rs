use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::session_cookie;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Gate for protected routes.
///
/// Resolves the session cookie to an [`AuthenticatedUser`] and stores it in
/// the request extensions. Every failure ends the request here with the same
/// 401 response; the wrapped handler never runs.
///
/// [`AuthenticatedUser`]: crate::domain::user::models::AuthenticatedUser
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = session_cookie::extract(req.headers()) else {
        tracing::debug!(uri = %req.uri(), "Missing session cookie");
        return Err(ApiError::unauthenticated());
    };

    let user = match state.auth_service.authenticate(&token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(uri = %req.uri(), error = %e, "Session rejected");
            return Err(ApiError::unauthenticated());
        }
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

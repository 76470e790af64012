use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn validate(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
) -> ApiSuccess<ValidateResponseData> {
    let identity = state.auth_service.validate(identity);

    ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData {
            user: (&identity).into(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub user: UserData,
}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError, Status};
use uuid::Uuid;
use validator::Validate;

use crate::{
    pkg::{
        internal::auth::{AuthToken, User},
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub token: Uuid,
    pub user_id: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<Json<SignupResponse>> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATE-001")
            .code(StatusCode::BAD_REQUEST)
            .interpolate_err(e.to_string())
    })?;
    let (user, token) = AuthToken::issue_user_token(&state, &input.email, &input.name).await?;
    tracing::info!("user {} signed up", &user.user_id);
    Ok(Json(SignupResponse {
        token,
        user_id: user.user_id,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<StatusCode> {
    AuthToken::expire_for_user(&state, &user.user_id).await?;
    tracing::info!("user {} logged out successfully", &user.name);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_input_validation() {
        let input = SignupInput {
            email: "not-an-email".into(),
            name: "Asha".into(),
        };
        assert!(input.validate().is_err());

        let input = SignupInput {
            email: "asha@example.com".into(),
            name: "".into(),
        };
        assert!(input.validate().is_err());

        let input = SignupInput {
            email: "asha@example.com".into(),
            name: "Asha".into(),
        };
        assert!(input.validate().is_ok());
    }
}

use crate::{conf::settings, pkg::server::state::AppState, prelude::Result};
use axum::http::StatusCode;
use sqlx::{
    prelude::{FromRow, Type},
    types::time::OffsetDateTime,
};
use standard_error::{StandardError, Status};
use uuid::Uuid;

#[derive(Debug, Type)]
#[sqlx(type_name = "token_status", rename_all = "lowercase")]
pub enum TokenStatus {
    Pending,
    Verified,
    Rejected,
    Expired,
}

#[derive(FromRow, Debug)]
pub struct AuthToken {
    pub token: Uuid,
    pub user_id: String,
    pub expiry: OffsetDateTime,
    pub status: TokenStatus,
}

#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl User {
    pub async fn create(state: &AppState, email: &str, name: &str) -> Result<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET name = $2
            RETURNING user_id, email, name
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(Uuid::new_v4().to_string())
        .fetch_one(&*state.db_pool)
        .await?;
        Ok(user)
    }

    pub async fn issue_token(&self, state: &AppState) -> Result<Uuid> {
        let token = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO tokens (token, user_id, expiry, status)
            VALUES ($1, $2, now() + make_interval(hours => $3), 'verified')
            "#,
        )
        .bind(token)
        .bind(&self.user_id)
        .bind(settings.token_ttl_hours as i32)
        .execute(&*state.db_pool)
        .await?;
        tracing::debug!("issued token for user {}", &self.user_id);
        Ok(token)
    }
}

pub fn parse_token(token_str: &str) -> Result<Uuid> {
    token_str
        .parse::<Uuid>()
        .map_err(|_| StandardError::new("ERR-AUTH-002").code(StatusCode::UNAUTHORIZED))
}

impl AuthToken {
    pub async fn issue_user_token(
        state: &AppState,
        email: &str,
        name: &str,
    ) -> Result<(User, Uuid)> {
        let user = User::create(state, email, name).await?;
        let token = user.issue_token(state).await?;
        Ok((user, token))
    }

    pub async fn check_token_validity(state: &AppState, token_str: &str) -> Result<User> {
        let token = parse_token(token_str)?;
        let result = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT token, user_id, expiry, status
            FROM tokens
            WHERE token = $1
            AND status = 'verified'
            AND expiry > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await;
        if let Ok(Some(token)) = result {
            let user = sqlx::query_as::<_, User>(
                "SELECT user_id, email, name FROM users WHERE user_id = $1",
            )
            .bind(&token.user_id)
            .fetch_one(&*state.db_pool)
            .await?;
            Ok(user)
        } else {
            Err(StandardError::new("ERR-AUTH-001").code(StatusCode::UNAUTHORIZED))
        }
    }

    pub async fn expire_for_user(state: &AppState, user_id: &str) -> Result<()> {
        sqlx::query(
            "UPDATE tokens SET status = 'expired' WHERE user_id = $1 AND status = 'verified'",
        )
        .bind(user_id)
        .execute(&*state.db_pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[traced_test]
    #[test]
    fn test_parse_token_rejects_garbage() {
        assert!(parse_token("not-a-uuid").is_err());
        assert!(parse_token("").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_token(&id.to_string()).unwrap(), id);
    }
}

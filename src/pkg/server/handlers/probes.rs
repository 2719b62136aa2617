use axum::extract::State;
use sqlx::query;
use standard_error::{Interpolate, StandardError};

use crate::{conf::settings, pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Result<()> {
    tracing::debug!("service is live");
    Ok(())
}

pub async fn healthz(State(state): State<AppState>) -> Result<()> {
    query("select 1").execute(&*state.db_pool).await?;
    state
        .s3_client
        .head_bucket()
        .bucket(&settings.s3_bucket_name)
        .send()
        .await
        .map_err(|e| StandardError::new("ERR-S3-000").interpolate_err(e.to_string()))?;
    tracing::debug!("service is healthy");
    Ok(())
}

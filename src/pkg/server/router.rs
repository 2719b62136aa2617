use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::auth::{logout, signup};
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::{conf::settings, pkg::internal::minio, prelude::Result};

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    minio::create_bucket(&state.s3_client, &settings.s3_bucket_name).await?;
    let app = Router::new()
        .route("/logout", post(logout))
        .route(
            "/resume",
            post(handlers::resumes::create).get(handlers::resumes::list),
        )
        .route("/resume/reviewable", get(handlers::resumes::list_reviewable))
        .route(
            "/resume/reviewable/:id",
            get(handlers::resumes::get_reviewable),
        )
        .route(
            "/resume/:id",
            get(handlers::resumes::get)
                .put(handlers::resumes::update)
                .delete(handlers::resumes::remove),
        )
        .route("/resume/:id/detail", get(handlers::resumes::get_with_detail))
        .route("/resume/:id/file", get(handlers::resumes::download_link))
        .route("/resume/:id/exists", get(handlers::resumes::exists))
        .route("/storage/upload", post(handlers::storage::upload))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/signup", post(signup))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}

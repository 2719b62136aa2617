use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use standard_error::{Interpolate, StandardError, Status};
use uuid::Uuid;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::resumes::{
                mutators::{CreateResumeData, UpdateResumeFields},
                spec::ResumeEntry,
            },
            auth::User,
            resumes::{ResumeAccess, ResumePage, ResumeWithDetail},
        },
        server::state::AppState,
    },
    prelude::Result,
};

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub object_key: String,
    #[serde(default)]
    pub is_reviewable: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub object_key: Option<String>,
    pub is_reviewable: Option<bool>,
}

#[derive(Serialize)]
pub struct DownloadLink {
    pub url: String,
}

fn validated<T: Validate>(input: T) -> Result<T> {
    input.validate().map_err(|e| {
        StandardError::new("ERR-VALIDATE-001")
            .code(StatusCode::BAD_REQUEST)
            .interpolate_err(e.to_string())
    })?;
    Ok(input)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<CreateResumeInput>,
) -> Result<Json<ResumeEntry>> {
    let input = validated(input)?;
    let resume = ResumeAccess::new(&state)
        .create(
            &user.user_id,
            CreateResumeData {
                title: input.title,
                object_key: input.object_key,
                is_reviewable: input.is_reviewable,
            },
        )
        .await?;
    Ok(Json(resume))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ResumePage>> {
    let page = ResumeAccess::new(&state)
        .list_mine(&user.user_id, query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<Json<ResumeEntry>> {
    let resume = ResumeAccess::new(&state)
        .get_mine(&user.user_id, resume_id)
        .await?;
    Ok(Json(resume))
}

pub async fn get_with_detail(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<Json<ResumeWithDetail>> {
    let resume = ResumeAccess::new(&state)
        .get_mine_with_detail(&user.user_id, resume_id)
        .await?;
    Ok(Json(resume))
}

pub async fn list_reviewable(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ResumePage>> {
    let page = ResumeAccess::new(&state)
        .list_reviewable(query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

pub async fn get_reviewable(
    State(state): State<AppState>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<Json<ResumeEntry>> {
    let resume = ResumeAccess::new(&state).get_reviewable(resume_id).await?;
    Ok(Json(resume))
}

pub async fn download_link(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<Json<DownloadLink>> {
    let url = ResumeAccess::new(&state)
        .download_link(&user.user_id, resume_id)
        .await?;
    Ok(Json(DownloadLink { url }))
}

pub async fn exists(
    State(state): State<AppState>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<Json<Value>> {
    let exists = ResumeAccess::new(&state).exists(resume_id).await?;
    Ok(Json(json!({ "exists": exists })))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(resume_id): AxumPath<Uuid>,
    Json(input): Json<UpdateResumeInput>,
) -> Result<Json<ResumeEntry>> {
    let input = validated(input)?;
    let resume = ResumeAccess::new(&state)
        .update(
            &user.user_id,
            resume_id,
            UpdateResumeFields {
                title: input.title,
                object_key: input.object_key,
                is_reviewable: input.is_reviewable,
            },
        )
        .await?;
    Ok(Json(resume))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    AxumPath(resume_id): AxumPath<Uuid>,
) -> Result<StatusCode> {
    ResumeAccess::new(&state)
        .remove(&user.user_id, resume_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_leaves_absent_fields_unset() {
        let input: UpdateResumeInput = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("New"));
        assert!(input.object_key.is_none());
        assert!(input.is_reviewable.is_none());
    }

    #[test]
    fn test_create_input_accepts_camel_case() {
        let input: CreateResumeInput = serde_json::from_str(
            r#"{"title": "Backend", "objectKey": "resumes/a.pdf", "isReviewable": true}"#,
        )
        .unwrap();
        assert_eq!(input.object_key, "resumes/a.pdf");
        assert!(input.is_reviewable);
        assert!(validated(input).is_ok());
    }

    #[test]
    fn test_create_input_requires_object_key() {
        let parsed: core::result::Result<CreateResumeInput, _> =
            serde_json::from_str(r#"{"title": "Backend"}"#);
        assert!(parsed.is_err());

        let input: CreateResumeInput =
            serde_json::from_str(r#"{"title": "", "objectKey": "resumes/a.pdf"}"#).unwrap();
        assert!(validated(input).is_err());
    }
}

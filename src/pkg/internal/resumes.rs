use axum::http::StatusCode;
use serde::Serialize;
use sqlx::PgConnection;
use standard_error::{StandardError, Status};
use uuid::Uuid;

use crate::{
    conf::settings,
    pkg::{
        internal::{
            adaptors::{
                resumes::{
                    mutators::{CreateResumeData, ResumeMutator, UpdateResumeFields},
                    selectors::ResumeSelector,
                    spec::ResumeEntry,
                },
                reviews::{selectors::ReviewSelector, spec::ReviewEntry},
            },
            minio::S3Ops,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub const SIGNED_URL_TTL_SECS: u64 = 3600;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub last_page: i64,
}

#[derive(Debug, Serialize)]
pub struct ResumePage {
    pub data: Vec<ResumeEntry>,
    pub metadata: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct ResumeWithDetail {
    #[serde(flatten)]
    pub resume: ResumeEntry,
    pub reviews: Vec<ReviewEntry>,
}

fn not_found() -> StandardError {
    StandardError::new("ERR-RESUME-001").code(StatusCode::NOT_FOUND)
}

fn last_page(total: i64, page_size: i64) -> i64 {
    (total + page_size - 1) / page_size
}

//wrong id and wrong owner are indistinguishable to the caller
async fn owned(pool: &mut PgConnection, owner_id: &str, resume_id: Uuid) -> Result<ResumeEntry> {
    ResumeSelector::new(pool)
        .get_for_owner(owner_id, resume_id)
        .await?
        .ok_or_else(not_found)
}

pub struct ResumeAccess<'a> {
    state: &'a AppState,
}

impl<'a> ResumeAccess<'a> {
    pub fn new(state: &'a AppState) -> Self {
        ResumeAccess { state }
    }

    pub async fn create(&self, owner_id: &str, data: CreateResumeData) -> Result<ResumeEntry> {
        //the referenced object must already live in the store, checked
        //strictly before anything is persisted
        self.state
            .s3_client
            .object_exists(&settings.s3_bucket_name, &data.object_key)
            .await?;
        let mut tx = self.state.db_pool.begin_txn().await?;
        let resume = ResumeMutator::new(&mut tx).create(owner_id, &data).await?;
        tx.commit().await?;
        tracing::info!("resume {} created for user {}", &resume.id, owner_id);
        Ok(resume)
    }

    pub async fn download_link(&self, requester_id: &str, resume_id: Uuid) -> Result<String> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        let resume = ResumeSelector::new(&mut tx)
            .get_by_id(resume_id)
            .await?
            .ok_or_else(not_found)?;
        if !resume.is_reviewable && resume.user_id != requester_id {
            return Err(StandardError::new("ERR-RESUME-002").code(StatusCode::BAD_REQUEST));
        }
        self.state
            .s3_client
            .signed_url(
                &settings.s3_bucket_name,
                &resume.object_key,
                SIGNED_URL_TTL_SECS,
            )
            .await
    }

    pub async fn list_mine(&self, owner_id: &str, page: i64) -> Result<ResumePage> {
        let page = page.max(1);
        let take = settings.page_size as i64;
        let mut tx = self.state.db_pool.begin_txn().await?;
        let mut selector = ResumeSelector::new(&mut tx);
        let total = selector.count_for_owner(owner_id).await?;
        let data = selector
            .list_for_owner(owner_id, (page - 1) * take, take)
            .await?;
        Ok(ResumePage {
            data,
            metadata: PageMeta {
                total,
                page,
                last_page: last_page(total, take),
            },
        })
    }

    pub async fn get_mine(&self, owner_id: &str, resume_id: Uuid) -> Result<ResumeEntry> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        owned(&mut tx, owner_id, resume_id).await
    }

    pub async fn list_reviewable(&self, page: i64) -> Result<ResumePage> {
        let page = page.max(1);
        let take = settings.page_size as i64;
        let mut tx = self.state.db_pool.begin_txn().await?;
        let mut selector = ResumeSelector::new(&mut tx);
        let total = selector.count_reviewable().await?;
        let data = selector.list_reviewable((page - 1) * take, take).await?;
        Ok(ResumePage {
            data,
            metadata: PageMeta {
                total,
                page,
                last_page: last_page(total, take),
            },
        })
    }

    pub async fn get_reviewable(&self, resume_id: Uuid) -> Result<ResumeEntry> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        ResumeSelector::new(&mut tx)
            .get_reviewable(resume_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn get_mine_with_detail(
        &self,
        owner_id: &str,
        resume_id: Uuid,
    ) -> Result<ResumeWithDetail> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        let resume = owned(&mut tx, owner_id, resume_id).await?;
        let reviews = ReviewSelector::new(&mut tx)
            .list_for_resume(resume.id)
            .await?;
        Ok(ResumeWithDetail { resume, reviews })
    }

    //absence is a failure here, not a false
    pub async fn exists(&self, resume_id: Uuid) -> Result<bool> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        ResumeSelector::new(&mut tx)
            .get_by_id(resume_id)
            .await?
            .map(|_| true)
            .ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        owner_id: &str,
        resume_id: Uuid,
        fields: UpdateResumeFields,
    ) -> Result<ResumeEntry> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        let current = owned(&mut tx, owner_id, resume_id).await?;
        if fields.is_empty() {
            return Ok(current);
        }
        if let Some(key) = &fields.object_key {
            self.state
                .s3_client
                .object_exists(&settings.s3_bucket_name, key)
                .await?;
        }
        let resume = ResumeMutator::new(&mut tx).update(resume_id, &fields).await?;
        tx.commit().await?;
        Ok(resume)
    }

    pub async fn remove(&self, owner_id: &str, resume_id: Uuid) -> Result<()> {
        let mut tx = self.state.db_pool.begin_txn().await?;
        owned(&mut tx, owner_id, resume_id).await?;
        let affected = ResumeMutator::new(&mut tx).delete(resume_id).await?;
        if affected == 0 {
            //the row vanished between the ownership check and the delete
            return Err(not_found());
        }
        tx.commit().await?;
        tracing::info!("resume {} removed by user {}", &resume_id, owner_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_rounds_up() {
        assert_eq!(last_page(25, 10), 3);
        assert_eq!(last_page(20, 10), 2);
        assert_eq!(last_page(1, 10), 1);
        assert_eq!(last_page(0, 10), 0);
    }

    #[test]
    fn test_page_meta_shape() {
        let meta = PageMeta {
            total: 25,
            page: 2,
            last_page: 3,
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["lastPage"], 3);
        assert_eq!(value["total"], 25);
        assert_eq!(value["page"], 2);
    }
}

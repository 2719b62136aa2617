use crate::pkg::internal::adaptors::resumes::spec::ResumeEntry;
use crate::prelude::Result;
use sqlx::PgConnection;
use uuid::Uuid;

pub struct ResumeSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeSelector { pool }
    }

    pub async fn get_by_id(&mut self, resume_id: Uuid) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, user_id, title, object_key, is_reviewable, created_at, updated_at
             FROM resumes WHERE id = $1",
        )
        .bind(resume_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_for_owner(
        &mut self,
        owner_id: &str,
        resume_id: Uuid,
    ) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, user_id, title, object_key, is_reviewable, created_at, updated_at
             FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(resume_id)
        .bind(owner_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_reviewable(&mut self, resume_id: Uuid) -> Result<Option<ResumeEntry>> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, user_id, title, object_key, is_reviewable, created_at, updated_at
             FROM resumes WHERE id = $1 AND is_reviewable",
        )
        .bind(resume_id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn count_for_owner(&mut self, owner_id: &str) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM resumes WHERE user_id = $1")
            .bind(owner_id)
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(total)
    }

    pub async fn list_for_owner(
        &mut self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ResumeEntry>> {
        let rows = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, user_id, title, object_key, is_reviewable, created_at, updated_at
             FROM resumes WHERE user_id = $1
             ORDER BY created_at ASC OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_reviewable(&mut self) -> Result<i64> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT count(*) FROM resumes WHERE is_reviewable")
                .fetch_one(&mut *self.pool)
                .await?;
        Ok(total)
    }

    pub async fn list_reviewable(&mut self, offset: i64, limit: i64) -> Result<Vec<ResumeEntry>> {
        let rows = sqlx::query_as::<_, ResumeEntry>(
            "SELECT id, user_id, title, object_key, is_reviewable, created_at, updated_at
             FROM resumes WHERE is_reviewable
             ORDER BY created_at ASC OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}

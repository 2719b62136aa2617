use crate::{pkg::internal::adaptors::resumes::spec::ResumeEntry, prelude::Result};
use sqlx::PgConnection;
use uuid::Uuid;

pub struct CreateResumeData {
    pub title: String,
    pub object_key: String,
    pub is_reviewable: bool,
}

//only fields present are applied, the rest keep their stored value
#[derive(Debug, Default)]
pub struct UpdateResumeFields {
    pub title: Option<String>,
    pub object_key: Option<String>,
    pub is_reviewable: Option<bool>,
}

impl UpdateResumeFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.object_key.is_none() && self.is_reviewable.is_none()
    }
}

pub struct ResumeMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ResumeMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ResumeMutator { pool }
    }

    pub async fn create(&mut self, owner_id: &str, data: &CreateResumeData) -> Result<ResumeEntry> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            r#"
            INSERT INTO resumes (id, user_id, title, object_key, is_reviewable)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, object_key, is_reviewable, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&data.title)
        .bind(&data.object_key)
        .bind(data.is_reviewable)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &mut self,
        resume_id: Uuid,
        fields: &UpdateResumeFields,
    ) -> Result<ResumeEntry> {
        let row = sqlx::query_as::<_, ResumeEntry>(
            r#"
            UPDATE resumes
            SET title = COALESCE($2, title),
                object_key = COALESCE($3, object_key),
                is_reviewable = COALESCE($4, is_reviewable),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, user_id, title, object_key, is_reviewable, created_at, updated_at
            "#,
        )
        .bind(resume_id)
        .bind(&fields.title)
        .bind(&fields.object_key)
        .bind(fields.is_reviewable)
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, resume_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(resume_id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_detected() {
        let fields = UpdateResumeFields::default();
        assert!(fields.is_empty());
        let fields = UpdateResumeFields {
            title: Some("New".into()),
            ..Default::default()
        };
        assert!(!fields.is_empty());
    }
}

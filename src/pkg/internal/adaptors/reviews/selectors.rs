use crate::pkg::internal::adaptors::reviews::spec::ReviewEntry;
use crate::prelude::Result;
use sqlx::PgConnection;
use uuid::Uuid;

pub struct ReviewSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> ReviewSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        ReviewSelector { pool }
    }

    pub async fn list_for_resume(&mut self, resume_id: Uuid) -> Result<Vec<ReviewEntry>> {
        let rows = sqlx::query_as::<_, ReviewEntry>(
            "SELECT id, resume_id, reviewer_id, comment, created_at
             FROM reviews WHERE resume_id = $1 ORDER BY created_at ASC",
        )
        .bind(resume_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}

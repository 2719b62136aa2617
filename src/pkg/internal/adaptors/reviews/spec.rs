use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub reviewer_id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

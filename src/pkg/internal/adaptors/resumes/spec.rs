use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEntry {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub object_key: String,
    pub is_reviewable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = ResumeEntry {
            id: Uuid::new_v4(),
            user_id: "u-1".into(),
            title: "Backend Engineer".into(),
            object_key: "resumes/abc.pdf".into(),
            is_reviewable: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("objectKey").is_some());
        assert!(value.get("isReviewable").is_some());
        assert!(value.get("userId").is_some());
        assert!(value.get("object_key").is_none());
    }
}

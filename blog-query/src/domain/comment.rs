use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: i64, post_id: i64, author_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id,
            author_id,
            created_at,
        }
    }
}

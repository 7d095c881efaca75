use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: i64,
        author_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title: title.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Case-insensitive substring match over title and content.
    pub fn mentions(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.content.to_lowercase().contains(needle_lowercase)
    }
}

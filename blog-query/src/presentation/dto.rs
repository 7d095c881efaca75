use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ======================= SEARCH =======================

/// Lightweight projection of a post returned by searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
}

// ======================= REPORT =======================

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostReportRow {
    pub post_id: i64,
    pub author_name: String,
    pub comment_count: i64,
    pub latest_comment_author: Option<String>,
}

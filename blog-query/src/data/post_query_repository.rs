use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::query::{PostSearchSpec, ReportSpec, SortDirection, SortKey};
use crate::presentation::dto::{PostReportRow, PostSummary};

/// Read-only query boundary over posts, authors and comments.
///
/// Implementations evaluate the whole specification themselves; callers never
/// receive entity records, only projections.
#[async_trait]
pub trait PostQueryRepository: Send + Sync {
    /// Report rows ordered by post id ascending, pulled one at a time.
    fn post_report_rows(
        &self,
        spec: ReportSpec,
    ) -> BoxStream<'_, Result<PostReportRow, DomainError>>;

    async fn post_summaries(&self, spec: &PostSearchSpec) -> Result<Vec<PostSummary>, DomainError>;
}

const REPORT_SQL: &str = r#"
    SELECT
        p.id AS post_id,
        a.name AS author_name,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
        (
            SELECT ca.name
            FROM comments c
            JOIN authors ca ON ca.id = c.author_id
            WHERE c.post_id = p.id
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT 1
        ) AS latest_comment_author
    FROM posts p
    JOIN authors a ON a.id = p.author_id
    ORDER BY p.id ASC
    LIMIT $1
"#;

const SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.created_at, a.name AS author_name
    FROM posts p
    JOIN authors a ON a.id = p.author_id
"#;

// Backslash is the default LIKE escape character in PostgreSQL.
const SUMMARY_FILTER: &str = "WHERE (p.title ILIKE $3 OR p.content ILIKE $3)";

fn order_column(key: SortKey) -> &'static str {
    match key {
        SortKey::Id => "p.id",
        SortKey::Title => "p.title",
        SortKey::CreatedAt => "p.created_at",
        SortKey::AuthorName => "a.name",
    }
}

fn order_by_clause(key: SortKey, direction: SortDirection) -> String {
    let dir = match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    match key {
        SortKey::Id => format!("ORDER BY p.id {dir}"),
        key => format!("ORDER BY {} {dir}, p.id {dir}", order_column(key)),
    }
}

/// Builds the search statement. `$1` = limit, `$2` = offset, `$3` = pattern (only when filtered).
fn summary_sql(spec: &PostSearchSpec) -> String {
    let filter = if spec.filter.is_some() {
        SUMMARY_FILTER
    } else {
        ""
    };
    format!(
        "{SUMMARY_SELECT} {filter} {} LIMIT $1 OFFSET $2",
        order_by_clause(spec.sort_key, spec.direction)
    )
}

#[derive(Clone)]
pub struct PostgresPostQueryRepository {
    pool: PgPool,
}

impl PostgresPostQueryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostQueryRepository for PostgresPostQueryRepository {
    fn post_report_rows(
        &self,
        spec: ReportSpec,
    ) -> BoxStream<'_, Result<PostReportRow, DomainError>> {
        debug!(max_items = spec.max_items, "streaming post report rows");
        sqlx::query_as::<_, PostReportRow>(REPORT_SQL)
            .bind(i64::from(spec.max_items))
            .fetch(&self.pool)
            .map_err(DomainError::from)
            .boxed()
    }

    async fn post_summaries(
        &self,
        spec: &PostSearchSpec,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let sql = summary_sql(spec);
        debug!(
            sort_key = %spec.sort_key,
            skip = spec.skip,
            take = spec.take,
            filtered = spec.filter.is_some(),
            "fetching post summaries"
        );

        let mut query = sqlx::query_as::<_, PostSummary>(&sql)
            .bind(i64::from(spec.take))
            .bind(i64::from(spec.skip));
        if let Some(filter) = &spec.filter {
            query = query.bind(filter.like_pattern());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

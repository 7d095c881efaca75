use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::data::post_query_repository::PostQueryRepository;
use crate::domain::author::Author;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::query::{PostSearchSpec, ReportSpec, SortDirection, SortKey};
use crate::presentation::dto::{PostReportRow, PostSummary};

/// Records held by an [`InMemoryPostQueryRepository`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub authors: Vec<Author>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Dataset {
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post);
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }
}

struct Store {
    authors: HashMap<i64, Author>,
    // sorted by id
    posts: Vec<Post>,
    comments_by_post: HashMap<i64, Vec<Comment>>,
}

/// In-process store evaluating query specifications with the same semantics
/// as the PostgreSQL statements: inner joins on authors, id tie-breakers.
#[derive(Clone)]
pub struct InMemoryPostQueryRepository {
    store: Arc<Store>,
}

impl InMemoryPostQueryRepository {
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            authors,
            mut posts,
            comments,
        } = dataset;

        posts.sort_by_key(|post| post.id);
        let authors = authors
            .into_iter()
            .map(|author| (author.id, author))
            .collect();
        let mut comments_by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in comments {
            comments_by_post
                .entry(comment.post_id)
                .or_default()
                .push(comment);
        }

        Self {
            store: Arc::new(Store {
                authors,
                posts,
                comments_by_post,
            }),
        }
    }
}

impl Store {
    fn author_name(&self, id: i64) -> Option<&str> {
        self.authors.get(&id).map(|author| author.name.as_str())
    }

    fn report_row(&self, post: &Post) -> Option<PostReportRow> {
        let author_name = self.author_name(post.author_id)?;
        let comments = self
            .comments_by_post
            .get(&post.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let latest_comment_author = comments
            .iter()
            .filter_map(|comment| self.author_name(comment.author_id).map(|name| (comment, name)))
            .max_by(|(a, _), (b, _)| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(_, name)| name.to_string());

        Some(PostReportRow {
            post_id: post.id,
            author_name: author_name.to_string(),
            comment_count: comments.len() as i64,
            latest_comment_author,
        })
    }

    fn summary(&self, post: &Post) -> Option<PostSummary> {
        let author_name = self.author_name(post.author_id)?;
        Some(PostSummary {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at,
            author_name: author_name.to_string(),
        })
    }
}

fn compare_summaries(
    a: &PostSummary,
    b: &PostSummary,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let primary = match key {
        SortKey::Id => Ordering::Equal,
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::AuthorName => a.author_name.cmp(&b.author_name),
    };
    let ordering = primary.then_with(|| a.id.cmp(&b.id));
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[async_trait]
impl PostQueryRepository for InMemoryPostQueryRepository {
    fn post_report_rows(
        &self,
        spec: ReportSpec,
    ) -> BoxStream<'_, Result<PostReportRow, DomainError>> {
        let store = self.store.as_ref();
        let rows = store
            .posts
            .iter()
            .filter_map(move |post| store.report_row(post))
            .take(spec.max_items as usize)
            .map(Ok::<_, DomainError>);
        stream::iter(rows).boxed()
    }

    async fn post_summaries(
        &self,
        spec: &PostSearchSpec,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let needle = spec
            .filter
            .as_ref()
            .map(|filter| filter.text().to_lowercase());

        let mut matches: Vec<PostSummary> = self
            .store
            .posts
            .iter()
            .filter(|post| needle.as_deref().is_none_or(|needle| post.mentions(needle)))
            .filter_map(|post| self.store.summary(post))
            .collect();
        matches.sort_by(|a, b| compare_summaries(a, b, spec.sort_key, spec.direction));

        Ok(matches
            .into_iter()
            .skip(spec.skip as usize)
            .take(spec.take as usize)
            .collect())
    }
}

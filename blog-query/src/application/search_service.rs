use std::sync::Arc;

use tracing::{error, instrument, warn};

use crate::data::post_query_repository::PostQueryRepository;
use crate::domain::error::DomainError;
use crate::domain::query::{PostSearchSpec, SearchFilter, SortDirection, SortKey};
use crate::presentation::dto::PostSummary;

pub const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(Clone)]
pub struct SearchService<R: PostQueryRepository + 'static> {
    repo: Arc<R>,
}

impl<R> SearchService<R>
where
    R: PostQueryRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Newest matching posts first, at most `max_results` (default 50).
    /// A blank query matches every post.
    #[instrument(skip(self))]
    pub async fn search_post_summaries(
        &self,
        query: Option<&str>,
        max_results: Option<u32>,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if max_results == 0 {
            warn!("rejected search with max_results = 0");
            return Err(DomainError::InvalidArgument(
                "max_results must be positive".into(),
            ));
        }

        let spec = PostSearchSpec::newest_first(SearchFilter::parse(query), max_results);
        self.fetch(&spec).await
    }

    /// The `take` posts after skipping `skip`, ordered by `sort_key`.
    #[instrument(skip(self))]
    pub async fn search_post_summaries_paged(
        &self,
        query: Option<&str>,
        skip: u32,
        take: u32,
        sort_key: SortKey,
        descending: bool,
    ) -> Result<Vec<PostSummary>, DomainError> {
        let spec = PostSearchSpec::paged(
            SearchFilter::parse(query),
            skip,
            take,
            sort_key,
            SortDirection::from_descending(descending),
        );
        self.fetch(&spec).await
    }

    async fn fetch(&self, spec: &PostSearchSpec) -> Result<Vec<PostSummary>, DomainError> {
        self.repo.post_summaries(spec).await.map_err(|e| {
            error!(error = %e, sort_key = %spec.sort_key, "error searching post summaries");
            e
        })
    }
}

//! Reporting and search over blog posts, authors and comments.
//!
//! Services compose immutable query specifications and hand them to a
//! [`PostQueryRepository`](data::post_query_repository::PostQueryRepository),
//! which evaluates filter, ordering, aggregation and paging on the store side.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::report_service::ReportService;
pub use application::search_service::{DEFAULT_MAX_RESULTS, SearchService};
pub use data::memory_repository::{Dataset, InMemoryPostQueryRepository};
pub use data::post_query_repository::{PostQueryRepository, PostgresPostQueryRepository};
pub use domain::error::{DomainError, ErrorKind};
pub use domain::query::{SearchFilter, SortDirection, SortKey};
pub use presentation::dto::{PostReportRow, PostSummary};

pub mod memory_repository;
pub mod post_query_repository;

pub mod report_service;
pub mod search_service;

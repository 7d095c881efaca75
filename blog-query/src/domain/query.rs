//! Immutable query specifications handed to a [`PostQueryRepository`].
//!
//! A specification describes filter, ordering and paging as one value; the
//! repository evaluates it as a single operation on the store side.
//!
//! [`PostQueryRepository`]: crate::data::post_query_repository::PostQueryRepository

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Normalized free-text filter. Only constructed from non-blank input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    text: String,
}

impl SearchFilter {
    /// Trims the raw query; `None`, empty and whitespace-only input mean "no filter".
    pub fn parse(query: Option<&str>) -> Option<Self> {
        query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| Self { text: q.to_string() })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `ILIKE` pattern matching the text literally anywhere in a column.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for ch in self.text.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

/// Fields of a post summary that the store can order by natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Title,
    CreatedAt,
    AuthorName,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Id,
        SortKey::Title,
        SortKey::CreatedAt,
        SortKey::AuthorName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::CreatedAt => "created_at",
            SortKey::AuthorName => "author_name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "created_at" | "createdat" => Ok(SortKey::CreatedAt),
            "author_name" | "authorname" => Ok(SortKey::AuthorName),
            _ => Err(DomainError::UnsupportedSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Filter + projection + ordering + paging for a post summary search.
///
/// Ordering always ends with the post id in the same direction as the primary
/// key, so equal keys come back in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSearchSpec {
    pub filter: Option<SearchFilter>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub skip: u32,
    pub take: u32,
}

impl PostSearchSpec {
    /// Newest posts first, first `take` matches.
    pub fn newest_first(filter: Option<SearchFilter>, take: u32) -> Self {
        Self {
            filter,
            sort_key: SortKey::CreatedAt,
            direction: SortDirection::Descending,
            skip: 0,
            take,
        }
    }

    pub fn paged(
        filter: Option<SearchFilter>,
        skip: u32,
        take: u32,
        sort_key: SortKey,
        direction: SortDirection,
    ) -> Self {
        Self {
            filter,
            sort_key,
            direction,
            skip,
            take,
        }
    }
}

/// Posts ordered by id ascending, at most `max_items` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSpec {
    pub max_items: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_mean_no_filter() {
        assert_eq!(SearchFilter::parse(None), None);
        assert_eq!(SearchFilter::parse(Some("")), None);
        assert_eq!(SearchFilter::parse(Some("  \t\n ")), None);
    }

    #[test]
    fn query_is_trimmed() {
        let filter = SearchFilter::parse(Some("  hello world ")).unwrap();
        assert_eq!(filter.text(), "hello world");
        assert_eq!(filter.like_pattern(), "%hello world%");
    }

    #[test]
    fn like_wildcards_in_user_text_are_escaped() {
        let filter = SearchFilter::parse(Some(r"50%_off\now")).unwrap();
        assert_eq!(filter.like_pattern(), r"%50\%\_off\\now%");
    }

    #[test]
    fn sort_keys_parse_case_insensitively() {
        assert_eq!("Title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("createdAt".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert_eq!("created_at".parse::<SortKey>().unwrap(), SortKey::CreatedAt);
        assert_eq!(" author_name ".parse::<SortKey>().unwrap(), SortKey::AuthorName);
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let err = "content".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedSortKey(ref key) if key == "content"));
        assert!(err.is_bad_request());
    }
}

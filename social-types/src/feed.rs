use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::SortDirection;

pub const DEFAULT_FEED_LIMIT: i64 = 20;
pub const MAX_FEED_LIMIT: i64 = 20;
pub const MAX_FEED_TAGS: usize = 5;
pub const MAX_SEARCH_CHARS: usize = 100;

/// Pagination and filter options for a user's feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub limit: i64,
    pub offset: i64,
    pub sort: SortDirection,
    /// Keep posts sharing at least one of these tags; empty disables the filter
    #[serde(default)]
    pub tags: Vec<String>,
    /// Case-insensitive substring of title or content; empty matches everything
    #[serde(default)]
    pub search: String,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
            offset: 0,
            sort: SortDirection::default(),
            tags: Vec::new(),
            search: String::new(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedQueryError {
    #[error("limit must be between 1 and 20, got {0}")]
    Limit(i64),

    #[error("offset must not be negative, got {0}")]
    Offset(i64),

    #[error("at most 5 tags may be given, got {0}")]
    TooManyTags(usize),

    #[error("search must be at most 100 characters, got {0}")]
    SearchTooLong(usize),
}

impl FeedQuery {
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Check the bounds applied before a feed query is run
    pub fn validate(&self) -> Result<(), FeedQueryError> {
        if !(1..=MAX_FEED_LIMIT).contains(&self.limit) {
            return Err(FeedQueryError::Limit(self.limit));
        }
        if self.offset < 0 {
            return Err(FeedQueryError::Offset(self.offset));
        }
        if self.tags.len() > MAX_FEED_TAGS {
            return Err(FeedQueryError::TooManyTags(self.tags.len()));
        }
        let search_chars = self.search.chars().count();
        if search_chars > MAX_SEARCH_CHARS {
            return Err(FeedQueryError::SearchTooLong(search_chars));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_valid() {
        let query = FeedQuery::default();
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert_eq!(query.sort, SortDirection::Desc);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(FeedQuery::default().with_limit(0).validate(), Err(FeedQueryError::Limit(0)));
        assert_eq!(FeedQuery::default().with_limit(21).validate(), Err(FeedQueryError::Limit(21)));
        assert!(FeedQuery::default().with_limit(1).validate().is_ok());
    }

    #[test]
    fn test_negative_offset_rejected() {
        assert_eq!(
            FeedQuery::default().with_offset(-1).validate(),
            Err(FeedQueryError::Offset(-1))
        );
    }

    #[test]
    fn test_tag_and_search_bounds() {
        let query = FeedQuery::default().with_tags(["a", "b", "c", "d", "e", "f"]);
        assert_eq!(query.validate(), Err(FeedQueryError::TooManyTags(6)));

        // Counted in characters, not bytes
        let query = FeedQuery::default().with_search("é".repeat(100));
        assert!(query.validate().is_ok());
        let query = FeedQuery::default().with_search("x".repeat(101));
        assert_eq!(query.validate(), Err(FeedQueryError::SearchTooLong(101)));
    }
}

//! Pagination output shape shared by every paginated listing
//!
//! Search results carry request bookkeeping (sort, direction, filter). Callers
//! at the boundary only ever see [`PaginationOutput`]:
//! `{items, total, currentPage, lastPage, perPage}`.
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::pagination::PaginationOutputMapper;
//! use searchable_repository::repository::{SearchResult, SearchResultProps};
//! use serde_json::json;
//!
//! let result = SearchResult::new(SearchResultProps {
//!     items: vec!["fake"],
//!     total: 1,
//!     current_page: 1,
//!     per_page: 1,
//!     sort: None,
//!     sort_dir: None,
//!     filter: Some("fake".to_string()),
//! });
//!
//! let output = PaginationOutputMapper::to_output(result.items().to_vec(), &result);
//! assert_eq!(
//!     serde_json::to_value(&output).unwrap(),
//!     json!({ "items": ["fake"], "total": 1, "currentPage": 1, "lastPage": 1, "perPage": 1 })
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::repository::SearchResult;

/// Public pagination shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOutput<T> {
    /// Items of the current page
    pub items: Vec<T>,
    /// Number of matching items across all pages
    pub total: u64,
    /// The 1-indexed current page
    pub current_page: u64,
    /// Last available page (at least 1)
    pub last_page: u64,
    /// Page size
    pub per_page: u64,
}

impl<T> PaginationOutput<T> {
    /// Map the items to a new type, keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> PaginationOutput<U>
    where
        F: FnMut(T) -> U,
    {
        PaginationOutput {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
        }
    }

    /// Whether a page follows the current one
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Whether a page precedes the current one
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// Maps search results to [`PaginationOutput`]
pub struct PaginationOutputMapper;

impl PaginationOutputMapper {
    /// Combine already-mapped items with the metadata of a search result
    ///
    /// The items are taken as given; use cases typically pass the result's
    /// entities converted to their output DTOs.
    pub fn to_output<T, E>(items: Vec<T>, result: &SearchResult<E>) -> PaginationOutput<T> {
        PaginationOutput {
            items,
            total: result.total(),
            current_page: result.current_page(),
            last_page: result.last_page(),
            per_page: result.per_page(),
        }
    }

    /// Convert each entity of a search result with `f` and project the metadata
    pub fn map_output<T, E, F>(result: &SearchResult<E>, f: F) -> PaginationOutput<T>
    where
        F: FnMut(&E) -> T,
    {
        Self::to_output(result.items().iter().map(f).collect(), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SearchResultProps;

    fn result(items: Vec<&'static str>, total: u64, per_page: u64) -> SearchResult<&'static str> {
        SearchResult::new(SearchResultProps {
            items,
            total,
            current_page: 1,
            per_page,
            sort: None,
            sort_dir: None,
            filter: None,
        })
    }

    #[test]
    fn test_to_output_empty_items() {
        let output = PaginationOutputMapper::to_output(Vec::<String>::new(), &result(vec![], 1, 2));
        assert_eq!(
            output,
            PaginationOutput {
                items: vec![],
                total: 1,
                current_page: 1,
                last_page: 1,
                per_page: 2,
            }
        );
    }

    #[test]
    fn test_map_output_converts_items() {
        let output = PaginationOutputMapper::map_output(&result(vec!["ab", "c"], 2, 2), |s| s.len());
        assert_eq!(output.items, vec![2, 1]);
        assert_eq!(output.total, 2);
    }

    #[test]
    fn test_navigation_flags() {
        let output = PaginationOutputMapper::to_output(vec!["a"], &result(vec!["a"], 30, 10));
        assert!(output.has_next());
        assert!(!output.has_prev());

        let last = PaginationOutput {
            current_page: 3,
            ..output
        };
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let output = PaginationOutputMapper::to_output(vec![1, 2], &result(vec![], 12, 5));
        let mapped = output.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.last_page, 3);
    }
}

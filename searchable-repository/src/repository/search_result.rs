//! Search result value object
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::repository::{SearchResult, SearchResultProps};
//!
//! let result = SearchResult::new(SearchResultProps {
//!     items: vec!["item1", "item2"],
//!     total: 54,
//!     current_page: 1,
//!     per_page: 10,
//!     sort: None,
//!     sort_dir: None,
//!     filter: None,
//! });
//! assert_eq!(result.last_page(), 6);
//! ```

use serde::Serialize;

use super::search_params::SortDirection;
use crate::pagination::{PaginationOutput, PaginationOutputMapper};

/// Constructor input for [`SearchResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultProps<T> {
    /// Items of the current page
    pub items: Vec<T>,
    /// Number of items matching the filter, before pagination
    pub total: u64,
    /// The 1-indexed page these items belong to
    pub current_page: u64,
    /// Page size used for the search
    pub per_page: u64,
    /// Sort field echoed from the request
    pub sort: Option<String>,
    /// Sort direction echoed from the request
    pub sort_dir: Option<SortDirection>,
    /// Filter echoed from the request
    pub filter: Option<String>,
}

/// Immutable outcome of a search
///
/// Serializes (camelCase) to
/// `{items, total, currentPage, perPage, lastPage, sort, sortDir, filter}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    items: Vec<T>,
    total: u64,
    current_page: u64,
    per_page: u64,
    last_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<T> SearchResult<T> {
    /// Build a result, deriving `last_page` from `total` and `per_page`
    pub fn new(props: SearchResultProps<T>) -> Self {
        let last_page = calculate_last_page(props.total, props.per_page);
        Self {
            items: props.items,
            total: props.total,
            current_page: props.current_page,
            per_page: props.per_page,
            last_page,
            sort: props.sort,
            sort_dir: props.sort_dir,
            filter: props.filter,
        }
    }

    /// Items of the current page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the result, keeping only the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of matching items before pagination
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The 1-indexed current page
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Page size
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Last available page; at least 1 even for an empty result
    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    /// Sort field echoed from the request
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Sort direction echoed from the request
    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    /// Filter echoed from the request
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Convert the items while keeping every piece of metadata
    ///
    /// # Example
    ///
    /// ```rust
    /// use searchable_repository::repository::{SearchResult, SearchResultProps};
    ///
    /// let result = SearchResult::new(SearchResultProps {
    ///     items: vec![1, 2],
    ///     total: 2,
    ///     current_page: 1,
    ///     per_page: 15,
    ///     sort: None,
    ///     sort_dir: None,
    ///     filter: None,
    /// });
    /// let mapped = result.map_items(|n| n.to_string());
    /// assert_eq!(mapped.items(), ["1".to_string(), "2".to_string()]);
    /// ```
    pub fn map_items<U, F>(self, f: F) -> SearchResult<U>
    where
        F: FnMut(T) -> U,
    {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            sort: self.sort,
            sort_dir: self.sort_dir,
            filter: self.filter,
        }
    }

    /// Project to the public pagination shape, dropping sort and filter
    pub fn to_output(&self) -> PaginationOutput<T>
    where
        T: Clone,
    {
        PaginationOutputMapper::to_output(self.items.clone(), self)
    }

    /// Like [`to_output`](Self::to_output) but consuming the result
    pub fn into_output(self) -> PaginationOutput<T> {
        PaginationOutput {
            items: self.items,
            total: self.total,
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
        }
    }
}

/// Ceiling of `total / per_page`, never below 1
///
/// A `per_page` of zero is treated as one.
pub(crate) fn calculate_last_page(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

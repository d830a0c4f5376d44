//! Per-entity search behavior
//!
//! A [`SearchStrategy`] tells the generic search pipeline three things about an
//! entity type: which fields may be sorted on, how to read a field value for
//! comparison, and whether an entity matches a filter string. Concrete
//! repositories compose a strategy instead of overriding pipeline steps.
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::entity::Entity;
//! use searchable_repository::repository::{contains_ignore_case, FieldValue, FnStrategy, SearchStrategy};
//!
//! struct Product {
//!     name: String,
//!     price: i64,
//! }
//!
//! let strategy = FnStrategy::new(
//!     &["name", "price"],
//!     |entity: &Entity<Product>, field: &str| match field {
//!         "name" => Some(FieldValue::from(entity.props().name.as_str())),
//!         "price" => Some(FieldValue::from(entity.props().price)),
//!         _ => None,
//!     },
//!     |entity: &Entity<Product>, filter: &str| contains_ignore_case(&entity.props().name, filter),
//! );
//!
//! let lamp = Entity::new(Product { name: "Desk Lamp".into(), price: 10 });
//! assert!(strategy.matches(&lamp, "LAMP"));
//! assert_eq!(strategy.field_value(&lamp, "price"), Some(FieldValue::Integer(10)));
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::search_params::SortDirection;
use crate::entity::Entity;

/// A comparable field value extracted from an entity for sorting
///
/// Values of the same variant compare naturally. Integers and floats compare
/// numerically with each other. Values of unrelated variants are ordered by
/// kind (`Boolean < number < Timestamp < Text`) so that the ordering stays
/// total.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text compared by code point
    Text(String),
    /// Integer number
    Integer(i64),
    /// Floating point number, compared with [`f64::total_cmp`]
    Float(f64),
    /// Boolean, `false < true`
    Boolean(bool),
    /// Point in time
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Boolean(_) => 0,
            Self::Integer(_) | Self::Float(_) => 1,
            Self::Timestamp(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total ordering used by the sort step
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Integer(b)) => a.total_cmp(&(*b as f64)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Timestamp(dt)
    }
}

/// Search behavior of one entity type
pub trait SearchStrategy<P>: Send + Sync {
    /// Field names the sort step will honor; any other requested field is ignored
    fn sortable_fields(&self) -> &[&'static str];

    /// Read a field for comparison
    ///
    /// Returning `None` places the entity before every entity that has a value.
    fn field_value(&self, entity: &Entity<P>, field: &str) -> Option<FieldValue>;

    /// Whether the entity matches a (non-empty) filter string
    fn matches(&self, entity: &Entity<P>, filter: &str) -> bool;

    /// Sort applied when a search names no sort field
    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        None
    }

    /// Whether `field` is listed in [`sortable_fields`](Self::sortable_fields)
    fn is_sortable(&self, field: &str) -> bool {
        self.sortable_fields().contains(&field)
    }
}

/// A [`SearchStrategy`] assembled from two closures
///
/// `accessor` reads a field for sorting, `predicate` decides filter matches.
pub struct FnStrategy<A, F> {
    sortable_fields: Vec<&'static str>,
    accessor: A,
    predicate: F,
}

impl<A, F> FnStrategy<A, F> {
    /// Build a strategy from sortable field names, a field accessor and a filter predicate
    pub fn new(sortable_fields: &[&'static str], accessor: A, predicate: F) -> Self {
        Self {
            sortable_fields: sortable_fields.to_vec(),
            accessor,
            predicate,
        }
    }
}

impl<P, A, F> SearchStrategy<P> for FnStrategy<A, F>
where
    A: Fn(&Entity<P>, &str) -> Option<FieldValue> + Send + Sync,
    F: Fn(&Entity<P>, &str) -> bool + Send + Sync,
{
    fn sortable_fields(&self) -> &[&'static str] {
        &self.sortable_fields
    }

    fn field_value(&self, entity: &Entity<P>, field: &str) -> Option<FieldValue> {
        (self.accessor)(entity, field)
    }

    fn matches(&self, entity: &Entity<P>, filter: &str) -> bool {
        (self.predicate)(entity, filter)
    }
}

/// Case-insensitive substring test used by the usual name filters
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep only the entities matching `filter`
///
/// With no filter the input is returned untouched and the predicate is never
/// invoked.
pub fn apply_filter<P, S>(items: Vec<Entity<P>>, filter: Option<&str>, strategy: &S) -> Vec<Entity<P>>
where
    S: SearchStrategy<P> + ?Sized,
{
    let Some(filter) = filter else {
        return items;
    };
    let before = items.len();
    let kept: Vec<_> = items
        .into_iter()
        .filter(|entity| strategy.matches(entity, filter))
        .collect();
    tracing::trace!(filter, before, after = kept.len(), "applied filter");
    kept
}

/// Stable sort on a sortable field
///
/// The input order is returned unchanged when `sort` is absent or not one of
/// the strategy's sortable fields. A missing direction sorts descending.
pub fn apply_sort<P, S>(
    items: Vec<Entity<P>>,
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
    strategy: &S,
) -> Vec<Entity<P>>
where
    S: SearchStrategy<P> + ?Sized,
{
    let Some(field) = sort.filter(|field| strategy.is_sortable(field)) else {
        return items;
    };
    let direction = sort_dir.unwrap_or_default();
    let ascending = direction.is_ascending();
    tracing::trace!(field, %direction, "applying sort");

    let mut keyed: Vec<(Option<FieldValue>, Entity<P>)> = items
        .into_iter()
        .map(|entity| (strategy.field_value(&entity, field), entity))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = match (a, b) {
            (Some(a), Some(b)) => a.compare(b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    keyed.into_iter().map(|(_, entity)| entity).collect()
}

/// Slice out one 1-indexed page
///
/// Pages past the end yield an empty list.
pub fn apply_paginate<P>(items: Vec<Entity<P>>, page: u64, per_page: u64) -> Vec<Entity<P>> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() as u64 {
        return Vec::new();
    }
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    items.into_iter().skip(start as usize).take(take).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    #[derive(Debug, Clone, PartialEq)]
    struct StubProps {
        name: String,
        price: i64,
    }

    struct StubStrategy {
        calls: AtomicUsize,
    }

    impl StubStrategy {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SearchStrategy<StubProps> for StubStrategy {
        fn sortable_fields(&self) -> &[&'static str] {
            &["name"]
        }

        fn field_value(&self, entity: &Entity<StubProps>, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(entity.props().name.as_str().into()),
                "price" => Some(entity.props().price.into()),
                _ => None,
            }
        }

        fn matches(&self, entity: &Entity<StubProps>, filter: &str) -> bool {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            contains_ignore_case(&entity.props().name, filter)
        }
    }

    fn stub(name: &str, price: i64) -> Entity<StubProps> {
        Entity::with_id(
            StubProps {
                name: name.to_string(),
                price,
            },
            name,
        )
    }

    fn names(items: &[Entity<StubProps>]) -> Vec<&str> {
        items.iter().map(|e| e.props().name.as_str()).collect()
    }

    #[test]
    fn test_filter_none_returns_input_without_calling_predicate() {
        let strategy = StubStrategy::new();
        let items = vec![stub("a", 1), stub("b", 2)];
        let filtered = apply_filter(items.clone(), None, &strategy);
        assert_eq!(filtered, items);
        assert_eq!(strategy.calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let strategy = StubStrategy::new();
        let items = vec![stub("test", 5), stub("TEST", 5), stub("fake", 0)];
        let filtered = apply_filter(items, Some("TEST"), &strategy);
        assert_eq!(names(&filtered), vec!["test", "TEST"]);
        assert_eq!(strategy.calls.load(AtomicOrdering::SeqCst), 3);
    }

    #[test]
    fn test_sort_ignores_unsortable_field() {
        let strategy = StubStrategy::new();
        let items = vec![stub("b", 1), stub("a", 3), stub("c", 2)];
        assert_eq!(names(&apply_sort(items.clone(), None, None, &strategy)), vec!["b", "a", "c"]);
        assert_eq!(
            names(&apply_sort(items, Some("price"), Some(SortDirection::Asc), &strategy)),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_sort_by_name() {
        let strategy = StubStrategy::new();
        let items = vec![stub("b", 1), stub("a", 3), stub("c", 2)];
        assert_eq!(
            names(&apply_sort(items.clone(), Some("name"), Some(SortDirection::Asc), &strategy)),
            vec!["a", "b", "c"]
        );
        assert_eq!(
            names(&apply_sort(items.clone(), Some("name"), Some(SortDirection::Desc), &strategy)),
            vec!["c", "b", "a"]
        );
        assert_eq!(
            names(&apply_sort(items, Some("name"), None, &strategy)),
            vec!["c", "b", "a"]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let strategy = FnStrategy::new(
            &["price"],
            |entity: &Entity<StubProps>, _field: &str| Some(FieldValue::from(entity.props().price)),
            |_entity: &Entity<StubProps>, _filter: &str| true,
        );
        let items = vec![stub("x", 1), stub("y", 0), stub("z", 1), stub("w", 0)];
        assert_eq!(
            names(&apply_sort(items.clone(), Some("price"), Some(SortDirection::Asc), &strategy)),
            vec!["y", "w", "x", "z"]
        );
        assert_eq!(
            names(&apply_sort(items, Some("price"), Some(SortDirection::Desc), &strategy)),
            vec!["x", "z", "y", "w"]
        );
    }

    #[test]
    fn test_paginate() {
        let items: Vec<_> = ["a", "b", "c", "d", "e"].iter().map(|n| stub(n, 0)).collect();
        assert_eq!(names(&apply_paginate(items.clone(), 1, 2)), vec!["a", "b"]);
        assert_eq!(names(&apply_paginate(items.clone(), 2, 2)), vec!["c", "d"]);
        assert_eq!(names(&apply_paginate(items.clone(), 3, 2)), vec!["e"]);
        assert!(apply_paginate(items.clone(), 4, 2).is_empty());
        assert!(apply_paginate(items.clone(), u64::MAX, u64::MAX).is_empty());
        assert_eq!(apply_paginate(items, 1, u64::MAX).len(), 5);
    }

    #[test]
    fn test_field_value_ordering() {
        assert_eq!(FieldValue::from("a").compare(&FieldValue::from("b")), Ordering::Less);
        assert_eq!(FieldValue::from("B").compare(&FieldValue::from("a")), Ordering::Less);
        assert_eq!(FieldValue::from(2).compare(&FieldValue::from(1.5)), Ordering::Greater);
        assert_eq!(FieldValue::from(1.0).compare(&FieldValue::from(1_i64)), Ordering::Equal);
        assert_eq!(FieldValue::from(true).compare(&FieldValue::from(0)), Ordering::Less);

        let earlier = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(FieldValue::from(earlier).compare(&FieldValue::from(later)), Ordering::Less);
        assert_eq!(FieldValue::from(later).compare(&FieldValue::from("text")), Ordering::Less);
    }

    #[test]
    fn test_fn_strategy_default_sort_is_none() {
        let strategy = FnStrategy::new(
            &["name"],
            |_entity: &Entity<StubProps>, _field: &str| None,
            |_entity: &Entity<StubProps>, _filter: &str| false,
        );
        assert!(<_ as SearchStrategy<StubProps>>::default_sort(&strategy).is_none());
        assert!(!<_ as SearchStrategy<StubProps>>::is_sortable(&strategy, "price"));
    }
}

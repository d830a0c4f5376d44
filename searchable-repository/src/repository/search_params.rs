//! Search parameter normalization
//!
//! [`SearchParams`] turns loosely-typed request input into a canonical value.
//! Normalization never fails: anything unusable degrades to a default.
//!
//! | field      | accepted                                | fallback |
//! |------------|-----------------------------------------|----------|
//! | `page`     | integer > 0 after numeric coercion      | `1`      |
//! | `perPage`  | integer > 0 after numeric coercion      | `15`     |
//! | `sort`     | any non-empty value, stringified        | none     |
//! | `sortDir`  | `"asc"` in any case (only with a sort)  | `desc`   |
//! | `filter`   | any non-empty value, stringified        | none     |
//!
//! Strings are read as numbers the way JavaScript's `Number()` reads them,
//! including `0x`, `0o` and `0b` prefixes. Numbers become strings in
//! JavaScript's shortest form, switching to exponent notation at `1e21` and
//! below `1e-6`.
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::repository::{SearchParams, SortDirection};
//! use serde_json::json;
//!
//! let params = SearchParams::from_value(&json!({
//!     "page": "3",
//!     "perPage": 5.4,
//!     "sort": "name",
//!     "sortDir": "ASC",
//!     "filter": 0,
//! }));
//!
//! assert_eq!(params.page(), 3);
//! assert_eq!(params.per_page(), 15);
//! assert_eq!(params.sort(), Some("name"));
//! assert_eq!(params.sort_dir(), Some(SortDirection::Asc));
//! assert_eq!(params.filter(), Some("0"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page used when the requested page is missing or invalid
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the requested page size is missing or invalid
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Placeholder produced when an object is coerced to a string
const OBJECT_PLACEHOLDER: &str = "[object Object]";

/// Sort direction for search requests
///
/// # Example
///
/// ```rust
/// use searchable_repository::repository::SortDirection;
/// use serde_json::json;
///
/// assert_eq!(SortDirection::from_raw(Some(&json!("AsC"))), SortDirection::Asc);
/// assert_eq!(SortDirection::from_raw(Some(&json!("up"))), SortDirection::Desc);
/// assert_eq!(SortDirection::from_raw(None), SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first (A-Z, 0-9, oldest first)
    Asc,
    /// Largest first (Z-A, 9-0, newest first)
    #[default]
    Desc,
}

impl SortDirection {
    /// Resolve a raw direction value
    ///
    /// Only a value whose string form equals `asc` case-insensitively yields
    /// [`SortDirection::Asc`]; everything else, including a missing value, is
    /// [`SortDirection::Desc`].
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value.and_then(coerce_string) {
            Some(dir) if dir.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Whether this direction sorts ascending
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Raw, untrusted search input
///
/// Every field accepts any JSON value. Keys are camelCase (`perPage`,
/// `sortDir`) and unknown keys are ignored; [`SearchParams::from_value`]
/// also reads snake_case keys.
///
/// # Example
///
/// ```rust
/// use searchable_repository::repository::{SearchInput, SearchParams};
///
/// let input = SearchInput::new().page(2).per_page(10).filter("test");
/// let params = SearchParams::from(input);
/// assert_eq!(params.page(), 2);
/// assert_eq!(params.per_page(), 10);
/// assert_eq!(params.filter(), Some("test"));
/// assert_eq!(params.sort(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchInput {
    /// Requested page (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
    /// Requested page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<Value>,
    /// Field to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    /// Sort direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<Value>,
    /// Filter term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

impl SearchInput {
    /// Create an empty input (every field missing)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw page value
    #[must_use]
    pub fn page(mut self, page: impl Into<Value>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the raw page size value
    #[must_use]
    pub fn per_page(mut self, per_page: impl Into<Value>) -> Self {
        self.per_page = Some(per_page.into());
        self
    }

    /// Set the raw sort field value
    #[must_use]
    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the raw sort direction value
    #[must_use]
    pub fn sort_dir(mut self, sort_dir: impl Into<Value>) -> Self {
        self.sort_dir = Some(sort_dir.into());
        self
    }

    /// Set the raw filter value
    #[must_use]
    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Defaults applied while normalizing
///
/// Normally built from configuration via
/// [`SearchConfig::defaults`](crate::config::SearchConfig::defaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDefaults {
    /// Page size substituted for an invalid `perPage`
    pub per_page: u64,
}

impl SearchDefaults {
    /// Defaults with a custom page size; zero falls back to [`DEFAULT_PER_PAGE`]
    pub const fn with_per_page(per_page: u64) -> Self {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };
        Self { per_page }
    }
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Canonical search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl SearchParams {
    /// Parameters for the first page with default size, no sort and no filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw input using the built-in defaults
    pub fn normalize(input: &SearchInput) -> Self {
        Self::normalize_with(input, &SearchDefaults::default())
    }

    /// Normalize raw input using the given defaults
    pub fn normalize_with(input: &SearchInput, defaults: &SearchDefaults) -> Self {
        let sort = input.sort.as_ref().and_then(coerce_string);
        let sort_dir = sort
            .as_ref()
            .map(|_| SortDirection::from_raw(input.sort_dir.as_ref()));

        Self {
            page: input
                .page
                .as_ref()
                .and_then(positive_integer)
                .unwrap_or(DEFAULT_PAGE),
            per_page: input
                .per_page
                .as_ref()
                .and_then(positive_integer)
                .unwrap_or(defaults.per_page),
            sort,
            sort_dir,
            filter: input.filter.as_ref().and_then(coerce_string),
        }
    }

    /// Normalize a completely untyped JSON value
    ///
    /// Reads `perPage`/`sortDir` and falls back to `per_page`/`sort_dir`.
    /// Anything other than a JSON object yields the defaults.
    pub fn from_value(value: &Value) -> Self {
        Self::from_value_with(value, &SearchDefaults::default())
    }

    /// Normalize a completely untyped JSON value using the given defaults
    pub fn from_value_with(value: &Value, defaults: &SearchDefaults) -> Self {
        let Value::Object(fields) = value else {
            return Self::normalize_with(&SearchInput::default(), defaults);
        };
        let field = |camel: &str, snake: &str| {
            fields
                .get(camel)
                .or_else(|| fields.get(snake))
                .filter(|v| !v.is_null())
                .cloned()
        };
        let input = SearchInput {
            page: field("page", "page"),
            per_page: field("perPage", "per_page"),
            sort: field("sort", "sort"),
            sort_dir: field("sortDir", "sort_dir"),
            filter: field("filter", "filter"),
        };
        Self::normalize_with(&input, defaults)
    }

    /// The 1-indexed page
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The page size
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The requested sort field, if any
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// The sort direction; present exactly when a sort field is present
    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    /// The filter term, if any
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

impl From<SearchInput> for SearchParams {
    fn from(input: SearchInput) -> Self {
        Self::normalize(&input)
    }
}

impl From<&SearchInput> for SearchParams {
    fn from(input: &SearchInput) -> Self {
        Self::normalize(input)
    }
}

/// Numeric coercion: numbers as-is, strings parsed after trimming
/// (empty means zero), everything else is not a number.
fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s.trim()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let radix = match s.get(..2) {
        None if s.is_empty() => return Some(0.0),
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return s.parse::<f64>().ok(),
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| Some(acc * f64::from(radix) + f64::from(c.to_digit(radix)?)))
}

/// Whole numbers above zero; values past `u64::MAX` saturate.
fn positive_integer(value: &Value) -> Option<u64> {
    let n = to_number(value)?;
    if n.is_finite() && n.fract() == 0.0 && n > 0.0 {
        Some(n as u64)
    } else {
        None
    }
}

/// String coercion; `None` for null and for anything that stringifies to "".
fn coerce_string(value: &Value) -> Option<String> {
    let coerced = stringify(value);
    (!coerced.is_empty()).then_some(coerced)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_PLACEHOLDER.to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // "-0.0" -> "0"
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && (f.abs() >= 1e21 || f.abs() < 1e-6) => exponent_form(f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// `1e21` -> "1e+21", `1.5e-7` -> "1.5e-7"
fn exponent_form(f: f64) -> String {
    let formatted = format!("{f:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

//! Query description: which strategy to run, its parameters, and the page.
//!
//! A [`QuerySpec`] deserializes straight from the camelCase JSON callers
//! send (`categorizeBy`, `take`, `order`, ...). Pages are 0-based.

use crate::error::{QueryError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Page size used when the caller does not ask for one
pub const DEFAULT_TAKE: usize = 10;

/// Largest accepted page size
pub const MAX_TAKE: usize = 500;

// =============================================================================
// Order
// =============================================================================

/// Sort direction. Parsed case-insensitively, displayed as `ASC` / `DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    /// Orient an ascending comparison result for this direction.
    ///
    /// Reversing the comparator (rather than the sorted output) keeps a
    /// stable sort stable in both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Asc => ordering,
            Order::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Order {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Order::Asc),
            "DESC" => Ok(Order::Desc),
            _ => Err(QueryError::Validation(format!(
                "order must be ASC or DESC, got '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for Order {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("ASC"),
            Order::Desc => f.write_str("DESC"),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// The closed set of query strategies, selected by `categorizeBy`.
///
/// An absent or unrecognized selector is not an error: it selects
/// [`Category::Listing`], the plain catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Listing,
    Actor,
    Popularity,
    Similarity,
    Duration,
    Year,
}

impl Category {
    /// All categories, in selector order
    pub const ALL: [Category; 6] = [
        Category::Listing,
        Category::Actor,
        Category::Popularity,
        Category::Similarity,
        Category::Duration,
        Category::Year,
    ];

    /// Map a raw `categorizeBy` value onto a category
    pub fn from_selector(selector: Option<&str>) -> Self {
        let Some(selector) = selector else {
            return Category::Listing;
        };
        match selector.trim().to_ascii_lowercase().as_str() {
            "actor" => Category::Actor,
            "popularity" => Category::Popularity,
            "similarity" => Category::Similarity,
            "duration" => Category::Duration,
            "year" => Category::Year,
            _ => Category::Listing,
        }
    }

    /// Selector string for this category (`"default"` for the listing)
    pub fn selector(self) -> &'static str {
        match self {
            Category::Listing => "default",
            Category::Actor => "actor",
            Category::Popularity => "popularity",
            Category::Similarity => "similarity",
            Category::Duration => "duration",
            Category::Year => "year",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.selector())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let selector = Option::<String>::deserialize(deserializer)?;
        Ok(Category::from_selector(selector.as_deref()))
    }
}

// =============================================================================
// QuerySpec
// =============================================================================

/// A validated-on-demand description of one catalog query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    /// Reference title for similarity search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Cast member to filter by (exact, case-sensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// Minimum similarity score kept by similarity search (default 0.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    #[serde(default)]
    pub categorize_by: Category,

    /// 0-based page index
    #[serde(default)]
    pub page: usize,

    /// Page size, `1..=MAX_TAKE`
    #[serde(default = "default_take")]
    pub take: usize,

    #[serde(default)]
    pub order: Order,
}

fn default_take() -> usize {
    DEFAULT_TAKE
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            title: None,
            actor: None,
            threshold: None,
            categorize_by: Category::Listing,
            page: 0,
            take: DEFAULT_TAKE,
            order: Order::Asc,
        }
    }
}

impl QuerySpec {
    /// A listing query for the first page with default size
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categorize_by = category;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_take(mut self, take: usize) -> Self {
        self.take = take;
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Similarity threshold, defaulting to 0.0 when absent
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(0.0)
    }

    /// Check the query before any strategy runs
    pub fn validate(&self) -> Result<()> {
        if self.take == 0 || self.take > MAX_TAKE {
            return Err(QueryError::Validation(format!(
                "take must be between 1 and {MAX_TAKE}, got {}",
                self.take
            )));
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() {
                return Err(QueryError::Validation(format!(
                    "threshold must be a finite number, got {threshold}"
                )));
            }
        }
        match self.categorize_by {
            Category::Actor if is_blank(self.actor.as_deref()) => Err(QueryError::Validation(
                "categorizeBy=actor requires an actor".to_string(),
            )),
            Category::Similarity if is_blank(self.title.as_deref()) => Err(
                QueryError::Validation("categorizeBy=similarity requires a title".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

//! Strategy implementations, one per query category.
//!
//! The category set is closed: [`Category::strategy`] is an exhaustive
//! `match`, so adding a category without a strategy does not compile.

pub mod actor;
pub mod duration;
pub mod listing;
pub mod popularity;
pub mod similarity;
pub mod year;

// Re-export for convenience
pub use actor::ActorStrategy;
pub use duration::DurationStrategy;
pub use listing::ListingStrategy;
pub use popularity::PopularityStrategy;
pub use similarity::SimilarityStrategy;
pub use year::YearStrategy;

use crate::query::Category;
use crate::traits::Strategy;

impl Category {
    /// The strategy that answers queries of this category
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Category::Listing => &ListingStrategy,
            Category::Actor => &ActorStrategy,
            Category::Popularity => &PopularityStrategy,
            Category::Similarity => &SimilarityStrategy,
            Category::Duration => &DurationStrategy,
            Category::Year => &YearStrategy,
        }
    }
}

pub mod identity;
pub mod recommendations;
pub mod similarity;
pub mod stats;
pub mod vectorizer;

pub use identity::{IdentityResolver, NamespacedIdentityResolver};
pub use recommendations::Recommender;
pub use stats::StatsService;

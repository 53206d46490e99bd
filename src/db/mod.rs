pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::InMemoryTrackStore;
pub use postgres::{create_pool, run_migrations, PgTrackStore};
pub use store::{RecommendationSnapshot, TrackStore};

#[cfg(test)]
pub use store::MockTrackStore;

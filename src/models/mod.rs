pub mod responses;
pub mod track;

pub use responses::{RecommendationsResponse, TopArtistsResponse, TopGenresResponse, TrackSummary};
pub use track::TrackRecord;

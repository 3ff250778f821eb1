pub mod influence;
pub mod keywords;
pub mod mood_aggregator;
pub mod sentiment;
pub mod time_range;
pub mod vibe;

pub use influence::*;
pub use keywords::*;
pub use mood_aggregator::*;
pub use sentiment::*;
pub use time_range::*;
pub use vibe::*;

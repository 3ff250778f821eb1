pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

// Re-export the main error types for convenience
pub use error::{MoodError, MoodResult};

// Re-export data model
pub use models::{Message, MoodBucket, SentimentResult, TeamMember, TimeRange};

// Re-export analytics modules
pub use analytics::{
    aggregate, extract_keywords, filter_by_range, is_in_range, rank_influencers, top_keywords,
    InfluencerStats, SentimentAnalyzer, VibeAlert, VibeZone,
};

// Re-export store and persistence
pub use database::MoodDatabase;
pub use store::{
    default_team_members, Clock, FixedClock, InMemoryRepository, KeyValueStore, MoodRepository,
    MoodStore, SystemClock,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Test that the main modules are accessible
        assert!(std::any::type_name::<MoodStore>().contains("MoodStore"));
        assert!(std::any::type_name::<MoodDatabase>().contains("MoodDatabase"));
    }

    #[test]
    fn test_error_types_re_exported() {
        let _empty = MoodError::EmptyMessage;
        let _result: MoodResult<()> = Err(MoodError::unknown_author("nobody"));
    }

    #[test]
    fn test_repositories_are_interchangeable() {
        let repositories: Vec<Box<dyn MoodRepository>> = vec![
            Box::new(InMemoryRepository::new()),
            Box::new(MoodDatabase::new_in_memory().unwrap()),
        ];

        for repository in repositories {
            assert!(repository.load_messages().unwrap().is_empty());
            assert_eq!(repository.load_team_members().unwrap().len(), 5);
        }
    }
}

//! `TripWeaver` - LLM-assisted travel itinerary planning
//!
//! This library provides the core functionality for turning validated trip
//! preferences plus live hotel and attraction search results into a
//! structured day-by-day itinerary, and exporting it as JSON, HTML, or PDF.

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod reconcile;
pub mod search;

// Re-export core types for public API
pub use builder::ItineraryBuilder;
pub use config::{ExportConfig, LlmConfig, LoggingConfig, PlannerConfig, SearchConfig};
pub use error::PlannerError;
pub use export::ItineraryExporter;
pub use llm::{GroqClient, LanguageModel};
pub use models::{
    Activity, Attraction, DayPlan, Hotel, Itinerary, PreferencesInput, TravelStyle,
    TripPreferences,
};
pub use search::{AttractionSearcher, HotelSearcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

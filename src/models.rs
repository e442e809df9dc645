//! Data models for trip preferences, search results, and itineraries
//!
//! This module contains all the data structures shared across the planning
//! pipeline: the validated preference record, hotel/attraction candidates,
//! and the reconciled itinerary.

use crate::error::PlannerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall spending profile for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Budget,
    Moderate,
    Luxury,
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelStyle::Budget => write!(f, "budget"),
            TravelStyle::Moderate => write!(f, "moderate"),
            TravelStyle::Luxury => write!(f, "luxury"),
        }
    }
}

/// Raw preference form submission, before validation
///
/// Dates arrive as strings and the budget as an arbitrary number; conversion
/// into [`TripPreferences`] is where all range checks happen.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesInput {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub accommodation_preference: String,
    pub transportation_preference: String,
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

/// Validated trip preference record
///
/// Created once from a form submission and immutable thereafter. Every other
/// component consumes this by reference.
#[derive(Debug, Clone, Serialize)]
pub struct TripPreferences {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub accommodation_preference: String,
    pub transportation_preference: String,
    pub dietary_restrictions: Option<Vec<String>>,
    pub special_requirements: Option<String>,
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, PlannerError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        PlannerError::validation(format!("{field} must be in YYYY-MM-DD format, got '{value}'"))
    })
}

impl TryFrom<PreferencesInput> for TripPreferences {
    type Error = PlannerError;

    fn try_from(input: PreferencesInput) -> Result<Self, Self::Error> {
        if input.destination.trim().is_empty() {
            return Err(PlannerError::validation("destination must not be empty"));
        }

        let start_date = parse_date(&input.start_date, "start_date")?;
        let end_date = parse_date(&input.end_date, "end_date")?;
        if start_date >= end_date {
            return Err(PlannerError::validation("end date must be after start date"));
        }

        if !(input.budget > 0.0) {
            return Err(PlannerError::validation("budget must be a positive number"));
        }

        Ok(Self {
            destination: input.destination,
            start_date,
            end_date,
            budget: input.budget,
            travel_style: input.travel_style,
            interests: input.interests,
            accommodation_preference: input.accommodation_preference,
            transportation_preference: input.transportation_preference,
            dietary_restrictions: input.dietary_restrictions,
            special_requirements: input.special_requirements,
        })
    }
}

impl TripPreferences {
    /// Trip length in nights
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Hotel candidate returned by the hotel search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    /// Real address if the search result carried one
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    /// Rating out of 5.0
    pub rating: Option<f64>,
    pub amenities: Vec<String>,
    pub room_type: Option<String>,
    pub booking_url: Option<String>,
    pub description: String,
    pub source: String,
}

/// Attraction candidate returned by the attraction search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub description: String,
    /// e.g. "museum", "landmark", "park", "restaurant"
    pub category: String,
    /// Rating out of 5.0
    pub rating: Option<f64>,
    /// "$" through "$$$$"
    pub price_level: Option<String>,
    pub opening_hours: Option<String>,
    pub website: Option<String>,
    pub source: String,
    /// 0-1 score derived from rating and source mentions
    pub popularity_score: Option<f64>,
    pub best_time_to_visit: Option<String>,
    /// e.g. "2 hours"
    pub visit_duration: Option<String>,
}

/// One scheduled activity inside a day plan
///
/// Times are "HH:MM" strings as produced by the model; no ordering between
/// start and end is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub cost: Option<f64>,
    pub booking_url: Option<String>,
    pub notes: Option<String>,
}

/// One calendar day of the itinerary
///
/// Activities keep the order the model produced. `total_cost` is the day
/// total as reported in the reply, not recomputed from the activities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
    pub total_cost: f64,
    pub notes: Option<String>,
}

/// Complete reconciled itinerary, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_plans: Vec<DayPlan>,
    pub total_cost: f64,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub hotel: Option<Hotel>,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PreferencesInput {
        PreferencesInput {
            destination: "Paris".to_string(),
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-07".to_string(),
            budget: 2000.0,
            travel_style: TravelStyle::Moderate,
            interests: vec!["culture".to_string(), "food".to_string()],
            accommodation_preference: "hotel".to_string(),
            transportation_preference: "mixed".to_string(),
            dietary_restrictions: None,
            special_requirements: None,
        }
    }

    #[test]
    fn test_valid_preferences() {
        let prefs = TripPreferences::try_from(input()).unwrap();
        assert_eq!(prefs.destination, "Paris");
        assert_eq!(prefs.duration_days(), 6);
        assert_eq!(prefs.travel_style, TravelStyle::Moderate);
    }

    #[test]
    fn test_rejects_zero_budget() {
        let mut bad = input();
        bad.budget = 0.0;
        let err = TripPreferences::try_from(bad).unwrap_err();
        assert!(matches!(err, PlannerError::Validation { .. }));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_rejects_negative_budget() {
        let mut bad = input();
        bad.budget = -50.0;
        assert!(TripPreferences::try_from(bad).is_err());
    }

    #[test]
    fn test_rejects_equal_dates() {
        let mut bad = input();
        bad.end_date = "2024-06-01".to_string();
        let err = TripPreferences::try_from(bad).unwrap_err();
        assert!(err.to_string().contains("end date must be after start date"));
    }

    #[test]
    fn test_rejects_malformed_date() {
        let mut bad = input();
        bad.start_date = "06/01/2024".to_string();
        let err = TripPreferences::try_from(bad).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_rejects_empty_destination() {
        let mut bad = input();
        bad.destination = "  ".to_string();
        assert!(matches!(
            TripPreferences::try_from(bad),
            Err(PlannerError::Validation { .. })
        ));
    }

    #[test]
    fn test_preferences_input_missing_field_is_deser_error() {
        let json = r#"{"destination": "Paris", "start_date": "2024-06-01"}"#;
        let parsed: Result<PreferencesInput, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_travel_style_serde_lowercase() {
        let style: TravelStyle = serde_json::from_str("\"luxury\"").unwrap();
        assert_eq!(style, TravelStyle::Luxury);
        assert_eq!(style.to_string(), "luxury");
    }
}

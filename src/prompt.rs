//! Prompt composition for itinerary generation
//!
//! Renders the single natural-language instruction block sent to the language
//! model. Pure functions of their inputs: identical preferences, hotel, and
//! attraction lists always produce identical prompt strings.

use crate::models::{Attraction, Hotel, TripPreferences};
use std::fmt::Write;

/// Build the full generation prompt for a trip
#[must_use]
pub fn compose_prompt(
    prefs: &TripPreferences,
    hotel: Option<&Hotel>,
    attractions: &[Attraction],
) -> String {
    let hotel_name = hotel.map_or("Not selected yet", |h| h.name.as_str());
    let hotel_location = hotel
        .and_then(|h| h.address.as_deref())
        .unwrap_or("Not available");

    format!(
        r#"Create a detailed travel itinerary for a trip to {destination}
from {start_date} to {end_date}.

Travel Style: {style}
Budget: ${budget}
Interests: {interests}

Hotel: {hotel_name}
Hotel Location: {hotel_location}

Available Attractions:
{attractions}

Please create a day-by-day itinerary that:
1. Optimizes time and location (group nearby attractions)
2. Matches the travel style and budget
3. Includes a mix of activities based on interests
4. Includes reasonable travel times between locations
5. Includes meal times and rest periods
6. Provides estimated costs for each activity
7. Considers opening hours and visit durations
8. Includes transportation between locations
9. Accounts for weather and seasonal factors
10. Includes backup activities in case of bad weather

Format the response as a JSON object with the following structure:
{{
    "daily_plans": [
        {{
            "date": "YYYY-MM-DD",
            "activities": [
                {{
                    "name": "Activity name",
                    "start_time": "HH:MM",
                    "end_time": "HH:MM",
                    "location": "Location name",
                    "description": "Brief description",
                    "category": "Activity category",
                    "cost": 0.0,
                    "booking_url": "Optional URL",
                    "notes": "Optional notes"
                }}
            ],
            "total_cost": 0.0,
            "notes": "Optional day notes"
        }}
    ],
    "total_cost": 0.0,
    "summary": "Brief trip summary"
}}

Ensure all dates are in YYYY-MM-DD format and times are in HH:MM 24-hour format.
Make sure the total cost matches the sum of all activity costs.
Include realistic travel times between locations.
Consider local customs and peak hours for attractions.
"#,
        destination = prefs.destination,
        start_date = prefs.start_date,
        end_date = prefs.end_date,
        style = prefs.travel_style,
        budget = prefs.budget,
        interests = prefs.interests.join(", "),
        hotel_name = hotel_name,
        hotel_location = hotel_location,
        attractions = format_attractions(attractions),
    )
}

/// Enumerated attraction listing embedded in the prompt
fn format_attractions(attractions: &[Attraction]) -> String {
    let mut out = String::new();
    for (i, attraction) in attractions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, attraction.name);
        let _ = writeln!(out, "   Category: {}", attraction.category);
        let _ = writeln!(
            out,
            "   Duration: {}",
            attraction.visit_duration.as_deref().unwrap_or("Not specified")
        );
        let _ = writeln!(
            out,
            "   Price Level: {}",
            attraction.price_level.as_deref().unwrap_or("Not specified")
        );
        match attraction.rating {
            Some(rating) => {
                let _ = writeln!(out, "   Rating: {rating}/5.0");
            }
            None => {
                let _ = writeln!(out, "   Rating: Not specified/5.0");
            }
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreferencesInput, TravelStyle};

    fn prefs() -> TripPreferences {
        TripPreferences::try_from(PreferencesInput {
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
        })
        .unwrap()
    }

    fn attraction(name: &str) -> Attraction {
        Attraction {
            name: name.to_string(),
            description: "A famous place".to_string(),
            category: "landmark".to_string(),
            rating: Some(4.5),
            price_level: None,
            opening_hours: None,
            website: None,
            source: "tripadvisor.com".to_string(),
            popularity_score: Some(0.9),
            best_time_to_visit: None,
            visit_duration: Some("2 hours".to_string()),
        }
    }

    #[test]
    fn test_prompt_without_hotel_or_attractions() {
        let prompt = compose_prompt(&prefs(), None, &[]);
        assert!(prompt.contains("Paris"));
        assert!(prompt.contains("2024-06-01"));
        assert!(prompt.contains("2024-06-07"));
        assert!(prompt.contains("Hotel: Not selected yet"));
        assert!(prompt.contains("Hotel Location: Not available"));
        assert!(prompt.contains("Budget: $2000"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let attractions = vec![attraction("Louvre"), attraction("Eiffel Tower")];
        let a = compose_prompt(&prefs(), None, &attractions);
        let b = compose_prompt(&prefs(), None, &attractions);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_lists_every_attraction() {
        let attractions = vec![attraction("Louvre"), attraction("Eiffel Tower")];
        let prompt = compose_prompt(&prefs(), None, &attractions);
        assert!(prompt.contains("1. Louvre"));
        assert!(prompt.contains("2. Eiffel Tower"));
        assert!(prompt.contains("Category: landmark"));
        assert!(prompt.contains("Duration: 2 hours"));
        assert!(prompt.contains("Price Level: Not specified"));
        assert!(prompt.contains("Rating: 4.5/5.0"));
    }

    #[test]
    fn test_prompt_includes_hotel_details() {
        let hotel = Hotel {
            name: "Hotel Lutetia".to_string(),
            address: Some("45 Boulevard Raspail".to_string()),
            price_per_night: Some(300.0),
            rating: Some(4.8),
            amenities: vec!["wifi".to_string()],
            room_type: None,
            booking_url: None,
            description: String::new(),
            source: "booking.com".to_string(),
        };
        let prompt = compose_prompt(&prefs(), Some(&hotel), &[]);
        assert!(prompt.contains("Hotel: Hotel Lutetia"));
        assert!(prompt.contains("Hotel Location: 45 Boulevard Raspail"));
    }

    #[test]
    fn test_prompt_contains_directives_and_schema() {
        let prompt = compose_prompt(&prefs(), None, &[]);
        assert!(prompt.contains("10. Includes backup activities"));
        assert!(prompt.contains("\"daily_plans\""));
        assert!(prompt.contains("\"total_cost\""));
        assert!(prompt.contains("\"summary\""));
    }
}

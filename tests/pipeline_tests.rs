//! End-to-end pipeline tests for TripWeaver
//!
//! Exercises the library API from raw preference input through itinerary
//! building and export, with a scripted language model standing in for the
//! Groq API.

use tripweaver::{
    Hotel, ItineraryBuilder, ItineraryExporter, LanguageModel, PlannerError, PreferencesInput,
    TravelStyle, TripPreferences,
};

/// Language model stub replaying a canned reply
struct ScriptedModel {
    reply: String,
}

impl LanguageModel for ScriptedModel {
    fn complete(&self, _prompt: &str) -> tripweaver::Result<String> {
        Ok(self.reply.clone())
    }
}

fn paris_input() -> PreferencesInput {
    serde_json::from_str(
        r#"{
            "destination": "Paris",
            "start_date": "2024-06-01",
            "end_date": "2024-06-07",
            "budget": 2000.0,
            "travel_style": "moderate",
            "interests": ["culture", "food"],
            "accommodation_preference": "hotel",
            "transportation_preference": "public transport"
        }"#,
    )
    .unwrap()
}

fn paris_reply() -> String {
    r#"Here is your itinerary:
```json
{
    "daily_plans": [
        {
            "date": "2024-06-01",
            "activities": [
                {
                    "name": "Louvre Museum",
                    "start_time": "09:00",
                    "end_time": "12:30",
                    "location": "Rue de Rivoli",
                    "description": "World-famous art museum",
                    "category": "museum",
                    "cost": 100.00
                }
            ],
            "total_cost": 100.00
        },
        {
            "date": "2024-06-02",
            "activities": [
                {
                    "name": "Seine Dinner Cruise",
                    "start_time": "19:00",
                    "end_time": "21:00",
                    "location": "Port de la Bourdonnais",
                    "description": "Evening cruise with dinner",
                    "category": "restaurant",
                    "cost": 100.00,
                    "notes": "Book a window table"
                }
            ],
            "total_cost": 100.00,
            "notes": "Relaxed evening"
        }
    ],
    "total_cost": 200.00,
    "summary": "Two days of culture and food in Paris"
}
```"#
        .to_string()
}

fn hotel() -> Hotel {
    Hotel {
        name: "Hotel Le Marais".to_string(),
        address: Some("12 Rue des Archives".to_string()),
        price_per_night: Some(180.0),
        rating: Some(4.5),
        amenities: vec!["wifi".to_string()],
        room_type: None,
        booking_url: None,
        description: "Boutique hotel in the Marais".to_string(),
        source: "booking.com".to_string(),
    }
}

#[test]
fn test_full_pipeline_builds_itinerary() {
    let prefs = TripPreferences::try_from(paris_input()).unwrap();
    assert_eq!(prefs.duration_days(), 6);

    let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
        reply: paris_reply(),
    }));
    let itinerary = builder.build(&prefs, Some(hotel()), &[]).unwrap();

    assert_eq!(itinerary.destination, "Paris");
    assert_eq!(itinerary.travel_style, TravelStyle::Moderate);
    assert_eq!(itinerary.daily_plans.len(), 2);
    assert_eq!(itinerary.total_cost, 200.0);
    assert_eq!(itinerary.daily_plans[0].activities[0].name, "Louvre Museum");
    assert_eq!(
        itinerary.hotel.as_ref().map(|h| h.name.as_str()),
        Some("Hotel Le Marais")
    );
    assert_eq!(itinerary.summary, "Two days of culture and food in Paris");
}

#[test]
fn test_pipeline_rejects_inconsistent_totals() {
    let prefs = TripPreferences::try_from(paris_input()).unwrap();
    let reply = paris_reply().replace("\"total_cost\": 200.00", "\"total_cost\": 250.00");

    let builder = ItineraryBuilder::new(Box::new(ScriptedModel { reply }));
    let err = builder.build(&prefs, None, &[]).unwrap_err();

    assert!(matches!(err, PlannerError::ItineraryBuild { .. }));
    assert!(err.to_string().contains("total cost mismatch"));
}

#[test]
fn test_pipeline_rejects_unparseable_reply() {
    let prefs = TripPreferences::try_from(paris_input()).unwrap();
    let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
        reply: "Sorry, I cannot plan this trip.".to_string(),
    }));

    let err = builder.build(&prefs, None, &[]).unwrap_err();
    assert!(matches!(err, PlannerError::ItineraryBuild { .. }));
}

#[test]
fn test_invalid_preferences_are_rejected_before_any_search() {
    let mut input = paris_input();
    input.end_date = "2024-05-01".to_string();
    let err = TripPreferences::try_from(input).unwrap_err();
    assert!(matches!(err, PlannerError::Validation { .. }));
    assert!(err.to_string().contains("end date must be after start date"));

    let mut input = paris_input();
    input.budget = -100.0;
    let err = TripPreferences::try_from(input).unwrap_err();
    assert!(err.to_string().contains("budget must be a positive number"));
}

#[test]
fn test_built_itinerary_survives_export_round_trip() {
    let prefs = TripPreferences::try_from(paris_input()).unwrap();
    let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
        reply: paris_reply(),
    }));
    let itinerary = builder.build(&prefs, Some(hotel()), &[]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let exporter = ItineraryExporter::new(dir.path()).unwrap();
    let path = exporter.export_json(&itinerary, Some("paris")).unwrap();

    let restored: tripweaver::Itinerary =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(restored.daily_plans.len(), itinerary.daily_plans.len());
    assert_eq!(restored.total_cost, itinerary.total_cost);
    assert_eq!(
        restored.daily_plans[1].notes.as_deref(),
        Some("Relaxed evening")
    );
}

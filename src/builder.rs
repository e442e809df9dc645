//! Itinerary build pipeline
//!
//! Composes the prompt, calls the language model, and reconciles the reply.
//! Whichever step fails, the caller sees a single `ItineraryBuild` error
//! carrying the underlying cause message.

use crate::error::PlannerError;
use crate::llm::LanguageModel;
use crate::models::{Attraction, Hotel, Itinerary, TripPreferences};
use crate::prompt::compose_prompt;
use crate::reconcile::reconcile;
use crate::Result;
use tracing::{info, instrument};

/// Drives one preference-to-itinerary planning cycle
pub struct ItineraryBuilder {
    llm: Box<dyn LanguageModel>,
}

impl ItineraryBuilder {
    /// Create a builder around a language model client
    pub fn new(llm: Box<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Build a complete travel itinerary
    ///
    /// All-or-nothing: any failure in prompt delivery or reply
    /// reconciliation aborts the whole build.
    #[instrument(skip_all, fields(destination = %prefs.destination))]
    pub fn build(
        &self,
        prefs: &TripPreferences,
        hotel: Option<Hotel>,
        attractions: &[Attraction],
    ) -> Result<Itinerary> {
        self.try_build(prefs, hotel, attractions)
            .map_err(|e| PlannerError::itinerary_build(e.to_string()))
    }

    fn try_build(
        &self,
        prefs: &TripPreferences,
        hotel: Option<Hotel>,
        attractions: &[Attraction],
    ) -> Result<Itinerary> {
        let prompt = compose_prompt(prefs, hotel.as_ref(), attractions);
        info!(
            attractions = attractions.len(),
            hotel = hotel.is_some(),
            "Generating itinerary"
        );

        let reply = self.llm.complete(&prompt)?;

        let itinerary = reconcile(&reply, prefs, hotel)?;
        info!(
            days = itinerary.daily_plans.len(),
            total_cost = itinerary.total_cost,
            "Itinerary built"
        );
        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreferencesInput, TravelStyle};

    struct ScriptedModel {
        reply: std::result::Result<String, String>,
    }

    impl LanguageModel for ScriptedModel {
        fn complete(&self, _prompt: &str) -> Result<String> {
            self.reply
                .clone()
                .map_err(PlannerError::retrieval)
        }
    }

    fn prefs() -> TripPreferences {
        TripPreferences::try_from(PreferencesInput {
            destination: "Paris".to_string(),
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-07".to_string(),
            budget: 2000.0,
            travel_style: TravelStyle::Moderate,
            interests: vec!["culture".to_string()],
            accommodation_preference: "hotel".to_string(),
            transportation_preference: "mixed".to_string(),
            dietary_restrictions: None,
            special_requirements: None,
        })
        .unwrap()
    }

    fn valid_reply() -> String {
        r#"{
            "daily_plans": [
                {
                    "date": "2024-06-01",
                    "activities": [
                        {
                            "name": "Walking tour",
                            "start_time": "10:00",
                            "end_time": "12:00",
                            "location": "Le Marais",
                            "description": "Guided walk",
                            "category": "culture",
                            "cost": 25.0
                        }
                    ],
                    "total_cost": 25.0
                }
            ],
            "total_cost": 25.0,
            "summary": "One day in Paris"
        }"#
        .to_string()
    }

    #[test]
    fn test_build_succeeds_with_valid_reply() {
        let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
            reply: Ok(valid_reply()),
        }));
        let itinerary = builder.build(&prefs(), None, &[]).unwrap();
        assert_eq!(itinerary.total_cost, 25.0);
        assert_eq!(itinerary.summary, "One day in Paris");
    }

    #[test]
    fn test_llm_failure_surfaces_as_build_error() {
        let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
            reply: Err("connection refused".to_string()),
        }));
        let err = builder.build(&prefs(), None, &[]).unwrap_err();
        assert!(matches!(err, PlannerError::ItineraryBuild { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_parse_failure_surfaces_as_build_error() {
        let builder = ItineraryBuilder::new(Box::new(ScriptedModel {
            reply: Ok("not json at all".to_string()),
        }));
        let err = builder.build(&prefs(), None, &[]).unwrap_err();
        assert!(matches!(err, PlannerError::ItineraryBuild { .. }));
        assert!(err.to_string().contains("Failed to parse LLM response"));
    }
}

//! Reconciliation of LLM replies into validated itineraries
//!
//! The language model returns free text that should contain a JSON object,
//! possibly wrapped in prose or a fenced code block. This module extracts
//! the payload, parses it against a strict wire schema, cross-checks the
//! reported totals, and assembles the final [`Itinerary`]. Reconciliation
//! is all-or-nothing: no retry, no partial result.

use crate::error::PlannerError;
use crate::models::{Activity, DayPlan, Hotel, Itinerary, TripPreferences};
use crate::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Maximum drift tolerated between the summed day totals and the reply's
/// top-level total
const TOTAL_COST_TOLERANCE: f64 = 0.01;

/// Wire format of the model reply, as requested by the prompt schema
mod reply {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Envelope {
        pub daily_plans: Vec<Day>,
        pub total_cost: f64,
        pub summary: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Day {
        pub date: String,
        pub activities: Vec<Activity>,
        pub total_cost: f64,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Activity {
        pub name: String,
        pub start_time: String,
        pub end_time: String,
        pub location: String,
        pub description: String,
        pub category: String,
        #[serde(default)]
        pub cost: Option<f64>,
        #[serde(default)]
        pub booking_url: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }
}

/// Locate the JSON payload within a reply that may wrap it in prose
///
/// Priority: a ```json fenced block, then any fenced block, then the whole
/// text. An unterminated fence runs to the end of the text.
#[must_use]
pub fn extract_json_payload(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        }
    } else if let Some(start) = text.find("```") {
        let body = &text[start + "```".len()..];
        match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        }
    } else {
        text
    }
}

fn parse_reply(text: &str) -> Result<reply::Envelope> {
    let payload = extract_json_payload(text);
    serde_json::from_str(payload)
        .map_err(|e| PlannerError::response_parse(format!("invalid reply JSON: {e}")))
}

fn parse_day_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        PlannerError::response_parse(format!(
            "day date '{value}' is not in YYYY-MM-DD format"
        ))
    })
}

/// Convert a raw model reply into a validated [`Itinerary`]
///
/// Day totals are taken verbatim from the reply; only their sum is validated
/// against the reply's top-level `total_cost` (within 0.01). A day whose
/// reported total disagrees with the sum of its own activities' costs is
/// tolerated but logged.
pub fn reconcile(
    reply_text: &str,
    prefs: &TripPreferences,
    hotel: Option<Hotel>,
) -> Result<Itinerary> {
    let envelope = parse_reply(reply_text)?;

    if envelope.daily_plans.is_empty() {
        return Err(PlannerError::response_parse("no daily plans in itinerary"));
    }

    let mut daily_plans = Vec::with_capacity(envelope.daily_plans.len());
    let mut total_cost = 0.0;

    for day in envelope.daily_plans {
        let date = parse_day_date(&day.date)?;

        let activities: Vec<Activity> = day
            .activities
            .into_iter()
            .map(|act| Activity {
                name: act.name,
                start_time: act.start_time,
                end_time: act.end_time,
                location: act.location,
                description: act.description,
                category: act.category,
                cost: act.cost,
                booking_url: act.booking_url,
                notes: act.notes,
            })
            .collect();

        let activity_sum: f64 = activities.iter().filter_map(|a| a.cost).sum();
        if (activity_sum - day.total_cost).abs() > TOTAL_COST_TOLERANCE {
            warn!(
                date = %date,
                reported = day.total_cost,
                computed = activity_sum,
                "day total disagrees with summed activity costs"
            );
        }

        total_cost += day.total_cost;

        daily_plans.push(DayPlan {
            date,
            activities,
            total_cost: day.total_cost,
            notes: day.notes,
        });
    }

    if (total_cost - envelope.total_cost).abs() > TOTAL_COST_TOLERANCE {
        return Err(PlannerError::response_parse(format!(
            "total cost mismatch in itinerary: days sum to {total_cost:.2} but reply reports {:.2}",
            envelope.total_cost
        )));
    }

    debug!(
        days = daily_plans.len(),
        total_cost, "reply reconciled into itinerary"
    );

    Ok(Itinerary {
        destination: prefs.destination.clone(),
        start_date: prefs.start_date,
        end_date: prefs.end_date,
        daily_plans,
        total_cost,
        travel_style: prefs.travel_style,
        interests: prefs.interests.clone(),
        hotel,
        summary: envelope.summary,
    })
}

//! Hotel search over the Tavily API
//!
//! Builds a destination/date/price-band query, scrapes price, rating, and
//! amenities out of the result snippets, and returns candidates sorted by
//! rating.

use super::{extract_rating, wire, TavilyClient};
use crate::config::SearchConfig;
use crate::error::PlannerError;
use crate::models::{Hotel, TravelStyle, TripPreferences};
use crate::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, instrument};

const HOTEL_DOMAINS: &[&str] = &[
    "booking.com",
    "hotels.com",
    "expedia.com",
    "tripadvisor.com",
    "agoda.com",
    "hotel.com",
];

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:\.\d{2})?)").expect("valid price regex"));

const AMENITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("wifi", &["wifi", "wireless internet", "free wifi"]),
    ("pool", &["pool", "swimming pool", "indoor pool", "outdoor pool"]),
    ("gym", &["gym", "fitness center", "workout room"]),
    ("restaurant", &["restaurant", "dining", "breakfast", "room service"]),
    ("spa", &["spa", "massage", "wellness center"]),
    ("parking", &["parking", "free parking", "valet parking"]),
    ("bar", &["bar", "lounge", "pub"]),
    ("conference", &["conference room", "meeting room", "business center"]),
    ("laundry", &["laundry", "dry cleaning", "washing machine"]),
    ("air_conditioning", &["air conditioning", "climate control"]),
    ("elevator", &["elevator", "lift"]),
    ("accessibility", &["wheelchair accessible", "disabled access"]),
    ("pet_friendly", &["pet friendly", "pets allowed"]),
    ("shuttle", &["shuttle", "airport shuttle", "free shuttle"]),
    ("kitchen", &["kitchen", "kitchenette", "cooking facilities"]),
];

/// Tavily-backed hotel retrieval client
pub struct HotelSearcher {
    tavily: TavilyClient,
    max_results: u32,
}

/// Nightly price band derived from travel style and total budget
#[must_use]
pub fn price_range(style: TravelStyle, budget: f64) -> (f64, f64) {
    match style {
        TravelStyle::Luxury => (budget * 0.4, budget * 0.6),
        TravelStyle::Moderate => (budget * 0.2, budget * 0.4),
        TravelStyle::Budget => (0.0, budget * 0.2),
    }
}

/// Extract a "$123.45" style price from free text
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    PRICE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_amenities(description: &str) -> Vec<String> {
    let lower = description.to_lowercase();
    AMENITY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(amenity, _)| (*amenity).to_string())
        .collect()
}

fn parse_hotel(result: wire::SearchResult) -> Hotel {
    // Drop " - Booking.com" style suffixes from the result title
    let name = result
        .title
        .split(" - ")
        .next()
        .unwrap_or_default()
        .to_string();

    let price = extract_price(&result.content);
    let rating = extract_rating(&result.content);
    let amenities = extract_amenities(&result.content);

    Hotel {
        name,
        address: None, // Not available in search snippets
        price_per_night: price,
        rating,
        amenities,
        room_type: None,
        booking_url: result.url,
        description: result.content,
        source: result.source.unwrap_or_else(|| "Unknown".to_string()),
    }
}

impl HotelSearcher {
    /// Create a hotel searcher from search configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            tavily: TavilyClient::new(config)?,
            max_results: config.max_hotels,
        })
    }

    /// Search for hotels matching the trip preferences
    ///
    /// Returns candidates sorted by rating descending (unrated last).
    /// Fails with a retrieval error on transport failure, a non-2xx
    /// response, or zero results.
    #[instrument(skip_all, fields(destination = %prefs.destination))]
    pub fn search(&self, prefs: &TripPreferences) -> Result<Vec<Hotel>> {
        let (min_price, max_price) = price_range(prefs.travel_style, prefs.budget);

        let query = format!(
            "hotels in {} from {} to {} {} style price range ${:.0}-${:.0}",
            prefs.destination,
            prefs.start_date,
            prefs.end_date,
            prefs.travel_style,
            min_price,
            max_price
        );

        let results = self.tavily.search(&query, HOTEL_DOMAINS, self.max_results)?;
        if results.is_empty() {
            return Err(PlannerError::retrieval(
                "No hotels found matching your criteria",
            ));
        }

        let mut hotels: Vec<Hotel> = results.into_iter().map(parse_hotel).collect();
        hotels.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        });

        info!(hotels = hotels.len(), "Hotel search completed");
        Ok(hotels)
    }
}

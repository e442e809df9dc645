//! Display formatting for search results and itineraries

use crate::models::{Attraction, Hotel, Itinerary};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render a complete itinerary as readable plain text
#[must_use]
pub fn format_itinerary(itinerary: &Itinerary) -> String {
    let mut lines = vec![
        format!("Travel Itinerary for {}", itinerary.destination),
        format!(
            "Duration: {} to {}",
            itinerary.start_date, itinerary.end_date
        ),
        format!("Travel Style: {}", itinerary.travel_style),
        format!("Total Budget: ${:.2}", itinerary.total_cost),
        format!("Interests: {}", itinerary.interests.join(", ")),
    ];

    if let Some(hotel) = &itinerary.hotel {
        lines.push(format!("Hotel: {}", hotel.name));
        if let Some(address) = &hotel.address {
            lines.push(format!("Hotel Address: {address}"));
        }
    }

    lines.push("\nSummary:".to_string());
    lines.push(itinerary.summary.clone());
    lines.push("\nDetailed Itinerary:".to_string());

    for day_plan in &itinerary.daily_plans {
        lines.push(format!("\n{}", day_plan.date.format("%A, %B %d, %Y")));
        lines.push(format!("Total Cost: ${:.2}", day_plan.total_cost));

        for activity in &day_plan.activities {
            lines.push(format!(
                "\n{} - {}: {}",
                activity.start_time, activity.end_time, activity.name
            ));
            lines.push(format!("Location: {}", activity.location));
            lines.push(format!("Category: {}", activity.category));
            if let Some(cost) = activity.cost {
                lines.push(format!("Cost: ${cost:.2}"));
            }
            if !activity.description.is_empty() {
                lines.push(format!("Description: {}", activity.description));
            }
            if let Some(notes) = &activity.notes {
                lines.push(format!("Notes: {notes}"));
            }
        }

        if let Some(notes) = &day_plan.notes {
            lines.push(format!("\nDay Notes: {notes}"));
        }
    }

    lines.join("\n")
}

/// Render hotel candidates as a numbered listing
#[must_use]
pub fn format_hotels(hotels: &[Hotel]) -> String {
    if hotels.is_empty() {
        return "No hotels found matching your criteria.".to_string();
    }

    let mut out = String::from("Found the following hotels:\n");
    for (i, hotel) in hotels.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, hotel.name);
        if let Some(price) = hotel.price_per_night {
            let _ = writeln!(out, "   Price per night: ${price:.2}");
        }
        if let Some(rating) = hotel.rating {
            let _ = writeln!(out, "   Rating: {rating}/5.0");
        }
        if !hotel.amenities.is_empty() {
            let _ = writeln!(out, "   Amenities: {}", hotel.amenities.join(", "));
        }
        if let Some(url) = &hotel.booking_url {
            let _ = writeln!(out, "   Booking URL: {url}");
        }
        let _ = writeln!(out, "   Source: {}", hotel.source);
        let _ = writeln!(out, "   Description: {}...", snippet(&hotel.description));
    }
    out
}

/// Render attraction candidates grouped by category
#[must_use]
pub fn format_attractions(attractions: &[Attraction]) -> String {
    if attractions.is_empty() {
        return "No attractions found matching your criteria.".to_string();
    }

    let mut by_category: BTreeMap<&str, Vec<&Attraction>> = BTreeMap::new();
    for attraction in attractions {
        by_category
            .entry(attraction.category.as_str())
            .or_default()
            .push(attraction);
    }

    let mut out = String::from("Found the following attractions:\n");
    for (category, group) in by_category {
        let _ = writeln!(out, "\n{}:", category.to_uppercase());
        for (i, attraction) in group.iter().enumerate() {
            let _ = writeln!(out, "\n{}. {}", i + 1, attraction.name);
            if let Some(rating) = attraction.rating {
                let _ = writeln!(out, "   Rating: {rating}/5.0");
            }
            if let Some(level) = &attraction.price_level {
                let _ = writeln!(out, "   Price Level: {level}");
            }
            if let Some(duration) = &attraction.visit_duration {
                let _ = writeln!(out, "   Visit Duration: {duration}");
            }
            if let Some(website) = &attraction.website {
                let _ = writeln!(out, "   Website: {website}");
            }
            let _ = writeln!(out, "   Description: {}...", snippet(&attraction.description));
        }
    }
    out
}

/// Sum activity costs per category across the whole itinerary,
/// sorted by spend descending
#[must_use]
pub fn budget_by_category(itinerary: &Itinerary) -> Vec<(String, f64)> {
    let mut costs: BTreeMap<&str, f64> = BTreeMap::new();
    for day in &itinerary.daily_plans {
        for activity in &day.activities {
            if let Some(cost) = activity.cost {
                *costs.entry(activity.category.as_str()).or_default() += cost;
            }
        }
    }

    let mut breakdown: Vec<(String, f64)> = costs
        .into_iter()
        .map(|(category, cost)| (category.to_string(), cost))
        .collect();
    breakdown.sort_by(|a, b| b.1.total_cmp(&a.1));
    breakdown
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect::<String>().replace('\n', " ").trim().to_string()
}

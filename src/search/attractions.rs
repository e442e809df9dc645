//! Attraction search over the Tavily API
//!
//! Combines destination and interest queries, classifies each result into a
//! category from keyword tables, scrapes rating, price level, and visit
//! duration out of the snippets, and sorts by a popularity score.

use super::{extract_rating, wire, TavilyClient};
use crate::config::SearchConfig;
use crate::error::PlannerError;
use crate::models::{Attraction, TripPreferences};
use crate::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, instrument};

const ATTRACTION_DOMAINS: &[&str] = &[
    "tripadvisor.com",
    "lonelyplanet.com",
    "wikitravel.org",
    "timeout.com",
    "viator.com",
    "fodors.com",
    "roughguides.com",
];

const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("museum", &["museum", "gallery", "exhibition", "art center", "cultural center"]),
    ("landmark", &["landmark", "monument", "tower", "palace", "castle", "bridge", "statue"]),
    ("park", &["park", "garden", "nature reserve", "botanical garden", "zoo", "aquarium"]),
    ("restaurant", &["restaurant", "cafe", "dining", "food market", "culinary", "bistro"]),
    ("shopping", &["mall", "market", "shopping center", "boutique", "souvenir", "bazaar"]),
    ("entertainment", &["theater", "cinema", "amusement park", "concert hall", "stadium"]),
    ("religious", &["temple", "church", "mosque", "cathedral", "shrine", "monastery"]),
    ("historical", &["ruins", "historical site", "ancient", "archaeological", "heritage"]),
    ("outdoor", &["beach", "mountain", "hiking", "viewpoint", "scenic spot", "trail"]),
    ("nightlife", &["bar", "club", "night market", "entertainment district"]),
    ("transportation", &["station", "port", "airport", "terminal", "hub"]),
    ("education", &["university", "library", "school", "institute", "academy"]),
];

static PRICE_LEVEL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\$\$+\s*expensive", "$$$$"),
        (r"\$\$\s*moderate", "$$$"),
        (r"\$\s*cheap", "$$"),
        (r"free", "$"),
    ]
    .into_iter()
    .map(|(pattern, level)| (Regex::new(pattern).expect("valid price level regex"), level))
    .collect()
});

static HOUR_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)\s*hours?").expect("valid duration regex"));
static HOUR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*hours?").expect("valid duration regex"));
static DAY_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)\s*days?").expect("valid duration regex"));
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*days?").expect("valid duration regex"));

static BEST_TIME_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"best time to visit.*?(\w+ to \w+)",
        r"peak season.*?(\w+ to \w+)",
        r"recommended time.*?(\w+ to \w+)",
        r"ideal time.*?(\w+ to \w+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid best-time regex"))
    .collect()
});

/// Tavily-backed attraction retrieval client
pub struct AttractionSearcher {
    tavily: TavilyClient,
    max_results: u32,
}

fn classify_category(title: &str, content: &str) -> String {
    let title = title.to_lowercase();
    let content = content.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords
            .iter()
            .any(|kw| content.contains(kw) || title.contains(kw))
        {
            return (*category).to_string();
        }
    }
    "other".to_string()
}

fn extract_price_level(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    PRICE_LEVEL_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(&lower))
        .map(|(_, level)| (*level).to_string())
}

fn extract_duration(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if let Some(caps) = HOUR_RANGE_RE.captures(&lower).or_else(|| HOUR_RE.captures(&lower)) {
        return Some(format!("{} hours", &caps[1]));
    }
    if let Some(caps) = DAY_RANGE_RE.captures(&lower).or_else(|| DAY_RE.captures(&lower)) {
        return Some(format!("{} days", &caps[1]));
    }
    None
}

fn extract_best_time(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    BEST_TIME_RES
        .iter()
        .find_map(|re| re.captures(&lower))
        .map(|caps| caps[1].to_string())
}

/// 0-1 popularity score derived from the scraped rating
fn popularity_score(content: &str) -> f64 {
    let score = extract_rating(content).map_or(0.0, |r| r / 5.0);
    score.min(1.0)
}

fn parse_attraction(result: wire::SearchResult) -> Attraction {
    let name = result
        .title
        .split(" - ")
        .next()
        .unwrap_or_default()
        .to_string();

    let category = classify_category(&result.title, &result.content);
    let popularity = popularity_score(&result.content);

    Attraction {
        name,
        category,
        rating: extract_rating(&result.content),
        price_level: extract_price_level(&result.content),
        opening_hours: None, // Not available in search snippets
        website: result.url,
        source: result.source.unwrap_or_else(|| "Unknown".to_string()),
        popularity_score: Some(popularity),
        best_time_to_visit: extract_best_time(&result.content),
        visit_duration: extract_duration(&result.content),
        description: result.content,
    }
}

impl AttractionSearcher {
    /// Create an attraction searcher from search configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            tavily: TavilyClient::new(config)?,
            max_results: config.max_attractions,
        })
    }

    /// Search for attractions matching the trip preferences
    ///
    /// Returns candidates sorted by popularity score descending. Fails with
    /// a retrieval error on transport failure, a non-2xx response, or zero
    /// results.
    #[instrument(skip_all, fields(destination = %prefs.destination))]
    pub fn search(&self, prefs: &TripPreferences) -> Result<Vec<Attraction>> {
        let mut query_parts = vec![
            format!("top attractions in {}", prefs.destination),
            format!("best places to visit in {}", prefs.destination),
        ];
        if !prefs.interests.is_empty() {
            query_parts.push(format!(
                "{} in {}",
                prefs.interests.join(" "),
                prefs.destination
            ));
        }
        let query = query_parts.join(" | ");

        let results = self
            .tavily
            .search(&query, ATTRACTION_DOMAINS, self.max_results)?;
        if results.is_empty() {
            return Err(PlannerError::retrieval("No results found"));
        }

        let mut attractions: Vec<Attraction> =
            results.into_iter().map(parse_attraction).collect();
        attractions.sort_by(|a, b| {
            b.popularity_score
                .unwrap_or(0.0)
                .total_cmp(&a.popularity_score.unwrap_or(0.0))
        });

        info!(attractions = attractions.len(), "Attraction search completed");
        Ok(attractions)
    }
}

//! Itinerary export to JSON, HTML, and PDF
//!
//! HTML is rendered from a handlebars template; PDF reuses the HTML render
//! and converts it with the `wkhtmltopdf` binary.

use crate::error::PlannerError;
use crate::models::{Itinerary, TravelStyle};
use crate::Result;
use chrono::Utc;
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const TEMPLATE_NAME: &str = "itinerary";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Travel Itinerary - {{destination}}</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .header { text-align: center; margin-bottom: 30px; }
        .day { margin-bottom: 30px; border: 1px solid #ddd; padding: 20px; border-radius: 5px; }
        .activity { margin: 15px 0; padding: 10px; background: #f9f9f9; border-radius: 3px; }
        .time { color: #666; }
        .cost { color: #2c5282; }
        .notes { color: #718096; font-style: italic; }
    </style>
</head>
<body>
    <div class="header">
        <h1>Travel Itinerary for {{destination}}</h1>
        <p>Duration: {{start_date}} to {{end_date}}</p>
        <p>Travel Style: {{travel_style}}</p>
        <p>Total Budget: ${{total_cost}}</p>
        <p>Interests: {{interests}}</p>
    </div>

    <div class="summary">
        <h2>Trip Summary</h2>
        <p>{{summary}}</p>
    </div>

    {{#if hotel}}
    <div class="hotel">
        <h2>Accommodation</h2>
        <p><strong>{{hotel.name}}</strong></p>
        {{#if hotel.address}}<p>{{hotel.address}}</p>{{/if}}
    </div>
    {{/if}}

    <div class="itinerary">
        <h2>Detailed Itinerary</h2>
        {{#each days}}
        <div class="day">
            <h3>{{this.date}}</h3>
            <p>Total Cost: ${{this.total_cost}}</p>

            {{#each this.activities}}
            <div class="activity">
                <h4>{{this.name}}</h4>
                <p class="time">{{this.start_time}} - {{this.end_time}}</p>
                <p>Location: {{this.location}}</p>
                <p>Category: {{this.category}}</p>
                {{#if this.cost}}
                <p class="cost">Cost: ${{this.cost}}</p>
                {{/if}}
                {{#if this.description}}
                <p>{{this.description}}</p>
                {{/if}}
                {{#if this.notes}}
                <p class="notes">Notes: {{this.notes}}</p>
                {{/if}}
            </div>
            {{/each}}

            {{#if this.notes}}
            <p class="notes">Day Notes: {{this.notes}}</p>
            {{/if}}
        </div>
        {{/each}}
    </div>
</body>
</html>
"#;

/// Template context with display-formatted fields
#[derive(Debug, Serialize)]
struct ItineraryView {
    destination: String,
    start_date: String,
    end_date: String,
    travel_style: TravelStyle,
    total_cost: String,
    interests: String,
    summary: String,
    hotel: Option<HotelView>,
    days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
struct HotelView {
    name: String,
    address: Option<String>,
}

#[derive(Debug, Serialize)]
struct DayView {
    date: String,
    total_cost: String,
    notes: Option<String>,
    activities: Vec<ActivityView>,
}

#[derive(Debug, Serialize)]
struct ActivityView {
    name: String,
    start_time: String,
    end_time: String,
    location: String,
    category: String,
    cost: Option<String>,
    description: String,
    notes: Option<String>,
}

impl From<&Itinerary> for ItineraryView {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            destination: itinerary.destination.clone(),
            start_date: itinerary.start_date.format("%B %d, %Y").to_string(),
            end_date: itinerary.end_date.format("%B %d, %Y").to_string(),
            travel_style: itinerary.travel_style,
            total_cost: format!("{:.2}", itinerary.total_cost),
            interests: itinerary.interests.join(", "),
            summary: itinerary.summary.clone(),
            hotel: itinerary.hotel.as_ref().map(|h| HotelView {
                name: h.name.clone(),
                address: h.address.clone(),
            }),
            days: itinerary
                .daily_plans
                .iter()
                .map(|day| DayView {
                    date: day.date.format("%A, %B %d, %Y").to_string(),
                    total_cost: format!("{:.2}", day.total_cost),
                    notes: day.notes.clone(),
                    activities: day
                        .activities
                        .iter()
                        .map(|a| ActivityView {
                            name: a.name.clone(),
                            start_time: a.start_time.clone(),
                            end_time: a.end_time.clone(),
                            location: a.location.clone(),
                            category: a.category.clone(),
                            cost: a.cost.map(|c| format!("{c:.2}")),
                            description: a.description.clone(),
                            notes: a.notes.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Writes itineraries to files in the configured output directory
pub struct ItineraryExporter {
    output_dir: PathBuf,
    templates: Handlebars<'static>,
}

impl ItineraryExporter {
    /// Create an exporter writing into `output_dir` (created if missing)
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            PlannerError::export(format!(
                "failed to create output directory {}: {e}",
                output_dir.display()
            ))
        })?;

        let mut templates = Handlebars::new();
        templates
            .register_template_string(TEMPLATE_NAME, HTML_TEMPLATE)
            .map_err(|e| PlannerError::export(format!("invalid itinerary template: {e}")))?;

        Ok(Self {
            output_dir,
            templates,
        })
    }

    fn default_basename(itinerary: &Itinerary) -> String {
        let destination = itinerary.destination.replace(['/', ' '], "_");
        format!(
            "itinerary_{destination}_{}",
            Utc::now().format("%Y%m%d_%H%M%S")
        )
    }

    fn path_for(&self, basename: &str, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{basename}.{extension}"))
    }

    /// Export as pretty-printed JSON; returns the written path
    pub fn export_json(&self, itinerary: &Itinerary, basename: Option<&str>) -> Result<PathBuf> {
        let basename = basename
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_basename(itinerary));
        let path = self.path_for(&basename, "json");

        let body = serde_json::to_string_pretty(itinerary)
            .map_err(|e| PlannerError::export(format!("failed to serialize itinerary: {e}")))?;
        std::fs::write(&path, body)
            .map_err(|e| PlannerError::export(format!("failed to write {}: {e}", path.display())))?;

        info!(path = %path.display(), "Exported itinerary as JSON");
        Ok(path)
    }

    /// Export as a standalone HTML page; returns the written path
    pub fn export_html(&self, itinerary: &Itinerary, basename: Option<&str>) -> Result<PathBuf> {
        let basename = basename
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_basename(itinerary));
        let path = self.path_for(&basename, "html");

        let view = ItineraryView::from(itinerary);
        let html = self
            .templates
            .render(TEMPLATE_NAME, &view)
            .map_err(|e| PlannerError::export(format!("failed to render template: {e}")))?;
        std::fs::write(&path, html)
            .map_err(|e| PlannerError::export(format!("failed to write {}: {e}", path.display())))?;

        info!(path = %path.display(), "Exported itinerary as HTML");
        Ok(path)
    }

    /// Export as PDF by rendering HTML and converting it with `wkhtmltopdf`
    pub fn export_pdf(&self, itinerary: &Itinerary, basename: Option<&str>) -> Result<PathBuf> {
        let basename = basename
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_basename(itinerary));
        let html_path = self.export_html(itinerary, Some(&basename))?;
        let pdf_path = self.path_for(&basename, "pdf");

        let result = convert_to_pdf(&html_path, &pdf_path);

        // The intermediate HTML render is not part of the PDF export
        if let Err(e) = std::fs::remove_file(&html_path) {
            debug!("Could not remove intermediate HTML file: {e}");
        }

        result?;
        info!(path = %pdf_path.display(), "Exported itinerary as PDF");
        Ok(pdf_path)
    }

    /// Export in all available formats, returning (json, html, pdf) paths
    pub fn export_all(
        &self,
        itinerary: &Itinerary,
        basename: Option<&str>,
    ) -> Result<(PathBuf, PathBuf, PathBuf)> {
        let basename = basename
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_basename(itinerary));

        let json = self.export_json(itinerary, Some(&basename))?;
        let html = self.export_html(itinerary, Some(&basename))?;
        let pdf = self.export_pdf(itinerary, Some(&format!("{basename}_print")))?;
        Ok((json, html, pdf))
    }
}

fn convert_to_pdf(html_path: &Path, pdf_path: &Path) -> Result<()> {
    let output = Command::new("wkhtmltopdf")
        .arg(html_path)
        .arg(pdf_path)
        .output()
        .map_err(|e| PlannerError::export(format!("failed to run wkhtmltopdf: {e}")))?;

    if !output.status.success() {
        return Err(PlannerError::export(format!(
            "wkhtmltopdf failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Theatre and showtime search backed by a search-grounded generative model

use crate::ai::client::GenerativeModel;
use crate::ai::types::GroundingMetadata;
use crate::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theatre {
    pub name: String,
    #[serde(default)]
    pub showtimes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheatreMovie {
    pub title: String,
    #[serde(default)]
    pub is_target_movie: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theatres: Vec<Theatre>,
}

/// What the user is looking for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TheatreQuery {
    pub movie_title: String,
    pub movie_genre: String,
    pub movie_description: String,
    /// City, zip, address or `"lat, lon"`
    pub location: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl TheatreQuery {
    pub fn build_prompt(&self) -> String {
        format!(
            r#"Context: User wants to see the movie "{title}" ({genre}) in a theatre.
Movie Description: "{description}"
Location: {location}
Date: {date}

Task:
1. Find where "{title}" is playing near this location on this date, with showtimes.
2. Find 2-3 movies similar to {title} currently playing in this city.
3. Mark the requested movie with "isTargetMovie": true and recommendations with false.
4. Return strict JSON format.

JSON Schema:
{{
    "movies": [
        {{
            "title": "Movie Title",
            "isTargetMovie": boolean,
            "description": "Short tagline or reason for recommendation",
            "theatres": [
                {{ "name": "Cinema Name", "showtimes": ["7:00 PM", "9:30 PM"] }}
            ]
        }}
    ]
}}"#,
            title = self.movie_title,
            genre = self.movie_genre,
            description = self.movie_description,
            location = self.location,
            date = self.date,
        )
    }
}

/// Parsed answer plus the attribution the UI has to show
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TheatreResults {
    pub movies: Vec<TheatreMovie>,
    pub grounding: Option<GroundingMetadata>,
}

/// Strip markdown fences and decode the `movies` array
pub fn parse_theatre_response(text: &str) -> Result<Vec<TheatreMovie>> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| MarqueeError::AiResponse(format!("model returned invalid JSON: {}", e)))?;

    let movies = value
        .get("movies")
        .filter(|m| m.is_array())
        .cloned()
        .ok_or_else(|| MarqueeError::AiResponse("Invalid response format".to_string()))?;

    serde_json::from_value(movies)
        .map_err(|e| MarqueeError::AiResponse(format!("Invalid response format: {}", e)))
}

/// Run one theatre search
pub async fn find_theatres(model: &GenerativeModel, query: &TheatreQuery) -> Result<TheatreResults> {
    let response = model.generate_json(&query.build_prompt()).await?;
    let grounding = response.grounding_metadata().cloned();
    let movies = parse_theatre_response(&response.text()?)?;

    tracing::debug!("Theatre search returned {} movies", movies.len());
    Ok(TheatreResults { movies, grounding })
}

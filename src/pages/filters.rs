/// Browse filters and their URL query-string form
///
/// The query string is the persisted, shareable representation of the
/// browse page's search state, so encoding is canonical and decoding is
/// forgiving.

use crate::connect::types::BrowseMoviesVariables;
use crate::error::{MarqueeError, Result};
use std::ops::RangeInclusive;
use url::form_urlencoded;

/// Genres offered as checkboxes
pub const GENRES: [&str; 12] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Thriller",
    "Sci-Fi",
    "Horror",
    "Rom-Com",
    "Mystery",
    "Western",
    "Animation",
    "Musical",
];

pub const YEAR_RANGE: RangeInclusive<u16> = 1900..=2099;
pub const STAR_RANGE: RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilters {
    pub title: Option<String>,
    pub min_year: Option<u16>,
    pub max_year: Option<u16>,
    /// Stars, 1-5
    pub min_rating: Option<u8>,
    pub genres: Vec<String>,
}

impl BrowseFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = (!title.is_empty()).then(|| title.to_string());
    }

    pub fn set_min_year(&mut self, year: &str) -> Result<()> {
        self.min_year = parse_year(year)?;
        Ok(())
    }

    pub fn set_max_year(&mut self, year: &str) -> Result<()> {
        self.max_year = parse_year(year)?;
        Ok(())
    }

    /// Select a star rating; selecting the current rating again clears it
    pub fn toggle_rating(&mut self, stars: u8) -> Result<()> {
        if !STAR_RANGE.contains(&stars) {
            return Err(MarqueeError::invalid(format!("rating must be 1-5 stars, got {}", stars)));
        }

        self.min_rating = match self.min_rating {
            Some(current) if current == stars => None,
            _ => Some(stars),
        };
        Ok(())
    }

    pub fn clear_rating(&mut self) {
        self.min_rating = None;
    }

    /// Check or uncheck a genre
    pub fn set_genre(&mut self, genre: &str, checked: bool) -> Result<()> {
        if genre.is_empty() || genre.contains(',') {
            return Err(MarqueeError::invalid(format!("invalid genre '{}'", genre)));
        }

        if checked {
            if !self.genres.iter().any(|g| g == genre) {
                self.genres.push(genre.to_string());
            }
        } else {
            self.genres.retain(|g| g != genre);
        }
        Ok(())
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    /// Canonical `title&minYear&maxYear&minRating&genres` query string
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(ref title) = self.title {
            serializer.append_pair("title", title);
        }
        if let Some(year) = self.min_year {
            serializer.append_pair("minYear", &year.to_string());
        }
        if let Some(year) = self.max_year {
            serializer.append_pair("maxYear", &year.to_string());
        }
        if let Some(stars) = self.min_rating {
            serializer.append_pair("minRating", &stars.to_string());
        }
        if !self.genres.is_empty() {
            serializer.append_pair("genres", &self.genres.join(","));
        }

        serializer.finish()
    }

    /// Read filters back from a query string; unusable values are dropped
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut filters = BrowseFilters::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "title" => filters.title = Some(value.into_owned()),
                "minYear" => filters.min_year = lenient_year(&key, &value),
                "maxYear" => filters.max_year = lenient_year(&key, &value),
                "minRating" => {
                    filters.min_rating = value.parse::<u8>().ok().filter(|s| STAR_RANGE.contains(s));
                    if filters.min_rating.is_none() {
                        tracing::warn!("Ignoring minRating '{}'", value);
                    }
                }
                "genres" => {
                    filters.genres.clear();
                    for genre in value.split(',').filter(|g| !g.is_empty()) {
                        if !filters.genres.iter().any(|g| g == genre) {
                            filters.genres.push(genre.to_string());
                        }
                    }
                }
                other => tracing::debug!("Ignoring unknown browse parameter '{}'", other),
            }
        }

        filters
    }

    /// Variables for the BrowseMovies query; stars are doubled to the 10-point scale
    pub fn to_variables(&self) -> BrowseMoviesVariables {
        BrowseMoviesVariables {
            partial_title: self.title.clone(),
            min_date: self.min_year.map(|y| format!("{:04}-01-01", y)),
            max_date: self.max_year.map(|y| format!("{:04}-12-31", y)),
            min_rating: self.min_rating.map(|stars| i32::from(stars) * 2),
            genres: (!self.genres.is_empty()).then(|| self.genres.clone()),
        }
    }
}

fn parse_year(value: &str) -> Result<Option<u16>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    match value.parse::<u16>() {
        Ok(year) if YEAR_RANGE.contains(&year) => Ok(Some(year)),
        _ => Err(MarqueeError::invalid(format!(
            "year must be between {} and {}, got '{}'",
            YEAR_RANGE.start(),
            YEAR_RANGE.end(),
            value
        ))),
    }
}

fn lenient_year(key: &str, value: &str) -> Option<u16> {
    match parse_year(value) {
        Ok(year) => year,
        Err(_) => {
            tracing::warn!("Ignoring {} '{}'", key, value);
            None
        }
    }
}

use crate::ai::{find_theatres, GenerativeModel, GroundingMetadata, TheatreMovie, TheatreQuery, TheatreResults};
use crate::error::Result;
use crate::pages::view::{RequestGate, RequestTicket, ViewState};
use url::form_urlencoded;

pub const IDLE_HINT: &str = "Enter a location to see what's playing.";
pub const SEARCH_ERROR_MESSAGE: &str = "Could not find showtimes. Please try again.";
pub const NO_SHOWTIMES_MESSAGE: &str = "No showtimes found nearby for this date.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieBadge {
    SelectedMovie,
    Recommendation,
}

impl MovieBadge {
    pub fn label(self) -> &'static str {
        match self {
            MovieBadge::SelectedMovie => "Selected Movie",
            MovieBadge::Recommendation => "Recommendation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Showings {
    Theatres(Vec<crate::ai::Theatre>),
    NoShowtimes(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieResultCard {
    pub title: String,
    pub badge: MovieBadge,
    pub description: Option<String>,
    pub showings: Showings,
}

impl From<&TheatreMovie> for MovieResultCard {
    fn from(movie: &TheatreMovie) -> Self {
        MovieResultCard {
            title: movie.title.clone(),
            badge: if movie.is_target_movie {
                MovieBadge::SelectedMovie
            } else {
                MovieBadge::Recommendation
            },
            description: (!movie.description.is_empty()).then(|| movie.description.clone()),
            showings: if movie.theatres.is_empty() {
                Showings::NoShowtimes(NO_SHOWTIMES_MESSAGE)
            } else {
                Showings::Theatres(movie.theatres.clone())
            },
        }
    }
}

/// Attribution link for a grounded answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheatresView {
    Idle { hint: &'static str },
    Loading { location: String },
    Error(String),
    Results(Vec<MovieResultCard>),
}

/// "Box office" page: showtimes for a movie and similar films near a location
#[derive(Debug)]
pub struct FindTheatresPage {
    query: TheatreQuery,
    results: ViewState<Vec<TheatreMovie>>,
    grounding: Option<GroundingMetadata>,
    before_locate: Option<ViewState<Vec<TheatreMovie>>>,
    gate: RequestGate,
}

impl FindTheatresPage {
    /// Build from `?title=&genre=&description=`, dated today
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut movie = TheatreQuery {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            ..TheatreQuery::default()
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "title" => movie.movie_title = value.into_owned(),
                "genre" => movie.movie_genre = value.into_owned(),
                "description" => movie.movie_description = value.into_owned(),
                _ => {}
            }
        }

        Self {
            query: movie,
            results: ViewState::Idle,
            grounding: None,
            before_locate: None,
            gate: RequestGate::new(),
        }
    }

    pub fn query(&self) -> &TheatreQuery {
        &self.query
    }

    pub fn state(&self) -> &ViewState<Vec<TheatreMovie>> {
        &self.results
    }

    pub fn set_location(&mut self, location: &str) {
        self.query.location = location.to_string();
    }

    pub fn set_date(&mut self, date: &str) {
        self.query.date = date.to_string();
    }

    /// Geolocation was requested; show the spinner until the callback fires.
    ///
    /// Repeated requests keep the state from before the first one.
    pub fn begin_locate(&mut self) {
        let previous = std::mem::replace(&mut self.results, ViewState::Loading);
        if self.before_locate.is_none() {
            self.before_locate = Some(previous);
        }
    }

    /// Geolocation callback
    pub fn on_geolocation(&mut self, position: std::result::Result<(f64, f64), String>) {
        match position {
            Ok((latitude, longitude)) => {
                self.query.location = format!("{}, {}", latitude, longitude);
            }
            Err(e) => tracing::error!("Geolocation failed: {}", e),
        }

        if let Some(previous) = self.before_locate.take() {
            self.results = previous;
        }
    }

    /// Start a search; `None` when location or date is missing
    pub fn begin_search(&mut self) -> Option<(RequestTicket, TheatreQuery)> {
        if self.query.location.trim().is_empty() || self.query.date.trim().is_empty() {
            return None;
        }

        self.results = ViewState::Loading;
        self.grounding = None;
        self.before_locate = None;
        Some((self.gate.begin(), self.query.clone()))
    }

    pub fn finish_search(&mut self, ticket: RequestTicket, result: Result<TheatreResults>) -> bool {
        if !self.gate.is_current(ticket) {
            tracing::debug!("Discarding stale theatre search");
            return false;
        }

        match result {
            Ok(results) => {
                self.grounding = results.grounding;
                self.results = ViewState::Ready(results.movies);
            }
            Err(e) => {
                tracing::error!("Search Error: {}", e);
                self.results = ViewState::Failed(SEARCH_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Submit the form. Returns false when there was nothing to search for.
    pub async fn submit(&mut self, model: &GenerativeModel) -> bool {
        let Some((ticket, query)) = self.begin_search() else {
            return false;
        };

        let result = find_theatres(model, &query).await;
        self.finish_search(ticket, result);
        true
    }

    pub fn view(&self) -> TheatresView {
        match &self.results {
            ViewState::Loading => TheatresView::Loading {
                location: if self.query.location.is_empty() {
                    "your area".to_string()
                } else {
                    self.query.location.clone()
                },
            },
            ViewState::Failed(message) => TheatresView::Error(message.clone()),
            ViewState::Idle => TheatresView::Idle { hint: IDLE_HINT },
            ViewState::Ready(movies) if movies.is_empty() => TheatresView::Idle { hint: IDLE_HINT },
            ViewState::Ready(movies) => TheatresView::Results(movies.iter().map(MovieResultCard::from).collect()),
        }
    }

    /// Rendered search chips from the grounding metadata, if any
    pub fn search_entry_point(&self) -> Option<&str> {
        self.grounding
            .as_ref()?
            .search_entry_point
            .as_ref()?
            .rendered_content
            .as_deref()
    }

    /// Web sources the answer was grounded on
    pub fn sources(&self) -> Vec<SourceLink> {
        let Some(grounding) = &self.grounding else {
            return Vec::new();
        };

        grounding
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                let uri = web.uri.clone()?;
                let title = web
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Source".to_string());
                Some(SourceLink { uri, title })
            })
            .collect()
    }
}

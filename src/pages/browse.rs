use crate::connect::operations::browse_movies;
use crate::connect::types::{BrowseMoviesData, BrowseMoviesVariables, Movie};
use crate::connect::DataConnect;
use crate::error::Result;
use crate::pages::filters::BrowseFilters;
use crate::pages::view::{RequestGate, RequestTicket, ViewState};
use std::sync::Arc;

pub const BROWSE_PATH: &str = "/browse";
pub const PLACEHOLDER_COUNT: usize = 12;
pub const EMPTY_MESSAGE: &str = "No movies found matching your filters.";
pub const LOAD_ERROR_MESSAGE: &str = "Could not load movies. Please try again.";

/// One poster tile in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub image_url: Option<String>,
    pub link: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        MovieCard {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.release_year(),
            genre: movie.genre.clone(),
            image_url: movie.image_url.clone(),
            link: format!("/movies/{}", movie.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseView {
    Loading { placeholders: usize },
    Grid(Vec<MovieCard>),
    /// Nothing matched; offers a reset back to the unfiltered page
    Empty { message: &'static str, reset_location: &'static str },
    Error(String),
}

/// Browse page: sidebar filters over a movie grid
#[derive(Debug)]
pub struct BrowsePage {
    pending: BrowseFilters,
    location: String,
    movies: ViewState<Vec<Movie>>,
    gate: RequestGate,
}

impl Default for BrowsePage {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowsePage {
    pub fn new() -> Self {
        Self {
            pending: BrowseFilters::default(),
            location: BROWSE_PATH.to_string(),
            movies: ViewState::Loading,
            gate: RequestGate::new(),
        }
    }

    /// Filters edited in the sidebar but not yet applied
    pub fn pending(&self) -> &BrowseFilters {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut BrowseFilters {
        &mut self.pending
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn state(&self) -> &ViewState<Vec<Movie>> {
        &self.movies
    }

    /// Location that applies the pending filters
    pub fn apply_filters(&self) -> String {
        browse_location(&self.pending)
    }

    pub fn reset_filters(&mut self) -> String {
        self.pending = BrowseFilters::default();
        BROWSE_PATH.to_string()
    }

    /// Move to `location`: resync the sidebar from the URL and start a load
    pub fn navigate(&mut self, location: &str) -> (RequestTicket, BrowseMoviesVariables) {
        let query = location.split_once('?').map(|(_, q)| q).unwrap_or("");
        let applied = BrowseFilters::from_query_string(query);

        self.location = browse_location(&applied);
        self.pending = applied.clone();
        self.movies = ViewState::Loading;

        (self.gate.begin(), applied.to_variables())
    }

    /// Publish a load result; stale results are discarded. Returns whether it was applied.
    pub fn finish_load(&mut self, ticket: RequestTicket, result: Result<BrowseMoviesData>) -> bool {
        if !self.gate.is_current(ticket) {
            tracing::debug!("Discarding stale browse result");
            return false;
        }

        self.movies = match result {
            Ok(data) => ViewState::Ready(data.movies),
            Err(e) => {
                tracing::error!("Failed to browse movies: {}", e);
                ViewState::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Navigate and fetch in one step
    pub async fn load(&mut self, dc: &Arc<DataConnect>, location: &str) {
        let (ticket, vars) = self.navigate(location);
        tracing::debug!("Browsing {}", self.location);

        let result = browse_movies(dc, &vars).await.map(|r| r.data);
        self.finish_load(ticket, result);
    }

    pub fn view(&self) -> BrowseView {
        match &self.movies {
            ViewState::Idle | ViewState::Loading => BrowseView::Loading {
                placeholders: PLACEHOLDER_COUNT,
            },
            ViewState::Failed(message) => BrowseView::Error(message.clone()),
            ViewState::Ready(movies) if movies.is_empty() => BrowseView::Empty {
                message: EMPTY_MESSAGE,
                reset_location: BROWSE_PATH,
            },
            ViewState::Ready(movies) => BrowseView::Grid(movies.iter().map(MovieCard::from).collect()),
        }
    }
}

/// `/browse` plus the canonical query string, if any
pub fn browse_location(filters: &BrowseFilters) -> String {
    let query = filters.to_query_string();
    if query.is_empty() {
        BROWSE_PATH.to_string()
    } else {
        format!("{}?{}", BROWSE_PATH, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarqueeError;

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            release_date: Some("1982-06-25".to_string()),
            genre: Some("Sci-Fi".to_string()),
            image_url: None,
            description: None,
            rating: Some(8.1),
        }
    }

    #[test]
    fn test_starts_loading() {
        let page = BrowsePage::new();
        assert_eq!(page.view(), BrowseView::Loading { placeholders: 12 });
    }

    #[test]
    fn test_apply_and_navigate_round_trip() {
        let mut page = BrowsePage::new();
        page.pending_mut().set_title("blade");
        page.pending_mut().toggle_rating(4).unwrap();
        page.pending_mut().set_genre("Sci-Fi", true).unwrap();
        let expected = page.pending().clone();

        let location = page.apply_filters();
        assert_eq!(location, "/browse?title=blade&minRating=4&genres=Sci-Fi");

        page.reset_filters();
        let (_, vars) = page.navigate(&location);
        assert_eq!(page.pending(), &expected);
        assert_eq!(page.location(), location);
        assert_eq!(vars.min_rating, Some(8));
    }

    #[test]
    fn test_reset_returns_bare_path() {
        let mut page = BrowsePage::new();
        page.pending_mut().set_title("x");
        assert_eq!(page.reset_filters(), "/browse");
        assert!(page.pending().is_empty());
        assert_eq!(page.apply_filters(), "/browse");
    }

    #[test]
    fn test_empty_result_shows_reset_affordance() {
        let mut page = BrowsePage::new();
        let (ticket, _) = page.navigate("/browse?genres=Western");

        assert!(page.finish_load(ticket, Ok(BrowseMoviesData::default())));
        assert_eq!(
            page.view(),
            BrowseView::Empty {
                message: EMPTY_MESSAGE,
                reset_location: "/browse",
            }
        );
    }

    #[test]
    fn test_grid_cards() {
        let mut page = BrowsePage::new();
        let (ticket, _) = page.navigate("/browse");
        page.finish_load(
            ticket,
            Ok(BrowseMoviesData {
                movies: vec![movie("m1", "Blade Runner")],
            }),
        );

        match page.view() {
            BrowseView::Grid(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].year, Some(1982));
                assert_eq!(cards[0].link, "/movies/m1");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut page = BrowsePage::new();
        let (old, _) = page.navigate("/browse?title=old");
        let (new, _) = page.navigate("/browse?title=new");

        assert!(page.finish_load(new, Ok(BrowseMoviesData { movies: vec![movie("n", "New")] })));
        assert!(!page.finish_load(old, Ok(BrowseMoviesData { movies: vec![movie("o", "Old")] })));

        assert_eq!(page.state().ready().unwrap()[0].title, "New");
    }

    #[test]
    fn test_failure_becomes_generic_message() {
        let mut page = BrowsePage::new();
        let (ticket, _) = page.navigate("/browse");
        page.finish_load(ticket, Err(MarqueeError::Unauthorized("nope".to_string())));

        assert_eq!(page.view(), BrowseView::Error(LOAD_ERROR_MESSAGE.to_string()));
    }
}

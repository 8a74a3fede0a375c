use crate::connect::operations::search_movies_fts;
use crate::connect::types::{SearchMoviesFtsData, SearchMoviesFtsVariables};
use crate::connect::DataConnect;
use crate::error::Result;
use crate::pages::browse::MovieCard;
use crate::pages::view::{RequestGate, RequestTicket, ViewState};
use std::sync::Arc;

pub const ROW_PLACEHOLDERS: usize = 6;
pub const NO_RESULTS_MESSAGE: &str = "No movies found.";
pub const SEARCH_ERROR_MESSAGE: &str = "Could not complete the search. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum RowContent {
    Loading { placeholders: usize },
    Movies(Vec<MovieCard>),
    Empty(&'static str),
}

/// One section of the results page
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub title: &'static str,
    pub description: &'static str,
    pub content: RowContent,
}

/// Full-text search page comparing plain, phrase and query-syntax matching
#[derive(Debug, Default)]
pub struct AdvancedSearchPage {
    query: String,
    has_searched: bool,
    results: ViewState<SearchMoviesFtsData>,
    gate: RequestGate,
}

impl AdvancedSearchPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn state(&self) -> &ViewState<SearchMoviesFtsData> {
        &self.results
    }

    /// Start a search; `None` when the trimmed query is empty
    pub fn begin_search(&mut self) -> Option<(RequestTicket, SearchMoviesFtsVariables)> {
        let term = self.query.trim();
        if term.is_empty() {
            return None;
        }

        let vars = SearchMoviesFtsVariables {
            query: term.to_string(),
        };
        self.has_searched = true;
        self.results = ViewState::Loading;
        Some((self.gate.begin(), vars))
    }

    pub fn finish_search(&mut self, ticket: RequestTicket, result: Result<SearchMoviesFtsData>) -> bool {
        if !self.gate.is_current(ticket) {
            tracing::debug!("Discarding stale search result");
            return false;
        }

        self.results = match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                tracing::error!("Error performing search: {}", e);
                ViewState::Failed(SEARCH_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Submit the form. Returns false when there was nothing to search for.
    pub async fn submit(&mut self, dc: &Arc<DataConnect>) -> bool {
        let Some((ticket, vars)) = self.begin_search() else {
            return false;
        };

        let result = search_movies_fts(dc, &vars).await.map(|r| r.data);
        self.finish_search(ticket, result);
        true
    }

    /// Result sections; empty until the first search
    pub fn rows(&self) -> Vec<ResultRow> {
        if !self.has_searched {
            return Vec::new();
        }

        let data = self.results.ready();
        let sections: [(&'static str, &'static str, Option<&Vec<_>>); 3] = [
            (
                "Plain Text",
                "Every word matches somewhere in the title or description.",
                data.map(|d| &d.plain),
            ),
            (
                "Phrase",
                "The words appear together, in order.",
                data.map(|d| &d.phrase),
            ),
            (
                "Query",
                "Search-engine syntax: quotes, OR and -exclusions.",
                data.map(|d| &d.query),
            ),
        ];

        sections
            .into_iter()
            .map(|(title, description, movies)| {
                let content = if self.results.is_loading() {
                    RowContent::Loading {
                        placeholders: ROW_PLACEHOLDERS,
                    }
                } else {
                    match movies {
                        Some(movies) if !movies.is_empty() => {
                            RowContent::Movies(movies.iter().map(MovieCard::from).collect())
                        }
                        _ => RowContent::Empty(NO_RESULTS_MESSAGE),
                    }
                };
                ResultRow {
                    title,
                    description,
                    content,
                }
            })
            .collect()
    }
}

/// Page view-models
///
/// Each page is a small state machine (idle → loading → ready | failed) that
/// a front end drives and renders. Requests go through a [`RequestGate`] so a
/// slow response can never overwrite a newer one.

pub mod advanced_search;
pub mod browse;
pub mod filters;
pub mod find_theatres;
mod view;

pub use advanced_search::{AdvancedSearchPage, ResultRow, RowContent};
pub use browse::{browse_location, BrowsePage, BrowseView, MovieCard};
pub use filters::{BrowseFilters, GENRES};
pub use find_theatres::{FindTheatresPage, MovieBadge, MovieResultCard, Showings, SourceLink, TheatresView};
pub use view::{RequestGate, RequestTicket, ViewState};

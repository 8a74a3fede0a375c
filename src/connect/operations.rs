/// Typed operations of the movie connector
///
/// Every operation comes in two call shapes: `*_ref` binds to an explicit
/// client handle, `*_ref_default` binds to the process default installed with
/// [`DataConnect::install_default`]. The un-suffixed function builds the
/// reference and executes it in one step.

use crate::connect::connector::DataConnect;
use crate::connect::executor::{execute_mutation, execute_query, execute_ref, OperationResult};
use crate::connect::reference::{build_ref, OperationKind, OperationRef, VariableShape};
use crate::connect::types::*;
use crate::error::{MarqueeError, Result};
use serde_json::Value;
use std::sync::Arc;

/// One row of the operation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub kind: OperationKind,
    pub shape: VariableShape,
}

macro_rules! operation {
    // Operations that take variables
    (
        $(#[$doc:meta])*
        $spec:ident = $kind:ident $name:literal,
        required: [$($req:literal),*],
        optional: [$($opt:literal),*],
        $ref_fn:ident, $ref_default_fn:ident, $exec_fn:ident, $execute:ident,
        $vars:ty => $data:ty
    ) => {
        pub const $spec: OperationSpec = OperationSpec {
            name: $name,
            kind: OperationKind::$kind,
            shape: VariableShape {
                required: &[$($req),*],
                optional: &[$($opt),*],
            },
        };

        $(#[$doc])*
        pub fn $ref_fn(dc: &Arc<DataConnect>, vars: &$vars) -> Result<OperationRef<$data>> {
            build_ref(dc, $spec.name, $spec.kind, $spec.shape, Some(vars))
        }

        pub fn $ref_default_fn(vars: &$vars) -> Result<OperationRef<$data>> {
            $ref_fn(&DataConnect::default_instance()?, vars)
        }

        pub async fn $exec_fn(dc: &Arc<DataConnect>, vars: &$vars) -> Result<OperationResult<$data>> {
            $execute(&$ref_fn(dc, vars)?).await
        }
    };

    // Operations without variables
    (
        $(#[$doc:meta])*
        $spec:ident = $kind:ident $name:literal,
        $ref_fn:ident, $ref_default_fn:ident, $exec_fn:ident, $execute:ident,
        $data:ty
    ) => {
        pub const $spec: OperationSpec = OperationSpec {
            name: $name,
            kind: OperationKind::$kind,
            shape: VariableShape::NONE,
        };

        $(#[$doc])*
        pub fn $ref_fn(dc: &Arc<DataConnect>) -> Result<OperationRef<$data>> {
            build_ref::<_, Value>(dc, $spec.name, $spec.kind, $spec.shape, None)
        }

        pub fn $ref_default_fn() -> Result<OperationRef<$data>> {
            $ref_fn(&DataConnect::default_instance()?)
        }

        pub async fn $exec_fn(dc: &Arc<DataConnect>) -> Result<OperationResult<$data>> {
            $execute(&$ref_fn(dc)?).await
        }
    };
}

operation! {
    /// Create or update the signed-in user's profile
    UPDATE_USER = Mutation "UpdateUser",
    required: ["username"],
    optional: ["displayName", "imageUrl"],
    update_user_ref, update_user_ref_default, update_user, execute_mutation,
    UpdateUserVariables => UpdateUserData
}

operation! {
    /// Record that the signed-in user watched a movie
    ADD_WATCH = Mutation "AddWatch",
    required: ["movieId"],
    optional: ["watchedAt"],
    add_watch_ref, add_watch_ref_default, add_watch, execute_mutation,
    AddWatchVariables => AddWatchData
}

operation! {
    /// Rate and optionally review a movie
    ADD_REVIEW = Mutation "AddReview",
    required: ["movieId", "rating"],
    optional: ["content"],
    add_review_ref, add_review_ref_default, add_review, execute_mutation,
    AddReviewVariables => AddReviewData
}

operation! {
    DELETE_WATCH = Mutation "DeleteWatch",
    required: ["id"],
    optional: [],
    delete_watch_ref, delete_watch_ref_default, delete_watch, execute_mutation,
    DeleteWatchVariables => DeleteWatchData
}

operation! {
    HOME_PAGE = Query "HomePage",
    home_page_ref, home_page_ref_default, home_page, execute_query,
    HomePageData
}

operation! {
    /// Title search used by the search box
    SEARCH_MOVIES = Query "SearchMovies",
    required: ["query"],
    optional: [],
    search_movies_ref, search_movies_ref_default, search_movies, execute_query,
    SearchMoviesVariables => SearchMoviesData
}

operation! {
    MOVIE_PAGE = Query "MoviePage",
    required: ["id"],
    optional: [],
    movie_page_ref, movie_page_ref_default, movie_page, execute_query,
    MoviePageVariables => MoviePageData
}

operation! {
    WATCH_HISTORY_PAGE = Query "WatchHistoryPage",
    required: [],
    optional: ["limit", "offset"],
    watch_history_page_ref, watch_history_page_ref_default, watch_history_page, execute_query,
    WatchHistoryPageVariables => WatchHistoryPageData
}

operation! {
    /// Filtered catalogue listing behind the browse page
    BROWSE_MOVIES = Query "BrowseMovies",
    required: [],
    optional: ["partialTitle", "minDate", "maxDate", "minRating", "genres"],
    browse_movies_ref, browse_movies_ref_default, browse_movies, execute_query,
    BrowseMoviesVariables => BrowseMoviesData
}

operation! {
    GET_MOVIES = Query "GetMovies",
    required: [],
    optional: ["limit"],
    get_movies_ref, get_movies_ref_default, get_movies, execute_query,
    GetMoviesVariables => GetMoviesData
}

operation! {
    DETAILED_WATCH_HISTORY = Query "DetailedWatchHistory",
    detailed_watch_history_ref, detailed_watch_history_ref_default, detailed_watch_history, execute_query,
    DetailedWatchHistoryData
}

operation! {
    /// Plain, phrase and query-syntax full-text search in one round trip
    SEARCH_MOVIES_FTS = Query "SearchMoviesFts",
    required: ["query"],
    optional: [],
    search_movies_fts_ref, search_movies_fts_ref_default, search_movies_fts, execute_query,
    SearchMoviesFtsVariables => SearchMoviesFtsData
}

/// Every operation the connector exposes
pub const OPERATIONS: &[OperationSpec] = &[
    UPDATE_USER,
    ADD_WATCH,
    ADD_REVIEW,
    DELETE_WATCH,
    HOME_PAGE,
    SEARCH_MOVIES,
    MOVIE_PAGE,
    WATCH_HISTORY_PAGE,
    BROWSE_MOVIES,
    GET_MOVIES,
    DETAILED_WATCH_HISTORY,
    SEARCH_MOVIES_FTS,
];

/// Look up an operation by its wire name
pub fn operation_spec(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|spec| spec.name == name)
}

/// Bind untyped JSON variables to an operation named at runtime
pub fn dynamic_ref(dc: &Arc<DataConnect>, name: &str, vars: Option<&Value>) -> Result<OperationRef<Value>> {
    let spec = operation_spec(name)
        .ok_or_else(|| MarqueeError::invalid(format!("unknown operation '{}'", name)))?;

    build_ref(dc, spec.name, spec.kind, spec.shape, vars)
}

/// Execute an operation named at runtime, returning the raw payload
pub async fn execute_dynamic(
    dc: &Arc<DataConnect>,
    name: &str,
    vars: Option<&Value>,
) -> Result<OperationResult<Value>> {
    execute_ref(&dynamic_ref(dc, name, vars)?).await
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Movie as returned by list-style queries
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Average rating on the backend's 10-point scale
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        let day = date.get(..10).unwrap_or(date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub user: Option<User>,
    pub rating: i32,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Watch {
    pub id: String,
    #[serde(default)]
    pub watched_at: Option<String>,
    #[serde(default)]
    pub movie: Option<Movie>,
}

/// Movie with the relations the movie page shows
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Key returned by insert/upsert/delete mutations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityKey {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub movie_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserVariables {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchVariables {
    pub movie_id: String,
    /// `YYYY-MM-DD`; the backend defaults to today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewVariables {
    pub movie_id: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteWatchVariables {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMoviesVariables {
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePageVariables {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryPageVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseMoviesVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
    /// 10-point scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetMoviesVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMoviesFtsVariables {
    pub query: String,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UpdateUserData {
    pub user_upsert: EntityKey,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AddWatchData {
    pub watch_insert: EntityKey,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AddReviewData {
    pub review_upsert: EntityKey,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeleteWatchData {
    #[serde(default)]
    pub watch_delete: Option<EntityKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageData {
    #[serde(default)]
    pub top_rated: Vec<Movie>,
    #[serde(default)]
    pub recently_released: Vec<Movie>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MoviesData {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

pub type SearchMoviesData = MoviesData;
pub type BrowseMoviesData = MoviesData;
pub type GetMoviesData = MoviesData;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MoviePageData {
    #[serde(default)]
    pub movie: Option<MovieDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WatchHistoryData {
    #[serde(default)]
    pub watches: Vec<Watch>,
}

pub type WatchHistoryPageData = WatchHistoryData;
pub type DetailedWatchHistoryData = WatchHistoryData;

/// Three full-text search flavours run side by side
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchMoviesFtsData {
    #[serde(default)]
    pub plain: Vec<Movie>,
    #[serde(default)]
    pub phrase: Vec<Movie>,
    #[serde(default)]
    pub query: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_movie() {
        let json = r#"{
            "id": "m1",
            "title": "The Lost City",
            "releaseDate": "2022-03-25",
            "genre": "Adventure",
            "imageUrl": "https://example.com/lost.jpg"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title, "The Lost City");
        assert_eq!(movie.release_year(), Some(2022));
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn test_release_year_accepts_timestamps() {
        let movie = Movie {
            id: "m1".to_string(),
            title: "t".to_string(),
            release_date: Some("1999-03-31T00:00:00Z".to_string()),
            genre: None,
            image_url: None,
            description: None,
            rating: None,
        };
        assert_eq!(movie.release_year(), Some(1999));
    }

    #[test]
    fn test_browse_variables_skip_absent_fields() {
        let vars = BrowseMoviesVariables {
            partial_title: Some("alien".to_string()),
            min_rating: Some(8),
            ..Default::default()
        };

        let value = serde_json::to_value(&vars).unwrap();
        assert_eq!(value, serde_json::json!({ "partialTitle": "alien", "minRating": 8 }));
    }

    #[test]
    fn test_deserialize_movie_detail_with_reviews() {
        let json = r#"{
            "movie": {
                "id": "m1",
                "title": "Heat",
                "reviews": [
                    { "rating": 9, "content": "Great", "user": { "id": "u1", "username": "ana" } }
                ]
            }
        }"#;

        let data: MoviePageData = serde_json::from_str(json).unwrap();
        let detail = data.movie.unwrap();
        assert_eq!(detail.movie.title, "Heat");
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.reviews[0].user.as_ref().unwrap().username, "ana");
    }
}

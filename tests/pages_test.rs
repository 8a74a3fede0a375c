/// Page view-models driven against mocked backends
///
/// Covers the browse grid, full-text search rows, the theatre finder and the
/// once-per-store profile sync.

mod page_tests {
    use httpmock::prelude::*;
    use marquee::account::{AuthUser, ProfileSync, SyncOutcome};
    use marquee::ai::GenerativeModel;
    use marquee::config::example_config;
    use marquee::connect::{DataConnect, DataConnectOptions};
    use marquee::pages::{
        AdvancedSearchPage, BrowsePage, BrowseView, FindTheatresPage, MovieBadge, RowContent, Showings, TheatresView,
    };
    use marquee::state::{MemoryStateStore, StateStore, SAVED_USER_KEY};
    use serde_json::json;
    use std::sync::Arc;

    const RESOURCE: &str = "projects/movies-demo/locations/us-central1/services/app/connectors/connector";

    fn client_for(server: &MockServer) -> Arc<DataConnect> {
        let _ = tracing_subscriber::fmt::try_init();
        Arc::new(
            DataConnect::new(DataConnectOptions::new("movies-demo", "test-key"))
                .connect_emulator("127.0.0.1", server.port(), false),
        )
    }

    fn model_for(server: &MockServer) -> GenerativeModel {
        GenerativeModel::new("movies-demo", "test-key", "gemini-3-pro-preview")
            .with_google_search(true)
            .with_endpoint(server.base_url())
    }

    fn model_reply(text: &str, grounding: serde_json::Value) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP",
                "groundingMetadata": grounding
            }]
        })
    }

    #[tokio::test]
    async fn test_browse_filters_reach_the_backend() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/v1/{}:executeQuery", RESOURCE))
                .json_body(json!({
                    "name": RESOURCE,
                    "operationName": "BrowseMovies",
                    "variables": {
                        "minDate": "1990-01-01",
                        "minRating": 8,
                        "genres": ["Drama"]
                    }
                }));
            then.status(200).json_body(json!({
                "data": { "movies": [{ "id": "m1", "title": "Magnolia", "releaseDate": "1999-12-17", "genre": "Drama" }] }
            }));
        });

        let dc = client_for(&server);
        let mut page = BrowsePage::new();
        assert!(matches!(page.view(), BrowseView::Loading { .. }));

        let filters = page.pending_mut();
        filters.set_min_year("1990").unwrap();
        filters.toggle_rating(4).unwrap();
        filters.set_genre("Drama", true).unwrap();
        let location = page.apply_filters();

        page.load(&dc, &location).await;

        mock.assert();
        assert_eq!(page.location(), location);
        match page.view() {
            BrowseView::Grid(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].title, "Magnolia");
                assert_eq!(cards[0].year, Some(1999));
                assert_eq!(cards[0].link, "/movies/m1");
            }
            other => panic!("expected grid, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_browse_empty_and_failed_views() {
        let server = MockServer::start_async().await;
        let mut empty = server.mock(|when, then| {
            when.method(POST).path_includes("executeQuery");
            then.status(200).json_body(json!({ "data": { "movies": [] } }));
        });

        let dc = client_for(&server);
        let mut page = BrowsePage::new();
        page.load(&dc, "/browse?title=zzz").await;

        assert_eq!(
            page.view(),
            BrowseView::Empty {
                message: "No movies found matching your filters.",
                reset_location: "/browse",
            }
        );

        empty.delete();
        server.mock(|when, then| {
            when.method(POST).path_includes("executeQuery");
            then.status(500).json_body(json!({ "error": { "message": "boom" } }));
        });

        page.load(&dc, "/browse?title=zzz").await;
        assert_eq!(
            page.view(),
            BrowseView::Error("Could not load movies. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn test_advanced_search_rows() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).json_body(json!({
                "name": RESOURCE,
                "operationName": "SearchMoviesFts",
                "variables": { "query": "space" }
            }));
            then.status(200).json_body(json!({
                "data": {
                    "plain": [{ "id": "m1", "title": "Interstellar" }],
                    "phrase": [],
                    "query": [{ "id": "m2", "title": "Gravity" }]
                }
            }));
        });

        let dc = client_for(&server);
        let mut page = AdvancedSearchPage::new();
        page.set_query("   ");
        assert!(!page.submit(&dc).await);
        assert!(page.rows().is_empty());

        page.set_query("  space ");
        assert!(page.submit(&dc).await);
        mock.assert();

        let rows = page.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "Plain Text");
        assert!(matches!(&rows[0].content, RowContent::Movies(cards) if cards[0].title == "Interstellar"));
        assert_eq!(rows[1].content, RowContent::Empty("No movies found."));
        assert!(matches!(&rows[2].content, RowContent::Movies(cards) if cards[0].title == "Gravity"));
    }

    #[tokio::test]
    async fn test_find_theatres_results_and_sources() {
        let server = MockServer::start_async().await;
        let text = r#"```json
{"movies": [
  {"title": "Dune", "isTargetMovie": true, "description": "Spice", "theatres": [{"name": "Rex", "showtimes": ["7:00 PM"]}]},
  {"title": "Arrival", "isTargetMovie": false, "description": "Similar", "theatres": []}
]}
```"#;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/projects/movies-demo/models/gemini-3-pro-preview:generateContent")
                .header("x-goog-api-key", "test-key")
                .body_includes("googleSearch");
            then.status(200).json_body(model_reply(
                text,
                json!({
                    "searchEntryPoint": { "renderedContent": "<div>chips</div>" },
                    "groundingChunks": [{ "web": { "uri": "https://rex.example", "title": "" } }]
                }),
            ));
        });

        let model = model_for(&server);
        let mut page = FindTheatresPage::from_query_string("?title=Dune&genre=Sci-Fi&description=Desert");
        page.set_location("Berlin");
        page.set_date("2026-10-19");

        assert!(page.submit(&model).await);
        mock.assert();

        match page.view() {
            TheatresView::Results(cards) => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].badge, MovieBadge::SelectedMovie);
                assert!(matches!(&cards[0].showings, Showings::Theatres(t) if t[0].name == "Rex"));
                assert_eq!(cards[1].badge, MovieBadge::Recommendation);
                assert!(matches!(cards[1].showings, Showings::NoShowtimes(_)));
            }
            other => panic!("expected results, got {:?}", other),
        }
        assert_eq!(page.search_entry_point(), Some("<div>chips</div>"));
        let sources = page.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "Source");
    }

    #[tokio::test]
    async fn test_find_theatres_wrong_shape_reply() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path_includes(":generateContent");
            then.status(200).json_body(model_reply(r#"{"theatres": []}"#, json!(null)));
        });

        let model = model_for(&server);
        let mut page = FindTheatresPage::from_query_string("title=Dune");
        page.set_location("Berlin");

        assert!(page.submit(&model).await);
        assert_eq!(
            page.view(),
            TheatresView::Error("Could not find showtimes. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn test_find_theatres_truncated_reply() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path_includes(":generateContent");
            then.status(200).json_body(model_reply(r#"{"movies": ["#, json!(null)));
        });

        let model = model_for(&server);
        let mut page = FindTheatresPage::from_query_string("title=Dune");
        page.set_location("Berlin");

        assert!(page.submit(&model).await);
        mock.assert();
        assert_eq!(
            page.view(),
            TheatresView::Error("Could not find showtimes. Please try again.".to_string())
        );
    }

    #[tokio::test]
    async fn test_model_request_carries_app_id() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/projects/movies-demo/models/gemini-3-pro-preview:generateContent")
                .header("x-goog-api-key", "test-key")
                .header("x-firebase-appid", "1:123:web:abc");
            then.status(200).json_body(model_reply(r#"{"movies": []}"#, json!(null)));
        });

        let mut config = example_config();
        config.firebase.project_id = "movies-demo".to_string();
        config.firebase.api_key = "test-key".to_string();
        config.firebase.app_id = Some("1:123:web:abc".to_string());
        config.ai.model = "gemini-3-pro-preview".to_string();
        config.ai.endpoint = Some(server.base_url());

        let model = GenerativeModel::from_config(&config);
        let mut page = FindTheatresPage::from_query_string("title=Dune");
        page.set_location("Berlin");

        assert!(page.submit(&model).await);
        mock.assert();
        assert!(matches!(page.view(), TheatresView::Idle { .. }));
    }

    #[tokio::test]
    async fn test_model_request_omits_app_id_when_unset() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path_includes(":generateContent")
                .header_missing("x-firebase-appid");
            then.status(200).json_body(model_reply(r#"{"movies": []}"#, json!(null)));
        });

        let model = model_for(&server);
        let mut page = FindTheatresPage::from_query_string("title=Dune");
        page.set_location("Berlin");

        assert!(page.submit(&model).await);
        mock.assert();
    }

    #[tokio::test]
    async fn test_find_theatres_requires_location() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let model = model_for(&server);
        let mut page = FindTheatresPage::from_query_string("title=Dune");

        assert!(!page.submit(&model).await);
        mock.assert_calls(0);
        assert!(matches!(page.view(), TheatresView::Idle { .. }));
    }

    #[tokio::test]
    async fn test_profile_sync_runs_once() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/v1/{}:executeMutation", RESOURCE))
                .json_body(json!({
                    "name": RESOURCE,
                    "operationName": "UpdateUser",
                    "variables": { "username": "ana", "displayName": "Ana Lima" }
                }));
            then.status(200).json_body(json!({ "data": { "user_upsert": { "id": "u1" } } }));
        });

        let dc = client_for(&server);
        let sync = ProfileSync::new(MemoryStateStore::new());
        let user = AuthUser {
            email: Some("ana@example.com".to_string()),
            display_name: Some("Ana Lima".to_string()),
            photo_url: None,
        };

        assert_eq!(sync.on_auth_state_changed(&dc, None).await.unwrap(), SyncOutcome::SignedOut);
        assert_eq!(sync.on_auth_state_changed(&dc, Some(&user)).await.unwrap(), SyncOutcome::Synced);
        assert_eq!(
            sync.on_auth_state_changed(&dc, Some(&user)).await.unwrap(),
            SyncOutcome::AlreadySynced
        );

        mock.assert_calls(1);
        assert!(sync.store().flag(SAVED_USER_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_profile_sync_failure_leaves_flag_unset() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST);
            then.status(403);
        });

        let dc = client_for(&server);
        let sync = ProfileSync::new(MemoryStateStore::new());
        let user = AuthUser {
            email: Some("ana@example.com".to_string()),
            ..Default::default()
        };

        assert!(sync.on_auth_state_changed(&dc, Some(&user)).await.is_err());
        assert!(!sync.store().flag(SAVED_USER_KEY).unwrap());
    }
}

mod common;

use std::time::Duration;

use common::*;
use serde_json::json;
use songpt::ErrorKind;
use songpt::openai::OpenAiClient;
use songpt::pipeline::{PlaylistPipeline, Resolution, SpotifyAccount};
use songpt::spotify::SpotifyClient;
use songpt::types::{AccessToken, TokenScope};
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn account() -> SpotifyAccount {
    SpotifyAccount {
        credentials: credentials(),
        refresh_token: REFRESH_TOKEN.to_string(),
        account_id: ACCOUNT_ID.to_string(),
    }
}

fn seeds() -> Vec<String> {
    vec![
        "Circles Post Malone".to_string(),
        "Humble Kendrick Lamar".to_string(),
    ]
}

fn pipeline_for(server: &MockServer) -> PlaylistPipeline {
    PlaylistPipeline::new(settings_for(server))
}

async fn mount_create_playlist(server: &MockServer, expected_uris: &[&str], times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/users/{}/playlists", ACCOUNT_ID)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "37i9dQZF1DX" })))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/users/{}/playlists/37i9dQZF1DX/tracks", ACCOUNT_ID)))
        .and(body_json(json!({ "uris": expected_uris })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_playlist_from_songs_end_to_end() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"["Sunflower Post Malone","DNA Kendrick Lamar"]"#).await;
    mount_search(&server, "Sunflower Post Malone", &[("sun1", "Sunflower")]).await;
    mount_search(&server, "DNA Kendrick Lamar", &[("dna1", "DNA.")]).await;
    mount_create_playlist(&server, &["spotify:track:sun1", "spotify:track:dna1"], 1).await;

    let playlist_id = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap();

    assert_eq!(playlist_id, "37i9dQZF1DX");
}

#[tokio::test]
async fn test_playlist_from_keywords_end_to_end() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"["Lullaby of Woe Marcin Przybylowicz"]"#).await;
    mount_search(
        &server,
        "Lullaby of Woe Marcin Przybylowicz",
        &[("woe1", "Lullaby of Woe")],
    )
    .await;
    mount_create_playlist(&server, &["spotify:track:woe1"], 1).await;

    let playlist_id = pipeline_for(&server)
        .from_keywords(
            API_KEY,
            &account(),
            "Test Playlist - Witcher 3",
            "This is an AI-generated playlist based on The Witcher 3.",
            "The video game The Witcher 3",
        )
        .await
        .unwrap();

    assert_eq!(playlist_id, "37i9dQZF1DX");

    let requests = server.received_requests().await.unwrap();
    let completion = requests
        .iter()
        .find(|r| r.url.path() == "/v1/chat/completions")
        .unwrap();
    let body: serde_json::Value = completion.body_json().unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains("The category fits these keywords: The video game The Witcher 3."));
}

#[tokio::test]
async fn test_unresolvable_titles_are_skipped() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"["Song A","Song B","Song C","Song D"]"#).await;
    mount_search(&server, "Song A", &[("a1", "Song A")]).await;
    mount_search(&server, "Song B", &[]).await;
    mount_search(&server, "Song C", &[("c1", "Song C")]).await;
    // "Song D" has no mock; the 404 surfaces as an upstream error and is skipped too
    mount_create_playlist(&server, &["spotify:track:a1", "spotify:track:c1"], 1).await;

    let playlist_id = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap();

    assert_eq!(playlist_id, "37i9dQZF1DX");
}

#[tokio::test]
async fn test_no_resolvable_tracks_creates_nothing() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"["Song A","Song B"]"#).await;
    mount_search(&server, "Song A", &[]).await;
    mount_search(&server, "Song B", &[]).await;
    mount_create_playlist(&server, &[], 0).await;

    let err = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoResolvableTracks);
}

#[tokio::test]
async fn test_empty_suggestion_list_is_no_resolvable_tracks() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"[null, "", 7]"#).await;
    mount_create_playlist(&server, &[], 0).await;

    let err = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoResolvableTracks);
}

#[tokio::test]
async fn test_malformed_completion_propagates() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, "Sunflower Post Malone, DNA Kendrick Lamar").await;
    mount_create_playlist(&server, &[], 0).await;

    let err = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamMalformedPayload);
}

#[tokio::test]
async fn test_token_failure_stops_pipeline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = pipeline_for(&server)
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
}

#[tokio::test]
async fn test_oversized_details_fail_before_any_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);

    let err = pipeline
        .from_songs(API_KEY, &account(), &"n".repeat(101), "desc", &seeds())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = pipeline
        .from_keywords(API_KEY, &account(), "Test Playlist", &"d".repeat(281), "rain")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_resolution_order_follows_suggestions() {
    let server = MockServer::start().await;

    // the first lookup answers last
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "Slow Song"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_body(&[("slow1", "Slow Song")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_search(&server, "Fast Song", &[("fast1", "Fast Song")]).await;
    mount_search(&server, "Missing Song", &[]).await;
    mount_search(&server, "Last Song", &[("last1", "Last Song")]).await;

    let mut settings = settings_for(&server);
    settings.concurrency = 3;
    let pipeline = PlaylistPipeline::new(settings);

    let titles: Vec<String> = ["Slow Song", "Fast Song", "Missing Song", "Last Song"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    let token = AccessToken {
        value: APP_TOKEN.to_string(),
        scope: TokenScope::Application,
    };

    let resolutions = pipeline.resolve_titles(&titles, &token).await;
    assert_eq!(resolutions.len(), 4);

    match &resolutions[0] {
        Resolution::Resolved(track) => assert_eq!(track.id, "slow1"),
        other => panic!("Expected slow1, got {:?}", other),
    }
    match &resolutions[1] {
        Resolution::Resolved(track) => assert_eq!(track.id, "fast1"),
        other => panic!("Expected fast1, got {:?}", other),
    }
    match &resolutions[2] {
        Resolution::Skipped { title, reason } => {
            assert_eq!(title, "Missing Song");
            assert!(reason.contains("Not found"));
        }
        other => panic!("Expected Missing Song to be skipped, got {:?}", other),
    }
    match &resolutions[3] {
        Resolution::Resolved(track) => assert_eq!(track.id, "last1"),
        other => panic!("Expected last1, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pipeline_with_progress_and_shared_http_client() {
    let server = MockServer::start().await;
    mount_tokens(&server).await;
    mount_completion(&server, r#"["Sunflower Post Malone","Unknown Song"]"#).await;
    mount_search(&server, "Sunflower Post Malone", &[("sun1", "Sunflower")]).await;
    mount_search(&server, "Unknown Song", &[]).await;
    mount_create_playlist(&server, &["spotify:track:sun1"], 1).await;

    let settings = settings_for(&server);
    let http = reqwest::Client::new();
    let pipeline = PlaylistPipeline::from_clients(
        OpenAiClient::with_http(http.clone(), &settings),
        SpotifyClient::with_http(http, &settings),
        settings,
    )
    .with_progress(true);

    let playlist_id = pipeline
        .from_songs(API_KEY, &account(), "Test Playlist", "desc", &seeds())
        .await
        .unwrap();

    assert_eq!(playlist_id, "37i9dQZF1DX");
}

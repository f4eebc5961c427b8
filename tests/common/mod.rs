#![allow(dead_code)]

use serde_json::{Value, json};
use songpt::config::Settings;
use songpt::types::Credentials;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-test";
pub const ENCODED_CREDENTIALS: &str = "Y2xpZW50OnNlY3JldA==";
pub const REFRESH_TOKEN: &str = "refresh-123";
pub const ACCOUNT_ID: &str = "account-1";
pub const APP_TOKEN: &str = "app-token";
pub const ACCOUNT_TOKEN: &str = "account-token";

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        openai_api_url: format!("{}/v1/chat/completions", server.uri()),
        spotify_api_url: format!("{}/v1", server.uri()),
        spotify_token_url: format!("{}/api/token", server.uri()),
        ..Settings::default()
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(ENCODED_CREDENTIALS)
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

pub async fn mount_tokens(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", format!("Basic {}", ENCODED_CREDENTIALS).as_str()))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": APP_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", format!("Basic {}", ENCODED_CREDENTIALS).as_str()))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(format!("refresh_token={}", REFRESH_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCOUNT_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(server)
        .await;
}

pub fn search_body(tracks: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = tracks
        .iter()
        .map(|(id, name)| {
            json!({
                "id": id,
                "name": name,
                "uri": format!("spotify:track:{}", id)
            })
        })
        .collect();
    json!({ "tracks": { "href": "", "items": items, "total": items.len() } })
}

pub async fn mount_search(server: &MockServer, query: &str, tracks: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", query))
        .and(query_param("type", "track"))
        .and(header("authorization", format!("Bearer {}", APP_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body(tracks)))
        .mount(server)
        .await;
}

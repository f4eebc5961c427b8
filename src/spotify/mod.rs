//! # Spotify Integration Module
//!
//! Catalog client and credential resolver for the Spotify Web API. It covers
//! exactly what playlist generation needs:
//!
//! ```text
//! Playlist Pipeline
//!          ↓
//! SpotifyClient
//!     ├── auth      (client-credentials and refresh-token exchanges)
//!     ├── search    (track search, title resolution)
//!     └── playlist  (create playlist, attach tracks)
//!          ↓
//! reqwest
//! ```
//!
//! Every operation performs a single attempt. Transport failures map to
//! [`crate::error::SongptError::UpstreamUnavailable`]; argument checks run
//! before any request is sent.

pub mod auth;
pub mod playlist;
pub mod search;

use reqwest::Client;

use crate::config::Settings;

/// Thin handle over a shared `reqwest::Client`; cloning is cheap, which lets
/// the pipeline move copies into spawned lookup tasks.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_url: String,
}

impl SpotifyClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_http(Client::new(), settings)
    }

    pub fn with_http(http: Client, settings: &Settings) -> Self {
        SpotifyClient {
            http,
            api_url: settings.spotify_api_url.trim_end_matches('/').to_string(),
            token_url: settings.spotify_token_url.clone(),
        }
    }
}

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Spotify client credentials in their Basic-auth encoded form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

impl Credentials {
    /// Wraps an already encoded `base64(client_id:client_secret)` value.
    pub fn new(encoded: impl Into<String>) -> Self {
        Credentials(encoded.into())
    }

    /// Encodes a client id and secret pair.
    pub fn from_client(client_id: &str, client_secret: &str) -> Self {
        Credentials(STANDARD.encode(format!("{}:{}", client_id, client_secret)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Client-credentials token, good for catalog search.
    Application,
    /// Refresh-token derived token, good for mutating the account's playlists.
    Account,
}

/// Short-lived bearer token. Never cached between pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub scope: TokenScope,
}

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Basis for a suggestion prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionBasis {
    Songs(Vec<String>),
    Keywords(String),
}

/// A Spotify track as returned by the search endpoint. Only the fields the
/// pipeline needs are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

/// Input for [`crate::spotify::SpotifyClient::create_playlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub track_ids: Vec<String>,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::{
    error::{Res, SongptError},
    spotify::SpotifyClient,
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest, NewPlaylist},
    utils,
};

const CALL_FAILED: &str =
    "Could not call Spotify API. Make sure you have supplied a valid Spotify Account Access Token.";

impl SpotifyClient {
    /// Creates a playlist for `account_id` and attaches the given tracks.
    ///
    /// Performs two sequential requests:
    /// 1. `POST /users/{account_id}/playlists` with name, description (plus
    ///    the attribution suffix) and visibility
    /// 2. `POST /users/{account_id}/playlists/{id}/tracks` with
    ///    `spotify:track:<id>` URIs in the given order
    ///
    /// # Validation
    ///
    /// All checks run before the first request:
    /// - name non-empty, at most 100 characters
    /// - description non-empty, at most 280 characters (before the suffix)
    /// - at least one track id
    /// - non-empty account access token
    ///
    /// # Errors
    ///
    /// - [`SongptError::InvalidArgument`] for any failed check above
    /// - [`SongptError::UpstreamUnavailable`] if either request fails in
    ///   transport or the create response has no playlist `id`
    ///
    /// # Known limitation
    ///
    /// The attach response is not inspected. Receiving any response counts as
    /// success, so per-track failures are not reported, and a playlist whose
    /// attach call failed is left in place without tracks.
    pub async fn create_playlist(
        &self,
        playlist: &NewPlaylist,
        account_id: &str,
        account_access_token: &str,
    ) -> Res<String> {
        validate_playlist(playlist)?;
        utils::require_non_empty(account_access_token, "Spotify account access token")?;

        let playlists_url = format!(
            "{uri}/users/{account}/playlists",
            uri = &self.api_url,
            account = account_id
        );

        let body = CreatePlaylistRequest {
            name: playlist.name.clone(),
            description: utils::with_attribution(&playlist.description),
            public: playlist.public,
        };

        let response = self
            .http
            .post(&playlists_url)
            .header(ACCEPT, "application/json")
            .bearer_auth(account_access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SongptError::UpstreamUnavailable(format!("{} ({})", CALL_FAILED, e)))?;

        let json: Value = response.json().await?;
        let playlist_id = match json["id"].as_str() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(SongptError::UpstreamUnavailable(
                    "Spotify API did not return a playlist ID.".to_string(),
                ));
            }
        };

        let add_tracks = AddTrackToPlaylistRequest {
            uris: playlist
                .track_ids
                .iter()
                .map(|id| utils::track_uri(id))
                .collect(),
        };

        self.http
            .post(format!("{}/{}/tracks", playlists_url, playlist_id))
            .header(ACCEPT, "application/json")
            .bearer_auth(account_access_token)
            .json(&add_tracks)
            .send()
            .await
            .map_err(|e| SongptError::UpstreamUnavailable(format!("{} ({})", CALL_FAILED, e)))?;

        Ok(playlist_id)
    }
}

/// Checks name and description limits.
pub fn validate_details(name: &str, description: &str) -> Res<()> {
    utils::require_non_empty(name, "playlist name")?;
    utils::require_max_chars(name, utils::PLAYLIST_NAME_MAX_CHARS, "Playlist name")?;
    utils::require_non_empty(description, "playlist description")?;
    utils::require_max_chars(
        description,
        utils::PLAYLIST_DESCRIPTION_MAX_CHARS,
        "Playlist description",
    )
}

pub fn validate_playlist(playlist: &NewPlaylist) -> Res<()> {
    validate_details(&playlist.name, &playlist.description)?;
    if playlist.track_ids.is_empty() {
        return Err(SongptError::InvalidArgument(
            "No track IDs supplied.".to_string(),
        ));
    }
    Ok(())
}

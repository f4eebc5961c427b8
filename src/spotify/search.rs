use serde_json::Value;

use crate::{
    error::{Res, SongptError},
    spotify::SpotifyClient,
    types::Track,
    utils,
};

impl SpotifyClient {
    /// Searches the catalog for tracks matching `query`.
    ///
    /// The query is URL-encoded and restricted to `type=track`. Results keep
    /// Spotify's ranking; items that do not decode as a track are skipped.
    /// An empty result list is a valid outcome.
    ///
    /// # Errors
    ///
    /// - [`SongptError::InvalidArgument`] if `access_token` is empty
    /// - [`SongptError::UpstreamUnavailable`] on transport failure or when the
    ///   response has no `tracks.items` array
    pub async fn search_tracks(&self, query: &str, access_token: &str) -> Res<Vec<Track>> {
        utils::require_non_empty(access_token, "Spotify access token")?;

        let api_url = format!("{uri}/search", uri = &self.api_url);
        let response = self
            .http
            .get(&api_url)
            .query(&[("q", query), ("type", "track")])
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                SongptError::UpstreamUnavailable(format!(
                    "Could not call Spotify API. Make sure you have supplied a valid Spotify Access Token. ({})",
                    e
                ))
            })?;

        let json: Value = response.json().await?;
        let items = json
            .get("tracks")
            .and_then(|tracks| tracks.get("items"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SongptError::UpstreamUnavailable(
                    "Spotify search response has no tracks.items.".to_string(),
                )
            })?;

        // null or partial items are dropped, the remaining ranking is kept
        Ok(items
            .iter()
            .filter_map(|item| serde_json::from_value::<Track>(item.clone()).ok())
            .collect())
    }

    /// Resolves a free-text title to the first matching track.
    ///
    /// The first search hit is taken as authoritative.
    ///
    /// # Errors
    ///
    /// [`SongptError::NotFound`] if the search yields nothing; search errors
    /// propagate unchanged.
    pub async fn track_for_title(&self, title: &str, access_token: &str) -> Res<Track> {
        utils::require_non_empty(access_token, "Spotify access token")?;

        self.search_tracks(title, access_token)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                SongptError::NotFound(format!(
                    "Could not find a Spotify track for \"{}\".",
                    title
                ))
            })
    }
}

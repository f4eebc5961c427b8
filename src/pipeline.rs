//! # Playlist Pipeline
//!
//! Chains the Spotify and OpenAI clients into the two end-to-end flows:
//!
//! ```text
//! app token → account token → suggestions → resolved track ids → playlist id
//! ```
//!
//! Every step short-circuits on failure and the error reaches the caller
//! unchanged, with one exception: a suggestion that cannot be resolved to a
//! Spotify track is skipped with a warning. If nothing resolves, the run
//! fails with [`SongptError::NoResolvableTracks`] before any playlist is
//! created.
//!
//! There is no rollback. When the attach call fails after the playlist was
//! created, the empty playlist stays on the account.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;

use crate::{
    config::Settings,
    error::{Res, SongptError},
    info,
    openai::OpenAiClient,
    spotify::{SpotifyClient, playlist::validate_details},
    success,
    types::{AccessToken, Credentials, NewPlaylist, SuggestionBasis, Track},
    warning,
};

/// The Spotify account a playlist is created for.
#[derive(Clone)]
pub struct SpotifyAccount {
    pub credentials: Credentials,
    pub refresh_token: String,
    pub account_id: String,
}

impl fmt::Debug for SpotifyAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyAccount")
            .field("credentials", &self.credentials)
            .field("refresh_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Outcome of looking up one suggested title.
#[derive(Debug)]
pub enum Resolution {
    Resolved(Track),
    Skipped { title: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct PlaylistPipeline {
    openai: OpenAiClient,
    spotify: SpotifyClient,
    settings: Settings,
    show_progress: bool,
}

impl PlaylistPipeline {
    pub fn new(settings: Settings) -> Self {
        PlaylistPipeline {
            openai: OpenAiClient::new(&settings),
            spotify: SpotifyClient::new(&settings),
            settings,
            show_progress: false,
        }
    }

    pub fn from_clients(openai: OpenAiClient, spotify: SpotifyClient, settings: Settings) -> Self {
        PlaylistPipeline {
            openai,
            spotify,
            settings,
            show_progress: false,
        }
    }

    /// Renders a progress bar while suggested titles are looked up.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Creates a playlist of songs similar to `seed_titles`.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `account` - Spotify credentials, refresh token and account id
    /// * `name` - Playlist name, 1 to 100 characters
    /// * `description` - Playlist description, 1 to 280 characters
    /// * `seed_titles` - "Title Artist" strings the suggestions should match
    ///
    /// # Returns
    ///
    /// The id of the created playlist, exactly as Spotify returned it.
    /// Use [`crate::utils::playlist_url`] for a shareable link.
    ///
    /// # Errors
    ///
    /// Whatever the called clients return, unchanged, or
    /// [`SongptError::NoResolvableTracks`] when no suggestion matched a track.
    pub async fn from_songs(
        &self,
        api_key: &str,
        account: &SpotifyAccount,
        name: &str,
        description: &str,
        seed_titles: &[String],
    ) -> Res<String> {
        self.run(
            api_key,
            account,
            name,
            description,
            SuggestionBasis::Songs(seed_titles.to_vec()),
        )
        .await
    }

    /// Creates a playlist of songs fitting the keyword phrase. Identical to
    /// [`PlaylistPipeline::from_songs`] otherwise.
    pub async fn from_keywords(
        &self,
        api_key: &str,
        account: &SpotifyAccount,
        name: &str,
        description: &str,
        keywords: &str,
    ) -> Res<String> {
        self.run(
            api_key,
            account,
            name,
            description,
            SuggestionBasis::Keywords(keywords.to_string()),
        )
        .await
    }

    async fn run(
        &self,
        api_key: &str,
        account: &SpotifyAccount,
        name: &str,
        description: &str,
        basis: SuggestionBasis,
    ) -> Res<String> {
        validate_details(name, description)?;

        info!("Requesting Spotify access tokens");
        let app_token = self
            .spotify
            .get_app_access_token(&account.credentials)
            .await?;
        let account_token = self
            .spotify
            .get_account_access_token(&account.credentials, &account.refresh_token)
            .await?;

        info!(
            "Asking {} for {} song suggestions",
            self.settings.gpt_model, self.settings.suggestion_count
        );
        let suggestions = self
            .openai
            .generate_suggestions(
                api_key,
                &basis,
                self.settings.suggestion_count,
                &self.settings.gpt_model,
            )
            .await?;

        let track_ids: Vec<String> = self
            .resolve_titles(&suggestions, &app_token)
            .await
            .into_iter()
            .filter_map(|resolution| match resolution {
                Resolution::Resolved(track) => Some(track.id),
                Resolution::Skipped { .. } => None,
            })
            .collect();

        if track_ids.is_empty() {
            return Err(SongptError::NoResolvableTracks);
        }

        info!(
            "Found {} of {} suggested songs on Spotify",
            track_ids.len(),
            suggestions.len()
        );

        let playlist = NewPlaylist {
            name: name.to_string(),
            description: description.to_string(),
            track_ids,
            public: self.settings.public_playlist,
        };
        let playlist_id = self
            .spotify
            .create_playlist(&playlist, &account.account_id, account_token.as_str())
            .await?;

        success!(
            "Playlist \"{}\" created with {} tracks",
            playlist.name,
            playlist.track_ids.len()
        );
        Ok(playlist_id)
    }

    /// Looks up every title and returns one [`Resolution`] per title, in the
    /// order of `titles`.
    ///
    /// Lookups run concurrently in chunks of `Settings::concurrency`. A
    /// failing lookup never affects its siblings; it becomes a
    /// [`Resolution::Skipped`] and is reported with a warning.
    pub async fn resolve_titles(&self, titles: &[String], token: &AccessToken) -> Vec<Resolution> {
        let pb = self.progress_bar(titles.len() as u64);
        let mut resolutions = Vec::with_capacity(titles.len());

        for chunk in titles.chunks(self.settings.concurrency.max(1)) {
            // dropping the set aborts lookups still in flight
            let mut lookups = JoinSet::new();
            for (index, title) in chunk.iter().enumerate() {
                let spotify = self.spotify.clone();
                let title = title.clone();
                let token = token.value.clone();
                lookups.spawn(async move { (index, spotify.track_for_title(&title, &token).await) });
            }

            // results arrive in completion order; slots restore title order
            let mut slots: Vec<Option<Resolution>> = chunk.iter().map(|_| None).collect();
            while let Some(joined) = lookups.join_next().await {
                match joined {
                    Ok((index, Ok(track))) => slots[index] = Some(Resolution::Resolved(track)),
                    Ok((index, Err(e))) => {
                        slots[index] = Some(Resolution::Skipped {
                            title: chunk[index].clone(),
                            reason: e.to_string(),
                        })
                    }
                    Err(e) => pb.suspend(|| warning!("Task join error: {}", e)),
                }
            }

            for (slot, title) in slots.into_iter().zip(chunk) {
                let resolution = slot.unwrap_or_else(|| Resolution::Skipped {
                    title: title.clone(),
                    reason: "Lookup task did not complete.".to_string(),
                });

                if let Resolution::Skipped { title, reason } = &resolution {
                    pb.suspend(|| warning!("Skipping \"{}\": {}", title, reason));
                }

                resolutions.push(resolution);
                pb.inc(1);
            }
        }

        pb.finish_and_clear();
        resolutions
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} [{pos}/{len}]") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message("Looking up suggested songs on Spotify...");
        pb
    }
}

//! songpt Library
//!
//! Generates Spotify playlists from a handful of seed songs or a keyword
//! phrase. OpenAI suggests matching songs, Spotify search resolves them to
//! tracks, and a new playlist is created on the caller's account.
//!
//! # Modules
//!
//! - `config` - Endpoint settings and `.env` loading
//! - `error` - Failure taxonomy shared by all operations
//! - `openai` - Chat completion client producing song suggestions
//! - `pipeline` - The end-to-end playlist flows
//! - `spotify` - Spotify Web API client (tokens, search, playlists)
//! - `types` - Data structures and wire types
//! - `utils` - Small helpers (suggestion parsing, validation, URLs)
//!
//! # Example
//!
//! ```
//! use songpt::{config, types::Credentials, utils};
//!
//! #[tokio::main]
//! async fn main() -> songpt::Res<()> {
//!     config::load_env().await?;
//!     let id = songpt::generate_playlist_based_on_keywords(
//!         "sk-...",
//!         &Credentials::from_client("client-id", "client-secret"),
//!         "refresh-token",
//!         "account-id",
//!         "Witcher 3",
//!         "Songs for the Continent.",
//!         "The video game The Witcher 3",
//!     )
//!     .await?;
//!     println!("{}", utils::playlist_url(&id));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{ErrorKind, Res, SongptError};

use config::Settings;
use openai::OpenAiClient;
use pipeline::{PlaylistPipeline, SpotifyAccount};
use spotify::SpotifyClient;
use types::{AccessToken, Credentials, NewPlaylist, Track};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Asking {} for {} song suggestions", model, count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning with a yellow exclamation mark. Used for recoverable
/// conditions such as a suggested song that is not on Spotify.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

fn account(credentials: &Credentials, refresh_token: &str, account_id: &str) -> SpotifyAccount {
    SpotifyAccount {
        credentials: credentials.clone(),
        refresh_token: refresh_token.to_string(),
        account_id: account_id.to_string(),
    }
}

/// Creates a playlist of songs similar to `song_titles` and returns its id.
///
/// Settings come from [`Settings::from_env`].
pub async fn generate_playlist_based_on_songs(
    openai_api_key: &str,
    spotify_credentials: &Credentials,
    spotify_refresh_token: &str,
    spotify_account_id: &str,
    playlist_name: &str,
    playlist_description: &str,
    song_titles: &[String],
) -> Res<String> {
    PlaylistPipeline::new(Settings::from_env())
        .from_songs(
            openai_api_key,
            &account(spotify_credentials, spotify_refresh_token, spotify_account_id),
            playlist_name,
            playlist_description,
            song_titles,
        )
        .await
}

/// Creates a playlist of songs fitting `keywords` and returns its id.
pub async fn generate_playlist_based_on_keywords(
    openai_api_key: &str,
    spotify_credentials: &Credentials,
    spotify_refresh_token: &str,
    spotify_account_id: &str,
    playlist_name: &str,
    playlist_description: &str,
    keywords: &str,
) -> Res<String> {
    PlaylistPipeline::new(Settings::from_env())
        .from_keywords(
            openai_api_key,
            &account(spotify_credentials, spotify_refresh_token, spotify_account_id),
            playlist_name,
            playlist_description,
            keywords,
        )
        .await
}

/// Suggests songs similar to `song_titles`. `None` picks the configured
/// count and model.
pub async fn generate_suggestions_based_on_songs(
    openai_api_key: &str,
    song_titles: &[String],
    number_of_suggestions: Option<u32>,
    gpt_model: Option<&str>,
) -> Res<Vec<String>> {
    let settings = Settings::from_env();
    OpenAiClient::new(&settings)
        .suggestions_from_songs(
            openai_api_key,
            song_titles,
            number_of_suggestions.unwrap_or(settings.suggestion_count),
            gpt_model.unwrap_or(settings.gpt_model.as_str()),
        )
        .await
}

/// Suggests songs fitting `keywords`. `None` picks the configured count and
/// model.
pub async fn generate_suggestions_based_on_keywords(
    openai_api_key: &str,
    keywords: &str,
    number_of_suggestions: Option<u32>,
    gpt_model: Option<&str>,
) -> Res<Vec<String>> {
    let settings = Settings::from_env();
    OpenAiClient::new(&settings)
        .suggestions_from_keywords(
            openai_api_key,
            keywords,
            number_of_suggestions.unwrap_or(settings.suggestion_count),
            gpt_model.unwrap_or(settings.gpt_model.as_str()),
        )
        .await
}

pub async fn get_spotify_access_token(spotify_credentials: &Credentials) -> Res<AccessToken> {
    SpotifyClient::new(&Settings::from_env())
        .get_app_access_token(spotify_credentials)
        .await
}

pub async fn get_spotify_account_access_token(
    spotify_credentials: &Credentials,
    spotify_refresh_token: &str,
) -> Res<AccessToken> {
    SpotifyClient::new(&Settings::from_env())
        .get_account_access_token(spotify_credentials, spotify_refresh_token)
        .await
}

pub async fn search_spotify_tracks(search_text: &str, access_token: &str) -> Res<Vec<Track>> {
    SpotifyClient::new(&Settings::from_env())
        .search_tracks(search_text, access_token)
        .await
}

pub async fn get_spotify_track_for_title(title: &str, access_token: &str) -> Res<Track> {
    SpotifyClient::new(&Settings::from_env())
        .track_for_title(title, access_token)
        .await
}

/// Creates a playlist with the given tracks and returns its id.
pub async fn create_spotify_playlist(
    name: &str,
    description: &str,
    track_ids: &[String],
    public_playlist: bool,
    spotify_account_id: &str,
    spotify_account_access_token: &str,
) -> Res<String> {
    let playlist = NewPlaylist {
        name: name.to_string(),
        description: description.to_string(),
        track_ids: track_ids.to_vec(),
        public: public_playlist,
    };

    SpotifyClient::new(&Settings::from_env())
        .create_playlist(&playlist, spotify_account_id, spotify_account_access_token)
        .await
}

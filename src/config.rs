//! Configuration management for songpt.
//!
//! Endpoints and suggestion defaults come from environment variables, which
//! may be seeded from `.env` files. Secrets (API keys, Spotify credentials,
//! refresh tokens) are never read here; they are passed to the public
//! functions explicitly.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, then the working directory
//! 3. [`Settings::default`]

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::error::{Res, SongptError};

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GPT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SUGGESTION_COUNT: u32 = 10;
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Loads environment variables from `.env` files.
///
/// Looks for `songpt/.env` in the platform-specific local data directory
/// first, creating the directory if it does not exist yet, and then for a
/// `.env` in the current working directory. Variables that are already set
/// are never overridden, and a missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/songpt/.env`
/// - macOS: `~/Library/Application Support/songpt/.env`
/// - Windows: `%LOCALAPPDATA%/songpt/.env`
///
/// # Errors
///
/// Returns [`SongptError::Config`] if the data directory cannot be created
/// or an existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    load_env_from(&data_dir).await?;
    dotenv::dotenv().ok();

    Ok(())
}

/// Loads `<data_dir>/songpt/.env` if it exists, creating the `songpt`
/// directory first.
pub async fn load_env_from(data_dir: &Path) -> Res<()> {
    let dir = data_dir.join("songpt");
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| SongptError::Config(format!("Cannot create {}: {}", dir.display(), e)))?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| SongptError::Config(format!("Cannot load {}: {}", path.display(), e)))?;
    }

    Ok(())
}

/// Runtime settings for the completion client, the Spotify client and the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Chat completions endpoint.
    pub openai_api_url: String,
    /// Base URL of the Spotify Web API, without trailing slash.
    pub spotify_api_url: String,
    /// Spotify accounts token endpoint.
    pub spotify_token_url: String,
    pub gpt_model: String,
    pub suggestion_count: u32,
    pub public_playlist: bool,
    /// Maximum number of title lookups in flight at once.
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            gpt_model: DEFAULT_GPT_MODEL.to_string(),
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
            public_playlist: true,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Builds settings from the process environment.
    ///
    /// Call [`load_env`] beforehand to pick up `.env` files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Unset or empty keys keep their default. Numeric and boolean values
    /// that fail to parse fall back to the default as well.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Settings::default();

        Settings {
            openai_api_url: get("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            spotify_api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.spotify_api_url),
            spotify_token_url: get("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.spotify_token_url),
            gpt_model: get("SONGPT_GPT_MODEL").unwrap_or(defaults.gpt_model),
            suggestion_count: get("SONGPT_SUGGESTIONS")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|count| *count >= 1)
                .unwrap_or(defaults.suggestion_count),
            public_playlist: get("SONGPT_PUBLIC_PLAYLIST")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.public_playlist),
            concurrency: get("SONGPT_CONCURRENCY")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(defaults.concurrency),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

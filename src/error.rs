//! Failure taxonomy shared by every client and the playlist pipeline.
//!
//! Each upstream call maps its failures onto one of the [`SongptError`]
//! variants. Callers are expected to surface these to the end user as-is.

use thiserror::Error;

/// Errors produced by the completion client, the Spotify client and the
/// playlist pipeline.
#[derive(Debug, Error)]
pub enum SongptError {
    /// A caller-supplied argument violates a precondition (empty, oversized
    /// or missing).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream service could not be reached or answered with an
    /// unexpected response shape.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream service answered, but the content it returned breaks the
    /// expected contract (e.g. the suggestion list is not a JSON array).
    #[error("Malformed upstream payload: {0}")]
    UpstreamMalformedPayload(String),

    /// A specific lookup yielded no match.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Suggestions were generated but none of them matched a Spotify track.
    #[error("None of the suggested songs could be found on Spotify.")]
    NoResolvableTracks,

    /// Local configuration could not be loaded (data directory or `.env`).
    /// Never produced by the upstream operations.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fieldless discriminant of [`SongptError`], handy for matching in callers
/// and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    UpstreamUnavailable,
    UpstreamMalformedPayload,
    NotFound,
    NoResolvableTracks,
    Config,
}

impl SongptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SongptError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SongptError::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            SongptError::UpstreamMalformedPayload(_) => ErrorKind::UpstreamMalformedPayload,
            SongptError::NotFound(_) => ErrorKind::NotFound,
            SongptError::NoResolvableTracks => ErrorKind::NoResolvableTracks,
            SongptError::Config(_) => ErrorKind::Config,
        }
    }
}

// Transport errors and undecodable response bodies both count as the
// upstream being unavailable.
impl From<reqwest::Error> for SongptError {
    fn from(err: reqwest::Error) -> Self {
        SongptError::UpstreamUnavailable(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, SongptError>;

use serde_json::Value;

use crate::error::{Res, SongptError};

pub const PLAYLIST_NAME_MAX_CHARS: usize = 100;
pub const PLAYLIST_DESCRIPTION_MAX_CHARS: usize = 280;
pub const ATTRIBUTION_SUFFIX: &str = " Powered by songpt.";

/// Keeps the non-empty strings of a parsed suggestion array, in order.
///
/// Nulls, numbers, objects and empty strings are dropped silently.
pub fn filter_suggestions(raw: &[Value]) -> Vec<String> {
    raw.iter()
        .filter_map(Value::as_str)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the raw completion content into a suggestion list.
///
/// Anything that is not a JSON array is a
/// [`SongptError::UpstreamMalformedPayload`]; the model does not always honor
/// the format instruction.
pub fn parse_suggestions(content: &str) -> Res<Vec<String>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => Ok(filter_suggestions(&items)),
        Ok(_) => Err(SongptError::UpstreamMalformedPayload(
            "Completion content is not a JSON array. GPT may at times return invalid JSON."
                .to_string(),
        )),
        Err(e) => Err(SongptError::UpstreamMalformedPayload(format!(
            "Could not parse completion content: {}. GPT may at times return invalid JSON.",
            e
        ))),
    }
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}

pub fn with_attribution(description: &str) -> String {
    format!("{}{}", description, ATTRIBUTION_SUFFIX)
}

/// Fails with [`SongptError::InvalidArgument`] when `value` is empty.
pub fn require_non_empty(value: &str, what: &str) -> Res<()> {
    if value.is_empty() {
        return Err(SongptError::InvalidArgument(format!("No {} supplied.", what)));
    }
    Ok(())
}

/// Fails with [`SongptError::InvalidArgument`] when `value` is longer than
/// `max` characters.
pub fn require_max_chars(value: &str, max: usize, what: &str) -> Res<()> {
    if value.chars().count() > max {
        return Err(SongptError::InvalidArgument(format!(
            "{} must be {} characters or less.",
            what, max
        )));
    }
    Ok(())
}

//! # Completion Client
//!
//! Turns a seed song list or a keyword phrase into song suggestions by
//! sending exactly one chat completion request.
//!
//! ## Request
//!
//! `POST <openai_api_url>` with bearer auth and the body
//! `{"model": ..., "messages": [{"role": "user", "content": <prompt>}]}`.
//!
//! ## Response handling
//!
//! - Transport failure or undecodable body: [`SongptError::UpstreamUnavailable`]
//! - Missing or empty `choices[0].message.content`: [`SongptError::UpstreamUnavailable`]
//! - Content that is not a JSON array: [`SongptError::UpstreamMalformedPayload`]
//!
//! There is no retry.

pub mod prompt;

use reqwest::Client;
use serde_json::Value;

use crate::{
    config::Settings,
    error::{Res, SongptError},
    types::{ChatCompletionRequest, ChatMessage, SuggestionBasis},
    utils,
};

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self::with_http(Client::new(), settings)
    }

    pub fn with_http(http: Client, settings: &Settings) -> Self {
        OpenAiClient {
            http,
            api_url: settings.openai_api_url.clone(),
        }
    }

    /// Generates `count` song suggestions fitting the given seed titles.
    ///
    /// # Errors
    ///
    /// [`SongptError::InvalidArgument`] if `song_titles` is empty, plus
    /// everything [`OpenAiClient::generate_suggestions`] returns.
    pub async fn suggestions_from_songs(
        &self,
        api_key: &str,
        song_titles: &[String],
        count: u32,
        model: &str,
    ) -> Res<Vec<String>> {
        if song_titles.is_empty() {
            return Err(SongptError::InvalidArgument(
                "No song titles supplied.".to_string(),
            ));
        }

        let basis = SuggestionBasis::Songs(song_titles.to_vec());
        self.generate_suggestions(api_key, &basis, count, model)
            .await
    }

    /// Generates `count` song suggestions fitting the keyword phrase.
    pub async fn suggestions_from_keywords(
        &self,
        api_key: &str,
        keywords: &str,
        count: u32,
        model: &str,
    ) -> Res<Vec<String>> {
        utils::require_non_empty(keywords, "keywords")?;

        let basis = SuggestionBasis::Keywords(keywords.to_string());
        self.generate_suggestions(api_key, &basis, count, model)
            .await
    }

    /// Builds the prompt for `basis`, sends it and parses the reply.
    ///
    /// The returned list keeps the model's order and contains only non-empty
    /// strings. Suggestions are not deduplicated against the seed titles.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key, sent as bearer token
    /// * `basis` - Seed titles or keywords the suggestions should fit
    /// * `count` - Number of songs to ask for (at least 1)
    /// * `model` - Chat model name
    ///
    /// # Errors
    ///
    /// - [`SongptError::InvalidArgument`] for an empty key, basis or model, or
    ///   a `count` of zero. No request is sent in that case.
    /// - [`SongptError::UpstreamUnavailable`] for transport failures and
    ///   responses without message content.
    /// - [`SongptError::UpstreamMalformedPayload`] when the content is not a
    ///   JSON array. Expect this occasionally.
    pub async fn generate_suggestions(
        &self,
        api_key: &str,
        basis: &SuggestionBasis,
        count: u32,
        model: &str,
    ) -> Res<Vec<String>> {
        utils::require_non_empty(api_key, "OpenAI API key")?;
        match basis {
            SuggestionBasis::Songs(titles) if titles.is_empty() => {
                return Err(SongptError::InvalidArgument(
                    "No song titles supplied.".to_string(),
                ));
            }
            SuggestionBasis::Keywords(keywords) => utils::require_non_empty(keywords, "keywords")?,
            SuggestionBasis::Songs(_) => {}
        }
        if count < 1 {
            return Err(SongptError::InvalidArgument(
                "Invalid number of suggestions.".to_string(),
            ));
        }
        utils::require_non_empty(model, "GPT model")?;

        let content = self
            .complete(api_key, model, prompt::build_prompt(basis, count))
            .await?;

        utils::parse_suggestions(&content)
    }

    async fn complete(&self, api_key: &str, model: &str, prompt: String) -> Res<String> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                SongptError::UpstreamUnavailable(format!(
                    "Could not call OpenAI API. Make sure your API key is valid and that you have not exceeded your API usage limits. ({})",
                    e
                ))
            })?;

        let json: Value = response.json().await?;

        match json["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.is_empty() => Ok(content.to_string()),
            _ => Err(SongptError::UpstreamUnavailable(
                "Invalid response from OpenAI. Make sure your API key is valid and that you have not exceeded your API usage limits."
                    .to_string(),
            )),
        }
    }
}

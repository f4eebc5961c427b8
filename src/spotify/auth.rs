use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::{
    error::{Res, SongptError},
    spotify::SpotifyClient,
    types::{AccessToken, Credentials, TokenScope},
    utils,
};

const CALL_FAILED: &str = "Could not call Spotify API. Make sure your credentials are valid.";

impl SpotifyClient {
    /// Exchanges the client credentials for an application access token.
    ///
    /// Uses the `client_credentials` grant. The resulting token can search
    /// the catalog but cannot touch any account.
    ///
    /// # Errors
    ///
    /// - [`SongptError::InvalidArgument`] if `credentials` is empty
    /// - [`SongptError::UpstreamUnavailable`] on transport failure or when
    ///   the response carries no `access_token`
    pub async fn get_app_access_token(&self, credentials: &Credentials) -> Res<AccessToken> {
        utils::require_non_empty(credentials.as_str(), "Spotify credentials")?;

        self.request_token(
            credentials,
            &[("grant_type", "client_credentials")],
            TokenScope::Application,
        )
        .await
    }

    /// Exchanges a refresh token for an access token of the account it
    /// belongs to.
    ///
    /// # Errors
    ///
    /// Same as [`SpotifyClient::get_app_access_token`], plus
    /// [`SongptError::InvalidArgument`] if `refresh_token` is empty.
    pub async fn get_account_access_token(
        &self,
        credentials: &Credentials,
        refresh_token: &str,
    ) -> Res<AccessToken> {
        utils::require_non_empty(credentials.as_str(), "Spotify credentials")?;
        utils::require_non_empty(refresh_token, "Spotify refresh token")?;

        self.request_token(
            credentials,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
            TokenScope::Account,
        )
        .await
    }

    async fn request_token(
        &self,
        credentials: &Credentials,
        form: &[(&str, &str)],
        scope: TokenScope,
    ) -> Res<AccessToken> {
        let res = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials.as_str()))
            .form(form)
            .send()
            .await
            .map_err(|e| SongptError::UpstreamUnavailable(format!("{} ({})", CALL_FAILED, e)))?;

        let json: Value = res.json().await?;

        match json["access_token"].as_str() {
            Some(token) if !token.is_empty() => Ok(AccessToken {
                value: token.to_string(),
                scope,
            }),
            _ => Err(SongptError::UpstreamUnavailable(format!(
                "Spotify token endpoint returned no access token. {}",
                CALL_FAILED
            ))),
        }
    }
}

// src/auth/oauth.rs
//! Google OAuth exchange client
//!
//! Drives the authorization-code flow: build the authorize URL, exchange the
//! callback code for an access token, fetch the user's profile. This is not
//! a general-purpose OAuth client - exactly one provider, one fixed redirect
//! target per deployment.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::common::{ApiError, Config};

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Google OAuth not configured")]
    NotConfigured,

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("profile fetch failed: {0}")]
    ProfileFetch(String),

    #[error("profile missing subject id or email")]
    InvalidProfile,
}

impl From<OAuthError> for ApiError {
    fn from(e: OAuthError) -> Self {
        match e {
            OAuthError::NotConfigured => ApiError::ConfigurationMissing("GOOGLE_CLIENT_ID"),
            OAuthError::TokenExchange(detail) => ApiError::TokenExchangeFailed(detail),
            OAuthError::ProfileFetch(detail) => ApiError::ProfileFetchFailed(detail),
            OAuthError::InvalidProfile => {
                ApiError::InvalidProfile("missing sub or email".to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Raw userinfo payload; required fields are checked before use.
#[derive(Debug, Deserialize)]
struct RawProfile {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Provider profile with the fields identity reconciliation requires.
#[derive(Debug)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

pub struct GoogleOAuth {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuth {
    /// Build the client from startup configuration; fails when the provider
    /// credentials are unset.
    pub fn from_config(http: Client, config: &Config) -> Result<Self, OAuthError> {
        let client_id = config
            .google_client_id
            .clone()
            .ok_or(OAuthError::NotConfigured)?;
        let client_secret = config
            .google_client_secret
            .clone()
            .ok_or(OAuthError::NotConfigured)?;

        Ok(Self {
            client: http,
            client_id,
            client_secret,
            // Fixed per deployment. The provider validates it byte-for-byte
            // against the value sent during the exchange, and deriving it
            // from request headers would open the flow to host-header games.
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    /// Authorization URL the browser is redirected to, carrying the
    /// anti-forgery state.
    pub fn authorization_url(&self, state: &str) -> String {
        let scope = "openid email profile";
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            AUTHORIZE_ENDPOINT,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(scope),
            urlencoding::encode(state),
        )
    }

    /// Exchange the authorization code for an access token.
    ///
    /// Never retried: authorization codes are single-use, so a retry would
    /// fail at the provider anyway.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("exchanging authorization code for access token");

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable>".to_string());
            error!(status = %status, "token endpoint returned an error");
            return Err(OAuthError::TokenExchange(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::TokenExchange(e.to_string()))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OAuthError::TokenExchange("response missing access_token".to_string()))
    }

    /// Fetch the user's profile and require the fields identity
    /// reconciliation depends on.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<GoogleProfile, OAuthError> {
        let response = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::ProfileFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, "userinfo endpoint returned an error");
            return Err(OAuthError::ProfileFetch(format!("HTTP {}", status)));
        }

        let raw: RawProfile = response
            .json()
            .await
            .map_err(|e| OAuthError::ProfileFetch(e.to_string()))?;

        match (raw.sub, raw.email) {
            (Some(sub), Some(email)) if !sub.is_empty() && !email.is_empty() => Ok(GoogleProfile {
                sub,
                email,
                name: raw.name,
                picture: raw.picture,
            }),
            _ => Err(OAuthError::InvalidProfile),
        }
    }
}

use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, AuthorizationCode, ClientId,
    ClientSecret, CsrfToken, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use reqwest::Client as ReqwestClient;
use thiserror::Error;
use url::Url;

use crate::config::GoogleOAuthConfig;
use crate::models::google_auth::GoogleUserInfo;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Invalid OAuth endpoint: {0}")]
    Url(#[from] url::ParseError),
    #[error("Failed to exchange authorization code: {0}")]
    Exchange(String),
    #[error("Failed to request user info: {0}")]
    UserInfo(#[from] reqwest::Error),
    #[error("Google API returned error status: {0}")]
    Status(u16),
}

/// Google sign-in: authorization redirect, code exchange and profile lookup.
pub struct GoogleOAuth {
    client: BasicClient,
    http: ReqwestClient,
}

impl GoogleOAuth {
    pub fn new(config: &GoogleOAuthConfig) -> Result<Self, OAuthError> {
        let client = BasicClient::new(
            ClientId::new(config.client_id.clone()),
            Some(ClientSecret::new(config.client_secret.clone())),
            AuthUrl::new(AUTH_URL.to_string())?,
            Some(TokenUrl::new(TOKEN_URL.to_string())?),
        )
        .set_redirect_uri(RedirectUrl::new(config.redirect_uri.clone())?);

        Ok(Self {
            client,
            http: ReqwestClient::new(),
        })
    }

    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        self.client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }

    pub async fn exchange_code(&self, code: String) -> Result<String, OAuthError> {
        self.client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map(|token| token.access_token().secret().clone())
            .map_err(|e| OAuthError::Exchange(e.to_string()))
    }

    pub async fn user_info(&self, access_token: &str) -> Result<GoogleUserInfo, OAuthError> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OAuthError::Status(response.status().as_u16()));
        }
        Ok(response.json::<GoogleUserInfo>().await?)
    }
}

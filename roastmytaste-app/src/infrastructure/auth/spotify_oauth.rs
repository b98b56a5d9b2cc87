use crate::infrastructure::spotify::SpotifyTokens;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use roastmytaste_errors::AppError;
use serde::Deserialize;

const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_ME_URL: &str = "https://api.spotify.com/v1/me";

const SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "user-top-read",
    "user-read-recently-played",
];

/// Fallback token lifetime when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct SpotifyMe {
    display_name: Option<String>,
    id: String,
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    oauth2::EndpointSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointNotSet,
    oauth2::EndpointSet,
>;

/// Music-source linking. Unlike the Google flow this one keeps the tokens:
/// they go into the session cache and feed the Spotify adapter until the
/// orchestrator drops them after use.
#[derive(Clone)]
pub struct SpotifyOAuth {
    client: ConfiguredClient,
    redirect_uri: RedirectUrl,
    http_client: reqwest::Client,
}

impl SpotifyOAuth {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self, AppError> {
        let auth_url = AuthUrl::new(SPOTIFY_AUTH_URL.to_string())
            .map_err(|e| AppError::OAuth(e.to_string()))?;
        let token_url = TokenUrl::new(SPOTIFY_TOKEN_URL.to_string())
            .map_err(|e| AppError::OAuth(e.to_string()))?;
        let redirect = RedirectUrl::new(redirect_uri.to_string())
            .map_err(|e| AppError::OAuth(e.to_string()))?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url);

        Ok(Self {
            client,
            redirect_uri: redirect,
            http_client: reqwest::Client::new(),
        })
    }

    pub fn auth_url(&self) -> (String, CsrfToken) {
        let mut request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri));
        for scope in SCOPES {
            request = request.add_scope(Scope::new((*scope).to_string()));
        }
        let (auth_url, csrf_token) = request.url();
        (auth_url.to_string(), csrf_token)
    }

    pub async fn exchange_code(&self, code: &str) -> Result<SpotifyTokens, AppError> {
        let http_client = self.oauth_http_client()?;

        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_redirect_uri(std::borrow::Cow::Borrowed(&self.redirect_uri))
            .request_async(&http_client)
            .await
            .map_err(|e| AppError::OAuth(format!("Token exchange failed: {e:?}")))?;

        Ok(into_tokens(&token_result, None))
    }

    /// Refresh-token grant. Spotify may omit a new refresh token, in which
    /// case the old one is carried forward so the session stays renewable.
    pub async fn refresh(&self, refresh_token: &str) -> Result<SpotifyTokens, AppError> {
        let http_client = self.oauth_http_client()?;

        let token_result = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| AppError::OAuth(format!("Token refresh failed: {e:?}")))?;

        Ok(into_tokens(&token_result, Some(refresh_token)))
    }

    /// Display name for the identifier summary; falls back to the account id.
    pub async fn fetch_display_name(&self, access_token: &str) -> Option<String> {
        let response = self
            .http_client
            .get(SPOTIFY_ME_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        let me: SpotifyMe = response.json().await.ok()?;
        Some(me.display_name.unwrap_or(me.id))
    }

    fn oauth_http_client(&self) -> Result<oauth2::reqwest::Client, AppError> {
        oauth2::reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::OAuth(format!("Failed to build HTTP client: {e}")))
    }
}

fn into_tokens(
    token_result: &oauth2::basic::BasicTokenResponse,
    previous_refresh_token: Option<&str>,
) -> SpotifyTokens {
    let refresh_token = token_result
        .refresh_token()
        .map(|t| t.secret().clone())
        .or_else(|| previous_refresh_token.map(str::to_owned));
    let expires_in = token_result
        .expires_in()
        .map(|d| d.as_secs() as i64)
        .unwrap_or(DEFAULT_EXPIRES_IN_SECS);

    SpotifyTokens::new(
        token_result.access_token().secret().clone(),
        refresh_token,
        expires_in,
        chrono::Utc::now(),
    )
}

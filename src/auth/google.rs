// Google OAuth2 authorizer
// Hands out either a configured access token or one minted from a refresh token

use super::Authorizer;
use crate::config::CredentialSource;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::utils::logging;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, RefreshToken, TokenResponse,
    TokenUrl,
};
use reqwest::Client;
use tokio::sync::RwLock;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

enum Grant {
    Static(String),
    Refresh {
        oauth: BasicClient,
        refresh_token: RefreshToken,
        http: Client,
    },
    Unconfigured,
}

pub struct GoogleAuthorizer {
    grant: Grant,
    cached: RwLock<Option<CachedToken>>,
}

impl GoogleAuthorizer {
    pub fn from_credentials(source: &CredentialSource) -> AppResult<Self> {
        let grant = match source {
            CredentialSource::AccessToken(token) => Grant::Static(token.clone()),
            CredentialSource::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            } => {
                let oauth = BasicClient::new(
                    ClientId::new(client_id.clone()),
                    Some(ClientSecret::new(client_secret.clone())),
                    AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                        .map_err(|e| AppError::config(format!("Invalid auth URL: {}", e)))?,
                    Some(
                        TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
                            .map_err(|e| AppError::config(format!("Invalid token URL: {}", e)))?,
                    ),
                );
                Grant::Refresh {
                    oauth,
                    refresh_token: RefreshToken::new(refresh_token.clone()),
                    http: HttpConfig::oauth().build_client()?,
                }
            }
            CredentialSource::None => Grant::Unconfigured,
        };

        Ok(Self {
            grant,
            cached: RwLock::new(None),
        })
    }

    async fn refresh(
        &self,
        oauth: &BasicClient,
        refresh_token: &RefreshToken,
        http: &Client,
    ) -> AppResult<String> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.secret.clone());
            }
        }

        logging::log_auth_event("Exchanging refresh token for access token");
        let response = oauth
            .exchange_refresh_token(refresh_token)
            .request_async(|request| send_oauth_request(http, request))
            .await
            .map_err(|e| AppError::auth(format!("Token refresh failed: {}", e)))?;

        let secret = response.access_token().secret().clone();
        let lifetime = response
            .expires_in()
            .and_then(|d| Duration::from_std(d).ok())
            .unwrap_or_else(|| Duration::seconds(3600));

        *self.cached.write().await = Some(CachedToken {
            secret: secret.clone(),
            expires_at: Utc::now() + lifetime,
        });
        logging::log_auth_event("Access token refreshed");

        Ok(secret)
    }
}

#[async_trait]
impl Authorizer for GoogleAuthorizer {
    async fn authorize(&self) -> AppResult<String> {
        match &self.grant {
            Grant::Static(token) => Ok(token.clone()),
            Grant::Refresh {
                oauth,
                refresh_token,
                http,
            } => self.refresh(oauth, refresh_token, http).await,
            Grant::Unconfigured => Err(AppError::auth("No Google credentials configured")),
        }
    }
}

/// Runs the token request on our own reqwest client so the OAuth timeouts apply.
async fn send_oauth_request(http: &Client, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let mut builder = http
        .request(request.method, request.url.as_str())
        .body(request.body);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let response = builder.send().await?;
    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_is_returned_verbatim() {
        let authorizer =
            GoogleAuthorizer::from_credentials(&CredentialSource::AccessToken("ya29.abc".to_string()))
                .unwrap();
        assert_eq!(authorizer.authorize().await.unwrap(), "ya29.abc");
    }

    #[tokio::test]
    async fn test_unconfigured_is_auth_error() {
        let authorizer = GoogleAuthorizer::from_credentials(&CredentialSource::None).unwrap();
        assert!(matches!(authorizer.authorize().await, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_fresh_cached_token_skips_exchange() {
        let authorizer = GoogleAuthorizer::from_credentials(&CredentialSource::RefreshToken {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        })
        .unwrap();
        *authorizer.cached.write().await = Some(CachedToken {
            secret: "cached".to_string(),
            expires_at: Utc::now() + Duration::minutes(30),
        });

        assert_eq!(authorizer.authorize().await.unwrap(), "cached");
    }

    #[test]
    fn test_token_freshness_margin() {
        let now = Utc::now();
        let token = CachedToken {
            secret: String::new(),
            expires_at: now + Duration::seconds(30),
        };
        assert!(!token.is_fresh(now));

        let token = CachedToken {
            expires_at: now + Duration::seconds(600),
            ..token
        };
        assert!(token.is_fresh(now));
    }
}

//! Three-leg OAuth 1.0a Authorization Flow
//!
//! Leg one fetches a request token (`oauth_callback=oob`, the verifier is
//! relayed by a human instead of a callback server). Leg two is the
//! authorization URL the user must visit. Leg three exchanges the verifier
//! code for an access token. `check_token` validates a cached token against
//! the required permission level.

use crate::error::{AuthError, Result};
use crate::signer::OauthSigner;
use crate::types::{AccessToken, Consumer, Perms, RequestToken};
use bridge_traits::error::RemoteServiceError;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const REQUEST_TOKEN_URL: &str = "https://www.flickr.com/services/oauth/request_token";
const AUTHORIZE_URL: &str = "https://www.flickr.com/services/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://www.flickr.com/services/oauth/access_token";
const REST_URL: &str = "https://api.flickr.com/services/rest/";

/// API error code returned by `checkToken` for an expired or revoked token.
pub const ERR_INVALID_TOKEN: i64 = 98;

#[derive(Debug, Deserialize)]
struct RequestTokenResponse {
    oauth_token: String,
    oauth_token_secret: String,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    oauth_token: String,
    oauth_token_secret: String,
    user_nsid: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct RestStatus {
    stat: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(rename = "_content")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct CheckTokenOauth {
    perms: Content,
}

#[derive(Debug, Deserialize)]
struct CheckTokenResponse {
    oauth: CheckTokenOauth,
}

/// The authorization legs, driven over an injected [`HttpClient`].
pub struct AuthFlow {
    signer: OauthSigner,
    http: Arc<dyn HttpClient>,
}

impl AuthFlow {
    pub fn new(consumer: &Consumer, http: Arc<dyn HttpClient>) -> Self {
        Self {
            signer: OauthSigner::new(consumer),
            http,
        }
    }

    async fn signed_get(
        &self,
        url: &str,
        params: &[(String, String)],
        token: Option<(&str, &str)>,
    ) -> Result<HttpResponse> {
        let signed = self.signer.sign("GET", url, params, token);
        let query = serde_urlencoded::to_string(&signed)
            .map_err(|e| RemoteServiceError::Parse(format!("query encoding failed: {}", e)))?;

        let response = self
            .http
            .execute(HttpRequest::new(HttpMethod::Get, format!("{}?{}", url, query)))
            .await?;

        if !response.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AuthError::Service(RemoteServiceError::HttpStatus {
                status: response.status,
                body,
            }));
        }
        Ok(response)
    }

    /// Leg one: obtain a request token for an out-of-band authorization.
    pub async fn request_token(&self) -> Result<RequestToken> {
        debug!("Requesting OAuth request token");

        let params = vec![("oauth_callback".to_string(), "oob".to_string())];
        let response = self.signed_get(REQUEST_TOKEN_URL, &params, None).await?;

        let body = response.text().map_err(AuthError::Service)?;
        let parsed: RequestTokenResponse = serde_urlencoded::from_str(&body).map_err(|e| {
            RemoteServiceError::Parse(format!("bad request token response: {}", e))
        })?;

        Ok(RequestToken {
            token: parsed.oauth_token,
            secret: parsed.oauth_token_secret,
        })
    }

    /// Leg two: the URL a human must visit to grant `perms` to this consumer.
    pub fn authorize_url(&self, request: &RequestToken, perms: Perms) -> String {
        let mut url = Url::parse(AUTHORIZE_URL).expect("static authorize URL parses");
        url.query_pairs_mut()
            .append_pair("oauth_token", &request.token)
            .append_pair("perms", &perms.to_string());
        url.to_string()
    }

    /// Leg three: trade the request token plus the user-provided verifier
    /// code for an access token. An invalid verifier surfaces as a
    /// [`RemoteServiceError`] from the token endpoint.
    pub async fn exchange_verifier(
        &self,
        request: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken> {
        debug!("Exchanging verifier for access token");

        let params = vec![("oauth_verifier".to_string(), verifier.to_string())];
        let response = self
            .signed_get(
                ACCESS_TOKEN_URL,
                &params,
                Some((&request.token, &request.secret)),
            )
            .await?;

        let body = response.text().map_err(AuthError::Service)?;
        let parsed: AccessTokenResponse = serde_urlencoded::from_str(&body).map_err(|e| {
            RemoteServiceError::Parse(format!("bad access token response: {}", e))
        })?;

        Ok(AccessToken {
            token: parsed.oauth_token,
            secret: parsed.oauth_token_secret,
            user_nsid: parsed.user_nsid,
            username: parsed.username,
        })
    }

    /// Validate a token against the required permission level via
    /// `flickr.auth.oauth.checkToken`.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthorizationRequired`] when the token is valid but the
    /// granted level is below `required`; an API error with code
    /// [`ERR_INVALID_TOKEN`] when the token itself is rejected.
    pub async fn check_token(&self, access: &AccessToken, required: Perms) -> Result<()> {
        let params = vec![
            ("method".to_string(), "flickr.auth.oauth.checkToken".to_string()),
            ("format".to_string(), "json".to_string()),
            ("nojsoncallback".to_string(), "1".to_string()),
        ];
        let response = self
            .signed_get(REST_URL, &params, Some((&access.token, &access.secret)))
            .await?;

        let status: RestStatus = response.json().map_err(AuthError::Service)?;
        if status.stat != "ok" {
            return Err(AuthError::Service(RemoteServiceError::Api {
                code: status.code.unwrap_or(-1),
                message: status.message.unwrap_or_else(|| "unknown error".to_string()),
            }));
        }

        let parsed: CheckTokenResponse = response.json().map_err(AuthError::Service)?;
        let granted: Perms = parsed
            .oauth
            .perms
            .content
            .parse()
            .map_err(AuthError::InvalidPerms)?;

        if granted >= required {
            debug!(%granted, "Cached token accepted");
            Ok(())
        } else {
            Err(AuthError::AuthorizationRequired { required })
        }
    }
}

//! Authorization Manager
//!
//! Decides between reusing the cached token and running the interactive
//! flow. A missing cache, a token the service rejects outright (code 98) or
//! a token below the required permission level all fall through to the
//! interactive path; any other failure aborts.

use crate::error::{AuthError, Result};
use crate::flow::{AuthFlow, ERR_INVALID_TOKEN};
use crate::token_store::FileTokenStore;
use crate::types::{AccessToken, Perms};
use bridge_traits::console::Prompt;
use bridge_traits::error::RemoteServiceError;
use std::sync::Arc;
use tracing::info;

pub struct AuthManager {
    flow: AuthFlow,
    store: FileTokenStore,
    prompt: Arc<dyn Prompt>,
}

impl AuthManager {
    pub fn new(flow: AuthFlow, store: FileTokenStore, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            flow,
            store,
            prompt,
        }
    }

    /// Return a token valid for `required`, running the interactive
    /// authorization flow if the cached one is missing, rejected or too weak.
    pub async fn ensure_authorized(&self, required: Perms) -> Result<AccessToken> {
        if let Some(token) = self.store.load()? {
            match self.flow.check_token(&token, required).await {
                Ok(()) => return Ok(token),
                Err(AuthError::AuthorizationRequired { .. }) => {
                    info!(%required, "Cached token lacks required permission, re-authorizing");
                }
                Err(AuthError::Service(RemoteServiceError::Api {
                    code: ERR_INVALID_TOKEN,
                    ..
                })) => {
                    info!("Cached token no longer valid, re-authorizing");
                }
                Err(e) => return Err(e),
            }
        }

        self.authorize_interactively(required).await
    }

    async fn authorize_interactively(&self, required: Perms) -> Result<AccessToken> {
        let request = self.flow.request_token().await?;
        let url = self.flow.authorize_url(&request, required);

        let verifier = self
            .prompt
            .prompt_line(&format!(
                "Visit this URL to authorize flickrsync:\n\n  {}\n\nVerifier code: ",
                url
            ))
            .await
            .map_err(AuthError::Prompt)?;

        let access = self.flow.exchange_verifier(&request, verifier.trim()).await?;
        self.store.save(&access)?;
        info!(username = %access.username, "Authorization complete, token cached");
        Ok(access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Consumer;
    use bridge_traits::error::Result as ServiceResult;
    use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
    use bytes::Bytes;
    use mockall::mock;

    mock! {
        Http {}

        #[async_trait::async_trait]
        impl HttpClient for Http {
            async fn execute(&self, request: HttpRequest) -> ServiceResult<HttpResponse>;
        }
    }

    struct FixedPrompt(&'static str);

    #[async_trait::async_trait]
    impl Prompt for FixedPrompt {
        async fn prompt_line(&self, _message: &str) -> std::io::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn cached_token() -> AccessToken {
        AccessToken {
            token: "cached".to_string(),
            secret: "cached-secret".to_string(),
            user_nsid: "1@N00".to_string(),
            username: "u".to_string(),
        }
    }

    fn manager(http: MockHttp, store: FileTokenStore, verifier: &'static str) -> AuthManager {
        AuthManager::new(
            AuthFlow::new(&Consumer::new("k", "s"), Arc::new(http)),
            store,
            Arc::new(FixedPrompt(verifier)),
        )
    }

    #[tokio::test]
    async fn test_valid_cached_token_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        store.save(&cached_token()).unwrap();

        let mut http = MockHttp::new();
        // Only the checkToken call happens.
        http.expect_execute().times(1).returning(|req| {
            assert!(req.url.contains("flickr.auth.oauth.checkToken"));
            Ok(HttpResponse {
                status: 200,
                body: Bytes::from(
                    r#"{"oauth":{"perms":{"_content":"write"}},"stat":"ok"}"#,
                ),
            })
        });

        let token = manager(http, store, "unused")
            .ensure_authorized(Perms::Write)
            .await
            .unwrap();
        assert_eq!(token.token, "cached");
    }

    #[tokio::test]
    async fn test_missing_cache_runs_interactive_flow_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));

        let mut http = MockHttp::new();
        http.expect_execute().times(2).returning(|req| {
            if req.url.starts_with("https://www.flickr.com/services/oauth/request_token") {
                Ok(HttpResponse {
                    status: 200,
                    body: Bytes::from("oauth_token=rt&oauth_token_secret=rts"),
                })
            } else {
                assert!(req
                    .url
                    .starts_with("https://www.flickr.com/services/oauth/access_token"));
                assert!(req.url.contains("oauth_verifier=271-828-182"));
                Ok(HttpResponse {
                    status: 200,
                    body: Bytes::from(
                        "oauth_token=at&oauth_token_secret=ats&user_nsid=9%40N00&username=charl",
                    ),
                })
            }
        });

        let store_clone = store.clone();
        let token = manager(http, store, "271-828-182")
            .ensure_authorized(Perms::Write)
            .await
            .unwrap();

        assert_eq!(token.token, "at");
        // Token landed in the cache for the next run.
        assert_eq!(store_clone.load().unwrap().unwrap().token, "at");
    }

    #[tokio::test]
    async fn test_rejected_cached_token_triggers_reauthorization() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        store.save(&cached_token()).unwrap();

        let mut http = MockHttp::new();
        http.expect_execute().times(3).returning(|req| {
            if req.url.contains("flickr.auth.oauth.checkToken") {
                Ok(HttpResponse {
                    status: 200,
                    body: Bytes::from(
                        r#"{"stat":"fail","code":98,"message":"Invalid auth token"}"#,
                    ),
                })
            } else if req.url.starts_with("https://www.flickr.com/services/oauth/request_token") {
                Ok(HttpResponse {
                    status: 200,
                    body: Bytes::from("oauth_token=rt&oauth_token_secret=rts"),
                })
            } else {
                Ok(HttpResponse {
                    status: 200,
                    body: Bytes::from(
                        "oauth_token=fresh&oauth_token_secret=ats&user_nsid=9%40N00&username=charl",
                    ),
                })
            }
        });

        let token = manager(http, store, "111-222-333")
            .ensure_authorized(Perms::Write)
            .await
            .unwrap();
        assert_eq!(token.token, "fresh");
    }

    #[tokio::test]
    async fn test_transport_failure_during_check_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        store.save(&cached_token()).unwrap();

        let mut http = MockHttp::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Err(RemoteServiceError::Transport("connection refused".to_string())));

        let err = manager(http, store, "unused")
            .ensure_authorized(Perms::Write)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Service(RemoteServiceError::Transport(_))
        ));
    }
}

//! OAuth 1.0a Request Signing
//!
//! Implements the RFC 5849 HMAC-SHA1 signature: percent-encode and sort all
//! parameters, concatenate method, URL and parameter string into the
//! signature base string, and MAC it with `consumer_secret&token_secret`.
//!
//! The signer is shared by the authorization flow (signing with the request
//! token or no token at all) and the API connector (signing with the access
//! token).

use crate::types::Consumer;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode per RFC 3986 unreserved characters, as RFC 5849 requires.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the signature base string from method, endpoint URL and the full
/// (unsigned) parameter set.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// HMAC-SHA1 parameter signer bound to one consumer key/secret.
#[derive(Debug, Clone)]
pub struct OauthSigner {
    consumer_key: String,
    consumer_secret: String,
}

impl OauthSigner {
    pub fn new(consumer: &Consumer) -> Self {
        Self {
            consumer_key: consumer.key.clone(),
            consumer_secret: consumer.secret.clone(),
        }
    }

    /// Sign `params` for a request to `url`, returning the complete parameter
    /// list: the caller's parameters, the `oauth_*` protocol parameters and
    /// the computed `oauth_signature`.
    ///
    /// `token` is `(token, token_secret)` — the request token during the
    /// authorization flow, the access token afterwards, or `None` for the
    /// very first leg.
    pub fn sign(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        token: Option<(&str, &str)>,
    ) -> Vec<(String, String)> {
        let mut nonce_bytes = [0u8; 16];
        rand::thread_rng().fill(&mut nonce_bytes);
        let nonce = URL_SAFE_NO_PAD.encode(nonce_bytes);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.sign_at(method, url, params, token, &nonce, timestamp)
    }

    /// Deterministic variant of [`sign`](Self::sign) with caller-supplied
    /// nonce and timestamp.
    fn sign_at(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        token: Option<(&str, &str)>,
        nonce: &str,
        timestamp: u64,
    ) -> Vec<(String, String)> {
        let mut all: Vec<(String, String)> = params.to_vec();
        all.push(("oauth_consumer_key".to_string(), self.consumer_key.clone()));
        all.push(("oauth_nonce".to_string(), nonce.to_string()));
        all.push((
            "oauth_signature_method".to_string(),
            "HMAC-SHA1".to_string(),
        ));
        all.push(("oauth_timestamp".to_string(), timestamp.to_string()));
        all.push(("oauth_version".to_string(), "1.0".to_string()));
        if let Some((token, _)) = token {
            all.push(("oauth_token".to_string(), token.to_string()));
        }

        let base = signature_base_string(method, url, &all);
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            percent_encode(token.map(|(_, secret)| secret).unwrap_or(""))
        );

        let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
            .expect("HMAC-SHA1 accepts keys of any length");
        mac.update(base.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        all.push(("oauth_signature".to_string(), signature));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn signer() -> OauthSigner {
        OauthSigner::new(&Consumer::new("key", "consumer-secret"))
    }

    #[test]
    fn test_percent_encoding_unreserved() {
        assert_eq!(percent_encode("abc-._~XYZ019"), "abc-._~XYZ019");
        assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(percent_encode("https://api.flickr.com/services/rest/"),
            "https%3A%2F%2Fapi.flickr.com%2Fservices%2Frest%2F");
    }

    #[test]
    fn test_base_string_sorts_encoded_params() {
        let base = signature_base_string(
            "get",
            "https://example.com/request",
            &pairs(&[("b", "2"), ("a", "1"), ("a", "0")]),
        );

        assert_eq!(
            base,
            "GET&https%3A%2F%2Fexample.com%2Frequest&a%3D0%26a%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_base_string_double_encodes_values() {
        let base = signature_base_string(
            "GET",
            "https://example.com/",
            &pairs(&[("title", "a b")]),
        );

        // "a b" -> "a%20b" inside the param string, then the whole param
        // string is encoded once more.
        assert_eq!(base, "GET&https%3A%2F%2Fexample.com%2F&title%3Da%2520b");
    }

    #[test]
    fn test_sign_at_appends_protocol_params_and_signature() {
        let signed = signer().sign_at(
            "GET",
            "https://example.com/",
            &pairs(&[("method", "flickr.test.echo")]),
            Some(("tok", "tok-secret")),
            "fixed-nonce",
            1_700_000_000,
        );

        let get = |name: &str| {
            signed
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };

        assert_eq!(get("oauth_consumer_key").as_deref(), Some("key"));
        assert_eq!(get("oauth_nonce").as_deref(), Some("fixed-nonce"));
        assert_eq!(get("oauth_signature_method").as_deref(), Some("HMAC-SHA1"));
        assert_eq!(get("oauth_timestamp").as_deref(), Some("1700000000"));
        assert_eq!(get("oauth_token").as_deref(), Some("tok"));
        assert!(!get("oauth_signature").unwrap().is_empty());
    }

    #[test]
    fn test_signature_is_deterministic_for_fixed_inputs() {
        let params = pairs(&[("method", "flickr.test.echo")]);
        let a = signer().sign_at("GET", "https://e.com/", &params, None, "n", 1);
        let b = signer().sign_at("GET", "https://e.com/", &params, None, "n", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_token_secret_changes_signature() {
        let params = pairs(&[("x", "1")]);
        let with_a = signer().sign_at("GET", "https://e.com/", &params, Some(("t", "a")), "n", 1);
        let with_b = signer().sign_at("GET", "https://e.com/", &params, Some(("t", "b")), "n", 1);

        let sig = |signed: &[(String, String)]| {
            signed
                .iter()
                .find(|(k, _)| k == "oauth_signature")
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_ne!(sig(&with_a), sig(&with_b));
    }

    #[test]
    fn test_sign_generates_fresh_nonces() {
        let params = pairs(&[("x", "1")]);
        let a = signer().sign("GET", "https://e.com/", &params, None);
        let b = signer().sign("GET", "https://e.com/", &params, None);

        let nonce = |signed: &[(String, String)]| {
            signed
                .iter()
                .find(|(k, _)| k == "oauth_nonce")
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_ne!(nonce(&a), nonce(&b));
    }
}

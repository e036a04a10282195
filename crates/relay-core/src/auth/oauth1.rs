//! ============================================================================
//! Twitter OAuth 1.0a Request Signing
//! ============================================================================
//! One-legged OAuth 1.0a for user-context API calls:
//! - Canonical signature base string
//! - HMAC-SHA1 signature over the base string
//! - Authorization header assembly with a fresh nonce/timestamp
//! ============================================================================

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;
use tracing::debug;

use crate::credentials::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// Everything outside the RFC 3986 unreserved set: ALPHA / DIGIT / "-" / "." / "_" / "~"
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encode a string the way OAuth 1.0a requires (upper-case hex, UTF-8 bytes)
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Build the signature base string: `METHOD&enc(url)&enc(k1=v1&k2=v2...)`.
///
/// Pairs are sorted by encoded key in byte order after collection, so the
/// iteration order of `params` has no effect on the output.
pub fn build_base_string<I, K, V>(method: &str, url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method,
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// Sign a base string with HMAC-SHA1 and return the padded base64 digest
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let signing_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// Build the `Authorization` header value for one outbound request.
///
/// A new nonce and timestamp are drawn on every call, so two calls with the
/// same inputs never produce the same header.
pub fn build_auth_header(method: &str, url: &str, credentials: &Credentials) -> String {
    let nonce = generate_nonce();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    debug!("Signing {} {}", method, url);
    build_auth_header_with(method, url, credentials, &nonce, &timestamp)
}

/// Deterministic header assembly with a caller-supplied nonce and timestamp
pub fn build_auth_header_with(
    method: &str,
    url: &str,
    credentials: &Credentials,
    nonce: &str,
    timestamp: &str,
) -> String {
    let mut params: BTreeMap<&str, String> = BTreeMap::new();
    params.insert("oauth_consumer_key", credentials.consumer_key().to_string());
    params.insert("oauth_nonce", nonce.to_string());
    params.insert("oauth_signature_method", SIGNATURE_METHOD.to_string());
    params.insert("oauth_timestamp", timestamp.to_string());
    params.insert("oauth_token", credentials.access_token().to_string());
    params.insert("oauth_version", OAUTH_VERSION.to_string());

    // Signature input must not contain the signature itself
    let base_string = build_base_string(method, url, &params);
    let signature = sign(
        &base_string,
        credentials.consumer_secret(),
        credentials.access_token_secret(),
    );
    params.insert("oauth_signature", signature);

    let fields = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", fields)
}

/// 32 bytes from the thread-local CSPRNG, hex encoded
fn generate_nonce() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

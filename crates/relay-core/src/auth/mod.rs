//! ============================================================================
//! Auth Module - Request Signing
//! ============================================================================
//! - Twitter OAuth 1.0a (HMAC-SHA1) Authorization headers
//! ============================================================================

mod oauth1;

pub use oauth1::{
    build_auth_header, build_auth_header_with, build_base_string, percent_encode, sign,
    OAUTH_VERSION, SIGNATURE_METHOD,
};

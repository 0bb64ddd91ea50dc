//! Extraction of the site's signing material from HTTP requests.
//!
//! Write requests carry `Authorization: Bearer Cr <signature>:<timestamp>`.
//! Read requests carry `?sign=<signature>:<timestamp>`, which is decoded once
//! more after query parsing for compatibility with existing signers.

use std::borrow::Cow;

use axum::http::{HeaderMap, Uri};
use percent_encoding::percent_decode_str;

use crate::domain::signing::CanonicalRequest;

use super::handlers::OrderApiError;

const BEARER_PREFIX: &str = "Bearer Cr ";

/// Header carrying the calling site's public URL.
pub const SITE_URL_HEADER: &str = "X-Cr-Site-Url";

/// Claimed signature and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedClaim {
    pub signature: String,
    pub timestamp: String,
}

impl SignedClaim {
    fn split(raw: &str, malformed: &'static str) -> Result<Self, OrderApiError> {
        let (signature, timestamp) = raw
            .split_once(':')
            .ok_or_else(|| OrderApiError::rejected(malformed))?;
        Ok(Self {
            signature: signature.to_string(),
            timestamp: timestamp.to_string(),
        })
    }

    /// Parses the `Authorization` header of a write request.
    pub fn from_authorization(headers: &HeaderMap) -> Result<Self, OrderApiError> {
        let header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let credentials = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| OrderApiError::rejected("invalid Authorization header format"))?;
        Self::split(credentials, "invalid signature format")
    }

    /// Parses the already query-decoded `sign` parameter of a read request.
    pub fn from_sign_param(sign: Option<&str>) -> Result<Self, OrderApiError> {
        let sign = sign
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OrderApiError::rejected("missing signature"))?;
        Self::split(&legacy_unescape(sign), "invalid signature format in URL")
    }
}

/// Second decoding pass: `+` becomes a space, then `%XX` escapes are decoded.
pub fn legacy_unescape(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Checks the site header against the configured site URL.
pub fn check_site(headers: &HeaderMap, site_url: &str) -> Result<(), OrderApiError> {
    let claimed = headers
        .get(SITE_URL_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if claimed != site_url {
        tracing::warn!(claimed, expected = site_url, "Site header mismatch");
        return Err(OrderApiError::rejected(
            "site verification failed, check the configured site URL",
        ));
    }
    Ok(())
}

/// Decoded request path, as the signer sees it.
pub fn signing_path(uri: &Uri) -> Cow<'_, str> {
    percent_decode_str(uri.path()).decode_utf8_lossy()
}

/// Canonical form of a body-bearing request, including every header.
pub fn write_request<'a>(path: &'a str, headers: &HeaderMap, body: &'a [u8]) -> CanonicalRequest<'a> {
    let mut request = CanonicalRequest::write(path, body);
    for (name, value) in headers {
        request.push_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn authorization_is_split_on_first_colon() {
        let map = headers(&[("authorization", "Bearer Cr abc=:1700000000:extra")]);

        let claim = SignedClaim::from_authorization(&map).unwrap();

        assert_eq!(claim.signature, "abc=");
        assert_eq!(claim.timestamp, "1700000000:extra");
    }

    #[test]
    fn authorization_without_prefix_is_rejected() {
        let map = headers(&[("authorization", "Bearer abc:1")]);

        let err = SignedClaim::from_authorization(&map).unwrap_err();

        assert_eq!(err.message(), "invalid Authorization header format");
        assert_eq!(err.code(), 412);
    }

    #[test]
    fn missing_authorization_is_rejected() {
        let err = SignedClaim::from_authorization(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.message(), "invalid Authorization header format");
    }

    #[test]
    fn authorization_without_colon_is_rejected() {
        let map = headers(&[("authorization", "Bearer Cr abc")]);

        let err = SignedClaim::from_authorization(&map).unwrap_err();

        assert_eq!(err.message(), "invalid signature format");
    }

    #[test]
    fn sign_param_is_decoded_again() {
        let claim = SignedClaim::from_sign_param(Some("abc%3D:1700000000")).unwrap();
        assert_eq!(claim.signature, "abc=");
        assert_eq!(claim.timestamp, "1700000000");

        let claim = SignedClaim::from_sign_param(Some("abc%3A1700000000")).unwrap();
        assert_eq!(claim.signature, "abc");
    }

    #[test]
    fn sign_param_errors() {
        assert_eq!(
            SignedClaim::from_sign_param(None).unwrap_err().message(),
            "missing signature"
        );
        assert_eq!(
            SignedClaim::from_sign_param(Some("")).unwrap_err().message(),
            "missing signature"
        );
        assert_eq!(
            SignedClaim::from_sign_param(Some("abc")).unwrap_err().message(),
            "invalid signature format in URL"
        );
    }

    #[test]
    fn legacy_unescape_turns_plus_into_space() {
        assert_eq!(legacy_unescape("a+b%2Bc"), "a b+c");
        assert_eq!(legacy_unescape("100%"), "100%");
    }

    #[test]
    fn site_header_must_match_exactly() {
        let map = headers(&[("x-cr-site-url", "https://cloud.example.com")]);
        assert!(check_site(&map, "https://cloud.example.com").is_ok());

        let map = headers(&[("x-cr-site-url", "https://cloud.example.com/")]);
        assert_eq!(check_site(&map, "https://cloud.example.com").unwrap_err().code(), 412);

        assert!(check_site(&HeaderMap::new(), "https://cloud.example.com").is_err());
    }

    #[test]
    fn signing_path_is_percent_decoded() {
        let uri: Uri = "/order%20list?x=1".parse().unwrap();
        assert_eq!(signing_path(&uri), "/order list");
    }

    #[test]
    fn write_request_keeps_site_headers() {
        let map = headers(&[
            ("x-cr-site-url", "https://cloud.example.com"),
            ("content-type", "application/json"),
        ]);

        let request = write_request("/order", &map, b"{}");

        assert_eq!(request.signed_headers(), "X-Cr-Site-Url=https://cloud.example.com");
    }
}

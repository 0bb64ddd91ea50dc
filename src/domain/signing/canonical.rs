//! Canonical signing content for site requests.
//!
//! Write-style requests (with a body) sign a compact JSON object
//!
//! ```text
//! {"Path":"/order","Header":"X-Cr-A=1&X-Cr-B=2","Body":"{...}"}
//! ```
//!
//! rendered the way the site's JSON encoder renders it: compact separators and
//! HTML-sensitive characters (`&`, `<`, `>`, U+2028, U+2029) written as
//! `\uXXXX` escapes. Read-style requests sign the path alone.

use serde_json::Value;

/// Header name prefix marking site metadata covered by the signature.
pub const SIGNED_HEADER_PREFIX: &str = "X-Cr-";

/// Characters the site's encoder escapes inside JSON strings.
const HTML_SENSITIVE: [char; 5] = ['&', '<', '>', '\u{2028}', '\u{2029}'];

/// Whether the request carries a body that is covered by the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStyle {
    /// Body-bearing request; path, metadata headers and body are signed.
    Write,
    /// Body-less request; only the path is signed.
    Read,
}

/// The parts of an inbound request that feed the signature.
///
/// Borrowing the body keeps it available to the handler after verification.
#[derive(Debug, Clone)]
pub struct CanonicalRequest<'a> {
    style: RequestStyle,
    path: &'a str,
    headers: Vec<(String, String)>,
    body: &'a [u8],
}

impl<'a> CanonicalRequest<'a> {
    /// A body-less request.
    pub fn read(path: &'a str) -> Self {
        Self {
            style: RequestStyle::Read,
            path,
            headers: Vec::new(),
            body: &[],
        }
    }

    /// A body-bearing request.
    pub fn write(path: &'a str, body: &'a [u8]) -> Self {
        Self {
            style: RequestStyle::Write,
            path,
            headers: Vec::new(),
            body,
        }
    }

    /// Adds a header. Only the first value seen for a name is kept.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.push_header(name, value);
        self
    }

    /// Adds a header in place. Only the first value seen for a name is kept.
    pub fn push_header(&mut self, name: &str, value: impl Into<String>) {
        let name = canonical_header_key(name);
        if self.headers.iter().all(|(existing, _)| existing != &name) {
            self.headers.push((name, value.into()));
        }
    }

    pub fn style(&self) -> RequestStyle {
        self.style
    }

    /// Path as signed; an empty path is signed as `/`.
    pub fn canonical_path(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            self.path
        }
    }

    /// Metadata headers as sorted `name=value` tokens joined with `&`.
    pub fn signed_headers(&self) -> String {
        let mut tokens: Vec<String> = self
            .headers
            .iter()
            .filter(|(name, _)| name.starts_with(SIGNED_HEADER_PREFIX))
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        tokens.sort();
        tokens.join("&")
    }

    /// The string the HMAC covers, before the timestamp is appended.
    pub fn signing_content(&self) -> String {
        match self.style {
            RequestStyle::Read => self.canonical_path().to_string(),
            RequestStyle::Write => {
                let body = String::from_utf8_lossy(self.body);
                let json = format!(
                    r#"{{"Path":{},"Header":{},"Body":{}}}"#,
                    Value::from(self.canonical_path()),
                    Value::from(self.signed_headers()),
                    Value::from(body.as_ref()),
                );
                escape_html_sensitive(&json)
            }
        }
    }
}

/// Rewrites HTML-sensitive characters as `\uXXXX` escapes.
///
/// Only valid on serialized JSON: the affected characters can appear only
/// inside string literals, where the escape is equivalent.
pub fn escape_html_sensitive(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if HTML_SENSITIVE.contains(&c) {
            out.push_str(&format!("\\u{:04x}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Canonical MIME form of a header name: `x-cr-site-url` becomes `X-Cr-Site-Url`.
///
/// Names containing characters outside the token set are returned unchanged.
pub fn canonical_header_key(name: &str) -> String {
    let valid = name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if !valid {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keys_are_canonicalized() {
        assert_eq!(canonical_header_key("x-cr-site-url"), "X-Cr-Site-Url");
        assert_eq!(canonical_header_key("CONTENT-TYPE"), "Content-Type");
        assert_eq!(canonical_header_key("x-cr-"), "X-Cr-");
        assert_eq!(canonical_header_key("bad header"), "bad header");
    }

    #[test]
    fn read_request_signs_path_only() {
        let request = CanonicalRequest::read("/order").with_header("x-cr-site-url", "https://a");
        assert_eq!(request.signing_content(), "/order");
    }

    #[test]
    fn empty_path_signs_as_root() {
        assert_eq!(CanonicalRequest::read("").signing_content(), "/");
        let write = CanonicalRequest::write("", b"{}");
        assert!(write.signing_content().starts_with(r#"{"Path":"/","#));
    }

    #[test]
    fn signed_headers_are_filtered_and_sorted() {
        let request = CanonicalRequest::write("/order", b"")
            .with_header("x-cr-version", "4.0.0")
            .with_header("content-type", "application/json")
            .with_header("x-cr-site-id", "abc");
        assert_eq!(request.signed_headers(), "X-Cr-Site-Id=abc&X-Cr-Version=4.0.0");
    }

    #[test]
    fn only_first_header_value_is_used() {
        let request = CanonicalRequest::write("/order", b"")
            .with_header("X-Cr-Site-Id", "first")
            .with_header("x-cr-site-id", "second");
        assert_eq!(request.signed_headers(), "X-Cr-Site-Id=first");
    }

    #[test]
    fn write_request_signs_compact_json_in_field_order() {
        let request = CanonicalRequest::write("/order", br#"{"amount":1000}"#)
            .with_header("x-cr-site-id", "abc");
        assert_eq!(
            request.signing_content(),
            r#"{"Path":"/order","Header":"X-Cr-Site-Id=abc","Body":"{\"amount\":1000}"}"#
        );
    }

    #[test]
    fn ampersands_are_escaped() {
        let request = CanonicalRequest::write("/order", b"a&b")
            .with_header("x-cr-a", "1")
            .with_header("x-cr-b", "2");
        let content = request.signing_content();
        assert!(!content.contains('&'));
        assert_eq!(
            content,
            r#"{"Path":"/order","Header":"X-Cr-A=1\u0026X-Cr-B=2","Body":"a\u0026b"}"#
        );
    }

    #[test]
    fn angle_brackets_and_line_separators_are_escaped() {
        let escaped = escape_html_sensitive("<a>\u{2028}\u{2029}");
        assert_eq!(escaped, r"\u003ca\u003e\u2028\u2029");
    }

    #[test]
    fn non_utf8_body_is_replaced_not_dropped() {
        let body = [0x66, 0x6f, 0xff];
        let request = CanonicalRequest::write("/order", &body);
        assert!(request.signing_content().contains("fo\u{fffd}"));
    }
}

//! Validation of caller-supplied long URLs.
//!
//! Input without a scheme gets `http://` prepended before parsing. Only HTTP
//! and HTTPS targets are accepted.

use url::Url;

/// Scheme prepended to input that has none.
pub const DEFAULT_SCHEME: &str = "http";

/// Errors that can occur during URL validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates `input` and returns the long URL to store.
///
/// # Rules
///
/// 1. Empty (or whitespace-only) input is rejected
/// 2. Input without a `scheme://` prefix gets `http://` prepended
/// 3. The result must parse as an absolute URL with a host
/// 4. Only `http` and `https` are allowed
///
/// The returned string is the input as written (plus the default scheme when
/// it was missing). The parser's canonical form is returned only when it
/// differs by more than the trailing root slash, e.g. for percent-encoding.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for empty input,
/// [`UrlValidationError::InvalidFormat`] for malformed URLs and
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url("example.com/x").unwrap(), "http://example.com/x");
/// assert_eq!(validate_url("http://example.com").unwrap(), "http://example.com");
/// assert!(validate_url("http://").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let candidate = if has_scheme(input) {
        input.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, input)
    };

    let url =
        Url::parse(&candidate).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "URL has no host".to_string(),
        ));
    }

    let canonical = url.as_str();
    if canonical == candidate || canonical.strip_suffix('/') == Some(candidate.as_str()) {
        Ok(candidate)
    } else {
        Ok(canonical.to_string())
    }
}

/// Returns true if `input` starts with `scheme://`.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

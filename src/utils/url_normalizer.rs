//! Target URL normalization.
//!
//! Ensures every stored target carries an explicit scheme so redirects work
//! reliably: inputs without one get `http://` prepended, inputs with one are
//! stored verbatim after validation.

use url::Url;

/// Scheme prepended to targets that arrive without one.
const DEFAULT_SCHEME: &str = "http://";

/// Errors that can occur during target normalization.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes a target URL so that it always carries an http(s) scheme.
///
/// The input is trimmed and, when it lacks an `http://`/`https://` prefix,
/// `http://` is prepended. The result is parsed for validity but returned
/// as written - no host lowercasing or path rewriting happens here, so
/// `https://example.com` stays exactly `https://example.com`.
///
/// # Errors
///
/// Returns [`TargetUrlError::InvalidFormat`] for malformed or empty input.
/// Returns [`TargetUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_target("example.com").unwrap(), "http://example.com");
/// assert_eq!(
///     normalize_target("https://example.com").unwrap(),
///     "https://example.com"
/// );
/// ```
pub fn normalize_target(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::InvalidFormat("empty target".to_string()));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        // Some other explicit scheme; prepending http:// would only bury it.
        return Err(TargetUrlError::UnsupportedProtocol);
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(candidate),
        _ => Err(TargetUrlError::UnsupportedProtocol),
    }
}

/// Case-insensitive check for an explicit `http://` or `https://` prefix.
fn has_http_scheme(s: &str) -> bool {
    let prefix: String = s.chars().take(8).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("http://") || prefix.starts_with("https://")
}

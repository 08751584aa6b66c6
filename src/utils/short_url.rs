//! Absolute short-URL derivation.

/// Builds the public short URL for a code.
///
/// With a configured base (`BASE_URL`), the result is the base with any
/// trailing slash trimmed, followed by `/` and the code. Without one, a
/// root-relative path is returned so the front end can resolve it against
/// whatever host served it.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(absolute_short_url("https://sho.rt/", "abc"), "https://sho.rt/abc");
/// assert_eq!(absolute_short_url("", "abc"), "/abc");
/// ```
pub fn absolute_short_url(base: &str, code: &str) -> String {
    if base.is_empty() {
        format!("/{code}")
    } else {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }
}

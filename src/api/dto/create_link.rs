//! DTO for link creation requests.

use serde::Deserialize;
use validator::Validate;

/// Request to create a short link.
///
/// `code` is optional; when absent the service generates one.
///
/// ```json
/// {
///   "target": "https://example.com/some/long/path",
///   "code": "launch-2026"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, message = "target URL is required"))]
    pub target: String,

    pub code: Option<String>,
}

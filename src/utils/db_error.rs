use crate::error::AppError;
use serde_json::json;

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_code_key"))
}

/// Maps a creation failure, turning the code-uniqueness violation into the
/// conflict the caller is expected to react to.
pub fn map_create_error(e: sqlx::Error, code: &str) -> AppError {
    if is_unique_violation_on_code(&e) {
        AppError::conflict("Short code already in use", json!({ "code": code }))
    } else {
        AppError::from(e)
    }
}

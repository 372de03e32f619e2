//! Translation of `sqlx` errors into store errors.

use crate::domain::repositories::StoreError;

/// Name of the unique constraint on `urls.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "urls_code_key";

/// Returns true when `e` is a unique violation of the short code constraint.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
}

/// Maps a `sqlx` error raised while handling `code` to a [`StoreError`].
///
/// Pool acquisition timeouts surface as [`StoreError::Timeout`] with the
/// provided bound; everything that is not a duplicate code or a timeout is
/// reported as [`StoreError::Unavailable`].
pub fn map_sqlx_error(e: sqlx::Error, code: &str, timeout: std::time::Duration) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::DuplicateCode(code.to_string());
    }

    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound(code.to_string()),
        sqlx::Error::PoolTimedOut => StoreError::Timeout(timeout),
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut, "abc123", Duration::from_secs(5));
        assert_eq!(err, StoreError::Timeout(Duration::from_secs(5)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "abc123", Duration::from_secs(5));
        assert_eq!(err, StoreError::NotFound("abc123".to_string()));
    }

    #[test]
    fn test_other_errors_map_to_unavailable() {
        let err = map_sqlx_error(sqlx::Error::PoolClosed, "abc123", Duration::from_secs(5));
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolClosed));
    }
}

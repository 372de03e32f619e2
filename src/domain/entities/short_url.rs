//! Short URL entity representing a code → original URL mapping.

use chrono::{DateTime, Utc};

/// A stored short URL record.
///
/// `id` is assigned by the store and is independent of `code`, which is the
/// externally visible short code and the lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(id: i64, code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
        }
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewShortUrl {
    /// Builds a record stamped with the current time.
    pub fn now(code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original_url: original_url.into(),
            created_at: Utc::now(),
        }
    }

    /// Attaches the store-assigned identifier.
    pub fn into_stored(self, id: i64) -> ShortUrl {
        ShortUrl::new(id, self.code, self.original_url, self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_short_url_now() {
        let before = Utc::now();
        let new_url = NewShortUrl::now("abc123", "https://example.com");

        assert_eq!(new_url.code, "abc123");
        assert_eq!(new_url.original_url, "https://example.com");
        assert!(new_url.created_at >= before);
    }

    #[test]
    fn test_into_stored_keeps_code_and_id_separate() {
        let new_url = NewShortUrl::now("xyz789", "https://rust-lang.org");
        let created_at = new_url.created_at;

        let stored = new_url.into_stored(42);

        assert_eq!(stored.id, 42);
        assert_eq!(stored.code, "xyz789");
        assert_eq!(stored.original_url, "https://rust-lang.org");
        assert_eq!(stored.created_at, created_at);
    }
}

//! DTOs for link shortening endpoint.

use serde::Deserialize;

/// Parameters of a shorten request, read from the query string or a
/// urlencoded form body.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenParams {
    /// The long URL to shorten. A scheme is optional.
    pub url: Option<String>,

    /// When non-empty, the caller is sent back to `/` instead of the info page.
    pub home: Option<String>,
}

impl ShortenParams {
    /// Returns true if the caller asked to be redirected to the home page.
    pub fn wants_home(&self) -> bool {
        self.home.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Fills the fields missing here from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            url: self.url.or(fallback.url),
            home: self.home.or(fallback.home),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_home() {
        let mut params = ShortenParams::default();
        assert!(!params.wants_home());

        params.home = Some(String::new());
        assert!(!params.wants_home());

        params.home = Some("1".to_string());
        assert!(params.wants_home());
    }

    #[test]
    fn test_or_prefers_own_fields() {
        let body = ShortenParams {
            url: Some("https://body.example.com".to_string()),
            home: None,
        };
        let query = ShortenParams {
            url: Some("https://query.example.com".to_string()),
            home: Some("1".to_string()),
        };

        let merged = body.or(query);

        assert_eq!(merged.url.as_deref(), Some("https://body.example.com"));
        assert_eq!(merged.home.as_deref(), Some("1"));
    }
}

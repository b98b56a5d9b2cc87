use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Slack applied before the nominal expiry so a token is refreshed rather
/// than rejected mid-request.
const EXPIRY_SKEW_SECS: i64 = 30;

/// Session-held Spotify token cache. Threaded explicitly through the music
/// adapter; the session layer stores it but never refreshes it implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl SpotifyTokens {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: now + Duration::seconds(expires_in_secs),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_expired() {
        let now = Utc::now();
        let tokens = SpotifyTokens::new("tok".to_owned(), None, 3600, now);
        assert!(!tokens.is_expired(now));
    }

    #[test]
    fn token_expires_within_the_skew_window() {
        let now = Utc::now();
        let tokens = SpotifyTokens::new("tok".to_owned(), None, 20, now);
        assert!(tokens.is_expired(now));
        assert!(tokens.is_expired(now + Duration::seconds(21)));
    }
}

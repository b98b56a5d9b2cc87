use super::types::{ArtistItem, PlayHistoryItem, RecentlyPlayedResponse, TopArtistsResponse};
use crate::domain::{Fragment, SpotifyProfile};
use std::time::Duration;

const TOP_ARTISTS_URL: &str =
    "https://api.spotify.com/v1/me/top/artists?limit=10&time_range=long_term";
const RECENTLY_PLAYED_URL: &str = "https://api.spotify.com/v1/me/player/recently-played?limit=10";

pub struct SpotifyClient {
    http_client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Listening profile for the session's access token. Any upstream
    /// failure collapses to an absent fragment.
    pub async fn fetch_profile(&self, access_token: &str) -> Fragment<SpotifyProfile> {
        self.try_fetch(access_token).await.into()
    }

    async fn try_fetch(&self, access_token: &str) -> Option<SpotifyProfile> {
        let artists: TopArtistsResponse = self.get_json(TOP_ARTISTS_URL, access_token).await?;
        let recent: RecentlyPlayedResponse =
            self.get_json(RECENTLY_PLAYED_URL, access_token).await?;
        Some(normalize(artists.items, recent.items))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Option<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), url, "Spotify request failed");
            return None;
        }
        response.json().await.ok()
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(artists: Vec<ArtistItem>, recent: Vec<PlayHistoryItem>) -> SpotifyProfile {
    let top_artists = artists.into_iter().map(format_artist).collect();
    let recent_tracks = recent
        .into_iter()
        .map(|item| match item.track.artists.first() {
            Some(artist) => format!("{} by {}", item.track.name, artist.name),
            None => item.track.name,
        })
        .collect();
    SpotifyProfile {
        top_artists,
        recent_tracks,
    }
}

fn format_artist(artist: ArtistItem) -> String {
    if artist.genres.is_empty() {
        return artist.name;
    }
    let genres: Vec<&str> = artist.genres.iter().take(2).map(String::as_str).collect();
    format!("{} ({})", artist.name, genres.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artists_carry_their_first_two_genres() {
        let artist = ArtistItem {
            name: "Carly Rae Jepsen".to_owned(),
            genres: vec!["pop".to_owned(), "dance pop".to_owned(), "synthpop".to_owned()],
        };
        assert_eq!(format_artist(artist), "Carly Rae Jepsen (pop, dance pop)");
    }

    #[test]
    fn genreless_artists_keep_a_bare_name() {
        let artist = ArtistItem {
            name: "Obscure Act".to_owned(),
            genres: vec![],
        };
        assert_eq!(format_artist(artist), "Obscure Act");
    }

    #[test]
    fn tracks_are_attributed_to_their_first_artist() {
        let payload: RecentlyPlayedResponse = serde_json::from_value(serde_json::json!({
            "items": [
                {"track": {"name": "Run Away With Me", "artists": [{"name": "Carly Rae Jepsen"}, {"name": "Someone"}]}},
                {"track": {"name": "Untitled", "artists": []}}
            ]
        }))
        .unwrap();
        let profile = normalize(vec![], payload.items);
        assert_eq!(
            profile.recent_tracks,
            vec!["Run Away With Me by Carly Rae Jepsen", "Untitled"]
        );
    }
}

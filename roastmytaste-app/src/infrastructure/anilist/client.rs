use super::types::{GraphqlResponse, MediaListCollection, MediaStats, MediaTitle, QueryData, TitledMedia};
use crate::domain::{AnimeProfile, AnimeStats, Fragment};
use serde_json::json;
use std::time::Duration;

const GRAPHQL_URL: &str = "https://graphql.anilist.co";
const TITLE_LIMIT: usize = 10;

const PROFILE_QUERY: &str = r#"
query ($name: String) {
  User(name: $name) {
    name
    siteUrl
    statistics {
      anime {
        count
        minutesWatched
        episodesWatched
        statuses { status count }
        genres(limit: 5, sort: COUNT_DESC) { genre count }
      }
      manga {
        count
        chaptersRead
        volumesRead
        statuses { status count }
        genres(limit: 5, sort: COUNT_DESC) { genre count }
      }
    }
    favourites {
      anime(perPage: 10) { nodes { title { romaji english } } }
      manga(perPage: 10) { nodes { title { romaji english } } }
    }
  }
  animeWatching: MediaListCollection(userName: $name, type: ANIME, status: CURRENT) {
    lists { entries { media { title { romaji english } } } }
  }
  animeCompleted: MediaListCollection(userName: $name, type: ANIME, status: COMPLETED, sort: SCORE_DESC) {
    lists { entries { media { title { romaji english } } } }
  }
  mangaReading: MediaListCollection(userName: $name, type: MANGA, status: CURRENT) {
    lists { entries { media { title { romaji english } } } }
  }
  mangaCompleted: MediaListCollection(userName: $name, type: MANGA, status: COMPLETED, sort: SCORE_DESC) {
    lists { entries { media { title { romaji english } } } }
  }
}
"#;

pub struct AnilistClient {
    http_client: reqwest::Client,
}

impl AnilistClient {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Watching/reading profile for an AniList username. One GraphQL round
    /// trip; any error (transport, GraphQL errors, unknown user) is absence.
    pub async fn fetch_profile(&self, username: &str) -> Fragment<AnimeProfile> {
        self.try_fetch(username).await.into()
    }

    async fn try_fetch(&self, username: &str) -> Option<AnimeProfile> {
        let body = json!({
            "query": PROFILE_QUERY,
            "variables": {"name": username},
        });
        let response = self
            .http_client
            .post(GRAPHQL_URL)
            .json(&body)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "AniList request failed");
            return None;
        }
        let parsed: GraphqlResponse = response.json().await.ok()?;
        if !parsed.errors.is_empty() {
            tracing::debug!(username, "AniList returned GraphQL errors");
            return None;
        }
        normalize(parsed.data?)
    }
}

impl Default for AnilistClient {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(data: QueryData) -> Option<AnimeProfile> {
    let user = data.user?;
    let anime = &user.statistics.anime;
    let manga = &user.statistics.manga;

    let stats = AnimeStats {
        username: user.name,
        days_wasted: round1(anime.minutes_watched as f64 / 60.0 / 24.0),
        total_episodes: anime.episodes_watched,
        anime_watching: status_count(anime, "CURRENT"),
        anime_completed: status_count(anime, "COMPLETED"),
        anime_watching_list: collection_titles(data.anime_watching.as_ref()),
        anime_completed_list: collection_titles(data.anime_completed.as_ref()),
        top_anime_genres: anime.genres.iter().map(|g| g.genre.clone()).collect(),
        favorite_anime: favourite_titles(&user.favourites.anime.nodes),
        chapters_read: manga.chapters_read,
        volumes_read: manga.volumes_read,
        manga_reading: status_count(manga, "CURRENT"),
        manga_completed: status_count(manga, "COMPLETED"),
        manga_reading_list: collection_titles(data.manga_reading.as_ref()),
        manga_completed_list: collection_titles(data.manga_completed.as_ref()),
        top_manga_genres: manga.genres.iter().map(|g| g.genre.clone()).collect(),
        favorite_manga: favourite_titles(&user.favourites.manga.nodes),
        profile_url: user.site_url,
    };
    Some(AnimeProfile::Stats(stats))
}

fn status_count(stats: &MediaStats, status: &str) -> i64 {
    stats
        .statuses
        .iter()
        .find(|entry| entry.status == status)
        .map(|entry| entry.count)
        .unwrap_or(0)
}

fn preferred_title(title: &MediaTitle) -> Option<String> {
    title.english.clone().or_else(|| title.romaji.clone())
}

fn favourite_titles(nodes: &[TitledMedia]) -> Vec<String> {
    nodes
        .iter()
        .take(TITLE_LIMIT)
        .filter_map(|node| preferred_title(&node.title))
        .collect()
}

fn collection_titles(collection: Option<&MediaListCollection>) -> Vec<String> {
    let Some(collection) = collection else {
        return Vec::new();
    };
    collection
        .lists
        .iter()
        .flat_map(|group| group.entries.iter())
        .filter_map(|entry| entry.media.as_ref())
        .filter_map(|media| preferred_title(&media.title))
        .take(TITLE_LIMIT)
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minutes_become_days_with_one_decimal() {
        assert_eq!(round1(134_690.0 / 60.0 / 24.0), 93.5);
    }

    #[test]
    fn english_titles_win_and_romaji_fills_in() {
        let nodes: Vec<TitledMedia> = serde_json::from_value(json!([
            {"title": {"romaji": "Shingeki no Kyojin", "english": "Attack on Titan"}},
            {"title": {"romaji": "Mushishi", "english": null}},
            {"title": {"romaji": null, "english": null}}
        ]))
        .unwrap();
        assert_eq!(
            favourite_titles(&nodes),
            vec!["Attack on Titan", "Mushishi"]
        );
    }

    #[test]
    fn collection_titles_stop_at_the_limit() {
        let entries: Vec<serde_json::Value> = (0..15)
            .map(|i| json!({"media": {"title": {"romaji": format!("Show {i}"), "english": null}}}))
            .collect();
        let collection: MediaListCollection =
            serde_json::from_value(json!({"lists": [{"entries": entries}]})).unwrap();
        assert_eq!(collection_titles(Some(&collection)).len(), TITLE_LIMIT);
    }

    #[test]
    fn unknown_statuses_count_zero() {
        let stats: MediaStats = serde_json::from_value(json!({
            "count": 3,
            "statuses": [{"status": "COMPLETED", "count": 3}]
        }))
        .unwrap();
        assert_eq!(status_count(&stats, "CURRENT"), 0);
        assert_eq!(status_count(&stats, "COMPLETED"), 3);
    }

    #[test]
    fn a_full_payload_normalizes_end_to_end() {
        let data: QueryData = serde_json::from_value(json!({
            "User": {
                "name": "weeb42",
                "siteUrl": "https://anilist.co/user/weeb42",
                "statistics": {
                    "anime": {
                        "count": 120,
                        "minutesWatched": 144000,
                        "episodesWatched": 4800,
                        "statuses": [
                            {"status": "CURRENT", "count": 7},
                            {"status": "COMPLETED", "count": 100}
                        ],
                        "genres": [{"genre": "Action", "count": 60}]
                    },
                    "manga": {
                        "count": 20,
                        "chaptersRead": 900,
                        "volumesRead": 80,
                        "statuses": [{"status": "CURRENT", "count": 2}],
                        "genres": [{"genre": "Romance", "count": 12}]
                    }
                },
                "favourites": {
                    "anime": {"nodes": [{"title": {"romaji": null, "english": "Steins;Gate"}}]},
                    "manga": {"nodes": []}
                }
            },
            "animeWatching": {"lists": [{"entries": [
                {"media": {"title": {"romaji": "Frieren", "english": null}}}
            ]}]}
        }))
        .unwrap();

        let AnimeProfile::Stats(stats) = normalize(data).unwrap() else {
            panic!("expected full stats");
        };
        assert_eq!(stats.username, "weeb42");
        assert_eq!(stats.days_wasted, 100.0);
        assert_eq!(stats.anime_watching, 7);
        assert_eq!(stats.anime_watching_list, vec!["Frieren"]);
        assert_eq!(stats.top_anime_genres, vec!["Action"]);
        assert_eq!(stats.favorite_anime, vec!["Steins;Gate"]);
        assert_eq!(stats.manga_reading, 2);
    }
}

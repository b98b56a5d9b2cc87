use super::types::{Envelope, OwnedGame, OwnedGames, PlayerSummaries, RecentGame, RecentGames, ResolveVanity};
use crate::domain::{Fragment, SteamProfile, SteamStats};
use std::time::Duration;

const RESOLVE_VANITY_URL: &str =
    "https://api.steampowered.com/ISteamUser/ResolveVanityURL/v0001/";
const PLAYER_SUMMARIES_URL: &str =
    "https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES_URL: &str =
    "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";
const RECENT_GAMES_URL: &str =
    "https://api.steampowered.com/IPlayerService/GetRecentlyPlayedGames/v0001/";

const TOP_GAMES: usize = 10;

pub struct SteamClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl SteamClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
        }
    }

    /// Library profile for a numeric steam id or a vanity name. Requires an
    /// API key; the id lookup gates the fragment, the per-section calls
    /// degrade to empty lists.
    pub async fn fetch_profile(
        &self,
        steam_id: Option<&str>,
        vanity: Option<&str>,
    ) -> Fragment<SteamProfile> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Fragment::Absent;
        };

        let steam_id = match steam_id {
            Some(id) => Some(id.to_owned()),
            None => match vanity {
                Some(vanity) => self.resolve_vanity(api_key, vanity).await,
                None => None,
            },
        };
        let Some(steam_id) = steam_id else {
            return Fragment::Absent;
        };

        let summary = self.fetch_summary(api_key, &steam_id).await;
        let owned = self.fetch_owned(api_key, &steam_id).await;
        let recent = self.fetch_recent(api_key, &steam_id).await;

        let (player_name, profile_url) = summary
            .map(|p| (p.personaname, p.profileurl))
            .unwrap_or((None, None));

        Fragment::Present(SteamProfile::Stats(normalize(
            steam_id,
            player_name,
            profile_url,
            owned,
            recent,
        )))
    }

    async fn resolve_vanity(&self, api_key: &str, vanity: &str) -> Option<String> {
        let parsed: Envelope<ResolveVanity> = self
            .get_json(RESOLVE_VANITY_URL, &[("key", api_key), ("vanityurl", vanity)])
            .await?;
        if parsed.response.success == 1 {
            return parsed.response.steamid;
        }
        None
    }

    async fn fetch_summary(&self, api_key: &str, steam_id: &str) -> Option<super::types::PlayerSummary> {
        let parsed: Envelope<PlayerSummaries> = self
            .get_json(PLAYER_SUMMARIES_URL, &[("key", api_key), ("steamids", steam_id)])
            .await?;
        parsed.response.players.into_iter().next()
    }

    async fn fetch_owned(&self, api_key: &str, steam_id: &str) -> Vec<OwnedGame> {
        let parsed: Option<Envelope<OwnedGames>> = self
            .get_json(
                OWNED_GAMES_URL,
                &[
                    ("key", api_key),
                    ("steamid", steam_id),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                    ("format", "json"),
                ],
            )
            .await;
        parsed.map(|p| p.response.games).unwrap_or_default()
    }

    async fn fetch_recent(&self, api_key: &str, steam_id: &str) -> Vec<RecentGame> {
        let parsed: Option<Envelope<RecentGames>> = self
            .get_json(
                RECENT_GAMES_URL,
                &[("key", api_key), ("steamid", steam_id), ("format", "json")],
            )
            .await;
        parsed.map(|p| p.response.games).unwrap_or_default()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Option<T> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), url, "Steam request failed");
            return None;
        }
        response.json().await.ok()
    }
}

fn normalize(
    steam_id: String,
    player_name: Option<String>,
    profile_url: Option<String>,
    mut owned: Vec<OwnedGame>,
    recent: Vec<RecentGame>,
) -> SteamStats {
    let total_minutes: i64 = owned.iter().map(|g| g.playtime_forever).sum();

    // Upstream ordering is not guaranteed; rank by playtime ourselves.
    owned.sort_by(|a, b| b.playtime_forever.cmp(&a.playtime_forever));
    let top_games = owned
        .iter()
        .take(TOP_GAMES)
        .map(|game| {
            format!(
                "{} ({:.1}h)",
                game.name.as_deref().unwrap_or("Unknown"),
                hours(game.playtime_forever)
            )
        })
        .collect();

    let recent_games = recent
        .iter()
        .take(TOP_GAMES)
        .map(|game| {
            format!(
                "{} ({:.1}h last 2w)",
                game.name.as_deref().unwrap_or("Unknown"),
                hours(game.playtime_2weeks)
            )
        })
        .collect();

    SteamStats {
        steam_id,
        player_name,
        profile_url,
        total_playtime_hours: round1(hours(total_minutes)),
        top_games,
        recent_games,
    }
}

fn hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(name: &str, minutes: i64) -> OwnedGame {
        OwnedGame {
            name: Some(name.to_owned()),
            playtime_forever: minutes,
        }
    }

    #[test]
    fn top_games_are_resorted_by_playtime_before_truncation() {
        let games = vec![
            owned("Stardew Valley", 90),
            owned("Dota 2", 60_030),
            owned("Portal", 600),
        ];
        let stats = normalize("7656".to_owned(), None, None, games, vec![]);
        assert_eq!(
            stats.top_games,
            vec![
                "Dota 2 (1000.5h)",
                "Portal (10.0h)",
                "Stardew Valley (1.5h)"
            ]
        );
    }

    #[test]
    fn only_the_top_ten_survive() {
        let games: Vec<OwnedGame> = (0..15).map(|i| owned(&format!("g{i}"), i * 60)).collect();
        let stats = normalize("7656".to_owned(), None, None, games, vec![]);
        assert_eq!(stats.top_games.len(), 10);
    }

    #[test]
    fn total_hours_sum_with_one_decimal() {
        let games = vec![owned("a", 30), owned("b", 45)];
        let stats = normalize("7656".to_owned(), None, None, games, vec![]);
        assert_eq!(stats.total_playtime_hours, 1.3);
    }

    #[test]
    fn recent_games_use_the_two_week_counter() {
        let recent = vec![RecentGame {
            name: Some("Hades II".to_owned()),
            playtime_2weeks: 95,
        }];
        let stats = normalize("7656".to_owned(), None, None, vec![], recent);
        assert_eq!(stats.recent_games, vec!["Hades II (1.6h last 2w)"]);
        assert_eq!(stats.total_playtime_hours, 0.0);
    }
}

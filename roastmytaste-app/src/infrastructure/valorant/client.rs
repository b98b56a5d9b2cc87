use super::types::{Match, MatchesResponse, MmrResponse};
use crate::domain::{CombatSummary, Fragment, ValorantProfile};
use std::time::Duration;

const BASE_URL: &str = "https://api.henrikdev.xyz/valorant";
const MATCH_SAMPLE: usize = 5;

pub struct ValorantClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl ValorantClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(8))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
        }
    }

    /// Rank + recent-match profile for a riot id. The rank lookup gates the
    /// whole fragment; a failed match lookup degrades to a rank-only profile.
    pub async fn fetch_profile(
        &self,
        name: &str,
        tag: &str,
        region: &str,
    ) -> Fragment<ValorantProfile> {
        let Some((rank, elo)) = self.fetch_mmr(name, tag, region).await else {
            return Fragment::Absent;
        };
        let ign = format!("{name}#{tag}");

        let combat = match self.fetch_matches(name, tag, region).await {
            Some(matches) => Some(summarize_matches(name, tag, &matches)),
            None => None,
        };

        Fragment::Present(ValorantProfile::Ranked {
            ign,
            rank,
            elo,
            combat,
        })
    }

    async fn fetch_mmr(&self, name: &str, tag: &str, region: &str) -> Option<(String, i64)> {
        let url = endpoint(&["v3", "mmr", region, "pc", name, tag])?;
        let parsed: MmrResponse = self.get_json(url).await?;
        match parsed.data.and_then(|d| d.current) {
            Some(current) => Some((current.tier.name, current.elo)),
            None => Some(("Unranked".to_owned(), 0)),
        }
    }

    async fn fetch_matches(&self, name: &str, tag: &str, region: &str) -> Option<Vec<Match>> {
        let url = endpoint(&["v4", "matches", region, "pc", name, tag])?;
        let parsed: MatchesResponse = self.get_json(url).await?;
        Some(parsed.data.into_iter().take(MATCH_SAMPLE).collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: url::Url) -> Option<T> {
        let mut request = self.http_client.get(url.clone());
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key);
        }
        let response = request.send().await.ok()?;
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), %url, "Valorant request failed");
            return None;
        }
        response.json().await.ok()
    }
}

fn endpoint(segments: &[&str]) -> Option<url::Url> {
    let mut url = url::Url::parse(BASE_URL).ok()?;
    url.path_segments_mut().ok()?.extend(segments);
    Some(url)
}

/// Aggregate combat stats over the sampled matches. Upstream ratios are not
/// trusted; everything is recomputed here with zero-denominator guards.
fn summarize_matches(name: &str, tag: &str, matches: &[Match]) -> CombatSummary {
    let mut kills = 0_i64;
    let mut deaths = 0_i64;
    let mut headshots = 0_i64;
    let mut shots = 0_i64;
    let mut wins = 0_usize;
    let mut agents: Vec<(String, usize)> = Vec::new();

    for game in matches {
        let me = game.players.iter().find(|p| {
            p.name.eq_ignore_ascii_case(name) && p.tag.eq_ignore_ascii_case(tag)
        });
        let Some(me) = me else { continue };

        kills += me.stats.kills;
        deaths += me.stats.deaths;
        headshots += me.stats.headshots;
        shots += me.stats.headshots + me.stats.bodyshots + me.stats.legshots;

        match agents.iter_mut().find(|(agent, _)| *agent == me.agent.name) {
            Some((_, count)) => *count += 1,
            None => agents.push((me.agent.name.clone(), 1)),
        }

        let won = game
            .teams
            .iter()
            .find(|team| team.won)
            .is_some_and(|team| team.team_id.eq_ignore_ascii_case(&me.team_id));
        if won {
            wins += 1;
        }
    }

    // Zero deaths records the kill total, not a division blowup.
    let k_d_ratio = if deaths > 0 {
        round2(kills as f64 / deaths as f64)
    } else {
        kills as f64
    };
    let headshot_rate = if shots > 0 {
        round2(headshots as f64 / shots as f64 * 100.0)
    } else {
        0.0
    };

    // Ties go to the agent seen first, which keeps the output stable.
    let main_agent = agents
        .iter()
        .max_by_key(|(_, count)| *count)
        .map(|(agent, _)| agent.clone())
        .unwrap_or_else(|| "Unknown".to_owned());

    let losses = matches.len().saturating_sub(wins);
    CombatSummary {
        k_d_ratio,
        headshot_rate,
        main_agent,
        recent_matches: format!("{wins}W/{losses}L last {}", matches.len()),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn match_payload(kills: i64, deaths: i64, agent: &str, won: bool) -> Match {
        serde_json::from_value(json!({
            "players": [{
                "name": "Foo",
                "tag": "1234",
                "team_id": "Red",
                "agent": {"name": agent},
                "stats": {"kills": kills, "deaths": deaths, "headshots": 4, "bodyshots": 10, "legshots": 2}
            }],
            "teams": [
                {"team_id": "Red", "won": won},
                {"team_id": "Blue", "won": !won}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn zero_deaths_records_the_kill_total() {
        let matches = vec![match_payload(18, 0, "Jett", true)];
        let summary = summarize_matches("Foo", "1234", &matches);
        assert_eq!(summary.k_d_ratio, 18.0);
        assert!(summary.k_d_ratio.is_finite());
    }

    #[test]
    fn zero_shots_yield_a_zero_headshot_rate() {
        let game: Match = serde_json::from_value(json!({
            "players": [{
                "name": "Foo",
                "tag": "1234",
                "team_id": "Red",
                "agent": {"name": "Sage"},
                "stats": {"kills": 0, "deaths": 3, "headshots": 0, "bodyshots": 0, "legshots": 0}
            }],
            "teams": []
        }))
        .unwrap();
        let summary = summarize_matches("Foo", "1234", &[game]);
        assert_eq!(summary.headshot_rate, 0.0);
    }

    #[test]
    fn main_agent_is_the_most_frequent_one() {
        let matches = vec![
            match_payload(10, 5, "Jett", true),
            match_payload(12, 6, "Sage", false),
            match_payload(8, 4, "Jett", true),
        ];
        let summary = summarize_matches("Foo", "1234", &matches);
        assert_eq!(summary.main_agent, "Jett");
        assert_eq!(summary.recent_matches, "2W/1L last 3");
    }

    #[test]
    fn player_lookup_is_case_insensitive() {
        let matches = vec![match_payload(10, 4, "Jett", true)];
        let summary = summarize_matches("fOo", "1234", &matches);
        assert_eq!(summary.k_d_ratio, 2.5);
    }

    #[test]
    fn ratios_round_to_two_decimals() {
        let matches = vec![match_payload(10, 3, "Jett", false)];
        let summary = summarize_matches("Foo", "1234", &matches);
        assert_eq!(summary.k_d_ratio, 3.33);
        assert_eq!(summary.headshot_rate, 25.0);
    }

    #[test]
    fn riot_ids_with_spaces_build_valid_endpoints() {
        let url = endpoint(&["v3", "mmr", "na", "pc", "Big Foo", "1234"]).unwrap();
        assert!(url.as_str().ends_with("/v3/mmr/na/pc/Big%20Foo/1234"));
    }
}

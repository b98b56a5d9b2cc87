use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Listening profile pulled from the authenticated Spotify session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotifyProfile {
    pub top_artists: Vec<String>,
    pub recent_tracks: Vec<String>,
}

impl SpotifyProfile {
    pub fn prompt_section(&self) -> String {
        format!(
            "Spotify Data:\nTop Artists: {}\nRecent Tracks: {}",
            self.top_artists.join(", "),
            self.recent_tracks.join(", ")
        )
    }
}

/// Aggregates derived from recent match history. Omitted when the match
/// lookup fails after a successful rank lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub k_d_ratio: f64,
    pub headshot_rate: f64,
    pub main_agent: String,
    pub recent_matches: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValorantProfile {
    Ranked {
        ign: String,
        rank: String,
        elo: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        combat: Option<CombatSummary>,
    },
    HandleOnly {
        ign: String,
        notes: String,
    },
}

impl ValorantProfile {
    pub fn handle_only(name: &str, tag: &str) -> Self {
        ValorantProfile::HandleOnly {
            ign: format!("{name}#{tag}"),
            notes: "Valorant API unavailable; rely on handle only.".to_owned(),
        }
    }

    pub fn prompt_section(&self) -> String {
        match self {
            ValorantProfile::Ranked {
                ign,
                rank,
                elo,
                combat,
            } => {
                let mut section = format!("Valorant Data:\nIGN: {ign}\nRank: {rank} (ELO {elo})");
                if let Some(combat) = combat {
                    let _ = write!(
                        section,
                        "\nK/D Ratio: {:.2}\nHeadshot Rate: {:.2}%\nMain Agent: {}\nRecent Matches: {}",
                        combat.k_d_ratio,
                        combat.headshot_rate,
                        combat.main_agent,
                        combat.recent_matches
                    );
                }
                section
            }
            ValorantProfile::HandleOnly { ign, notes } => {
                format!("Valorant Data:\nIGN: {ign}\nNotes: {notes}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeStats {
    pub username: String,
    pub days_wasted: f64,
    pub total_episodes: i64,
    pub anime_watching: i64,
    pub anime_completed: i64,
    pub anime_watching_list: Vec<String>,
    pub anime_completed_list: Vec<String>,
    pub top_anime_genres: Vec<String>,
    pub favorite_anime: Vec<String>,
    pub chapters_read: i64,
    pub volumes_read: i64,
    pub manga_reading: i64,
    pub manga_completed: i64,
    pub manga_reading_list: Vec<String>,
    pub manga_completed_list: Vec<String>,
    pub top_manga_genres: Vec<String>,
    pub favorite_manga: Vec<String>,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimeProfile {
    Stats(AnimeStats),
    HandleOnly { username: String, notes: String },
}

impl AnimeProfile {
    pub fn handle_only(username: &str) -> Self {
        AnimeProfile::HandleOnly {
            username: username.to_owned(),
            notes: "AniList data unavailable at generation time.".to_owned(),
        }
    }

    pub fn prompt_section(&self) -> String {
        match self {
            AnimeProfile::Stats(stats) => format!(
                "AniList Data:\n\
                 Username: {}\n\
                 Days Wasted Watching: {:.1}\n\
                 Total Episodes Watched: {}\n\
                 Anime Watching Count: {}\n\
                 Anime Completed Count: {}\n\
                 Currently Watching: {}\n\
                 Completed Anime (Top 10): {}\n\
                 Top Anime Genres: {}\n\
                 Favorite Anime: {}\n\
                 Chapters Read: {}\n\
                 Volumes Read: {}\n\
                 Manga Reading Count: {}\n\
                 Manga Completed Count: {}\n\
                 Currently Reading Manga: {}\n\
                 Completed Manga (Top 10): {}\n\
                 Top Manga Genres: {}\n\
                 Favorite Manga: {}",
                stats.username,
                stats.days_wasted,
                stats.total_episodes,
                stats.anime_watching,
                stats.anime_completed,
                stats.anime_watching_list.join(", "),
                stats.anime_completed_list.join(", "),
                stats.top_anime_genres.join(", "),
                stats.favorite_anime.join(", "),
                stats.chapters_read,
                stats.volumes_read,
                stats.manga_reading,
                stats.manga_completed,
                stats.manga_reading_list.join(", "),
                stats.manga_completed_list.join(", "),
                stats.top_manga_genres.join(", "),
                stats.favorite_manga.join(", ")
            ),
            AnimeProfile::HandleOnly { username, notes } => {
                format!("AniList Data:\nUsername: {username}\nNotes: {notes}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteamStats {
    pub steam_id: String,
    pub player_name: Option<String>,
    pub profile_url: Option<String>,
    pub total_playtime_hours: f64,
    pub top_games: Vec<String>,
    pub recent_games: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SteamProfile {
    Stats(SteamStats),
    IdOnly { steam_id: String, notes: String },
}

impl SteamProfile {
    pub fn id_only(identifier: &str) -> Self {
        SteamProfile::IdOnly {
            steam_id: identifier.to_owned(),
            notes: "Steam stats unavailable; id provided only.".to_owned(),
        }
    }

    pub fn prompt_section(&self) -> String {
        match self {
            SteamProfile::Stats(stats) => format!(
                "Steam Data:\n\
                 Player: {} (SteamID: {})\n\
                 Profile: {}\n\
                 Total Playtime: {:.1}h\n\
                 Top Games: {}\n\
                 Recent Games: {}",
                stats.player_name.as_deref().unwrap_or("Unknown"),
                stats.steam_id,
                stats.profile_url.as_deref().unwrap_or("unknown"),
                stats.total_playtime_hours,
                stats.top_games.join(", "),
                stats.recent_games.join(", ")
            ),
            SteamProfile::IdOnly { steam_id, notes } => {
                format!("Steam Data:\nSteamID: {steam_id}\nNotes: {notes}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_serializes_with_handle_and_notes() {
        let profile = ValorantProfile::handle_only("Foo", "1234");
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["ign"], "Foo#1234");
        assert!(value["notes"]
            .as_str()
            .unwrap()
            .contains("unavailable"));
    }

    #[test]
    fn ranked_section_omits_combat_lines_when_missing() {
        let profile = ValorantProfile::Ranked {
            ign: "Foo#1234".to_owned(),
            rank: "Gold 2".to_owned(),
            elo: 1450,
            combat: None,
        };
        let section = profile.prompt_section();
        assert!(section.contains("Rank: Gold 2 (ELO 1450)"));
        assert!(!section.contains("K/D Ratio"));
    }

    #[test]
    fn combat_lines_use_two_decimal_places() {
        let profile = ValorantProfile::Ranked {
            ign: "Foo#1234".to_owned(),
            rank: "Gold 2".to_owned(),
            elo: 1450,
            combat: Some(CombatSummary {
                k_d_ratio: 1.5,
                headshot_rate: 23.0,
                main_agent: "Jett".to_owned(),
                recent_matches: "3W/2L last 5".to_owned(),
            }),
        };
        let section = profile.prompt_section();
        assert!(section.contains("K/D Ratio: 1.50"));
        assert!(section.contains("Headshot Rate: 23.00%"));
    }

    #[test]
    fn steam_hours_use_one_decimal_place() {
        let profile = SteamProfile::Stats(SteamStats {
            steam_id: "7656".to_owned(),
            player_name: Some("gaben".to_owned()),
            profile_url: None,
            total_playtime_hours: 1234.0,
            top_games: vec!["Dota 2 (1000.5h)".to_owned()],
            recent_games: vec![],
        });
        assert!(profile.prompt_section().contains("Total Playtime: 1234.0h"));
    }
}

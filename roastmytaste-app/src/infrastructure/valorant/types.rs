use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MmrResponse {
    pub data: Option<MmrData>,
}

#[derive(Debug, Deserialize)]
pub struct MmrData {
    pub current: Option<CurrentMmr>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentMmr {
    pub tier: Tier,
    #[serde(default)]
    pub elo: i64,
}

#[derive(Debug, Deserialize)]
pub struct Tier {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub data: Vec<Match>,
}

#[derive(Debug, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub players: Vec<MatchPlayer>,
    #[serde(default)]
    pub teams: Vec<MatchTeam>,
}

#[derive(Debug, Deserialize)]
pub struct MatchPlayer {
    pub name: String,
    pub tag: String,
    pub team_id: String,
    pub agent: Agent,
    pub stats: PlayerStats,
}

#[derive(Debug, Deserialize)]
pub struct Agent {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerStats {
    #[serde(default)]
    pub kills: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub headshots: i64,
    #[serde(default)]
    pub bodyshots: i64,
    #[serde(default)]
    pub legshots: i64,
}

#[derive(Debug, Deserialize)]
pub struct MatchTeam {
    pub team_id: String,
    #[serde(default)]
    pub won: bool,
}

use serde::Deserialize;

/// Steam Web API wraps every payload in a `response` object.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResolveVanity {
    #[serde(default)]
    pub success: i64,
    #[serde(default)]
    pub steamid: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerSummaries {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSummary {
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub profileurl: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OwnedGames {
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnedGame {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playtime_forever: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecentGames {
    #[serde(default)]
    pub games: Vec<RecentGame>,
}

#[derive(Debug, Deserialize)]
pub struct RecentGame {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub playtime_2weeks: i64,
}

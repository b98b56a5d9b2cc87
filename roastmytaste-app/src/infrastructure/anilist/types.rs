use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<QueryData>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct QueryData {
    #[serde(rename = "User")]
    pub user: Option<AnilistUser>,
    #[serde(rename = "animeWatching", default)]
    pub anime_watching: Option<MediaListCollection>,
    #[serde(rename = "animeCompleted", default)]
    pub anime_completed: Option<MediaListCollection>,
    #[serde(rename = "mangaReading", default)]
    pub manga_reading: Option<MediaListCollection>,
    #[serde(rename = "mangaCompleted", default)]
    pub manga_completed: Option<MediaListCollection>,
}

#[derive(Debug, Deserialize)]
pub struct AnilistUser {
    pub name: String,
    #[serde(rename = "siteUrl", default)]
    pub site_url: String,
    pub statistics: Statistics,
    pub favourites: Favourites,
}

#[derive(Debug, Deserialize)]
pub struct Statistics {
    pub anime: MediaStats,
    pub manga: MediaStats,
}

#[derive(Debug, Deserialize, Default)]
pub struct MediaStats {
    #[serde(default)]
    pub count: i64,
    #[serde(rename = "minutesWatched", default)]
    pub minutes_watched: i64,
    #[serde(rename = "episodesWatched", default)]
    pub episodes_watched: i64,
    #[serde(rename = "chaptersRead", default)]
    pub chapters_read: i64,
    #[serde(rename = "volumesRead", default)]
    pub volumes_read: i64,
    #[serde(default)]
    pub statuses: Vec<StatusCount>,
    #[serde(default)]
    pub genres: Vec<GenreCount>,
}

#[derive(Debug, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct Favourites {
    pub anime: FavouriteNodes,
    pub manga: FavouriteNodes,
}

#[derive(Debug, Deserialize, Default)]
pub struct FavouriteNodes {
    #[serde(default)]
    pub nodes: Vec<TitledMedia>,
}

#[derive(Debug, Deserialize)]
pub struct TitledMedia {
    pub title: MediaTitle,
}

#[derive(Debug, Deserialize, Default)]
pub struct MediaTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MediaListCollection {
    #[serde(default)]
    pub lists: Vec<MediaListGroup>,
}

#[derive(Debug, Deserialize)]
pub struct MediaListGroup {
    #[serde(default)]
    pub entries: Vec<MediaListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MediaListEntry {
    pub media: Option<TitledMedia>,
}

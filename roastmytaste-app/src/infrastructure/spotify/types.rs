use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TopArtistsResponse {
    #[serde(default)]
    pub items: Vec<ArtistItem>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistItem {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentlyPlayedResponse {
    #[serde(default)]
    pub items: Vec<PlayHistoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlayHistoryItem {
    pub track: TrackItem,
}

#[derive(Debug, Deserialize)]
pub struct TrackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

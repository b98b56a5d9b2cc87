use super::{AnimeProfile, Fragment, SpotifyProfile, SteamProfile, ValorantProfile};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Fallback prompt when no source produced anything. The generation step must
/// never see an empty prompt.
pub const NO_TELEMETRY_PROMPT: &str = "No telemetry received. Invent a roast anyway.";

/// Raw lookup keys as the user supplied them, plus the Spotify display name
/// captured from the session. Kept verbatim so the snapshot records what was
/// asked for even when a source returned nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoastInputs {
    pub valorant_name: Option<String>,
    pub valorant_tag: Option<String>,
    pub valorant_region: Option<String>,
    pub anilist_user: Option<String>,
    pub steam_id: Option<String>,
    pub steam_vanity: Option<String>,
    pub spotify_name: Option<String>,
}

impl RoastInputs {
    /// Valorant requires both halves of the riot id. Region defaults to "na".
    pub fn valorant_identity(&self) -> Option<(&str, &str, &str)> {
        match (self.valorant_name.as_deref(), self.valorant_tag.as_deref()) {
            (Some(name), Some(tag)) => {
                Some((name, tag, self.valorant_region.as_deref().unwrap_or("na")))
            }
            _ => None,
        }
    }

    pub fn steam_identifier(&self) -> Option<&str> {
        self.steam_id.as_deref().or(self.steam_vanity.as_deref())
    }

    fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(name) = &self.spotify_name {
            lines.push(format!("- Spotify account connected as {name}."));
        }
        if let Some((name, tag, region)) = self.valorant_identity() {
            lines.push(format!(
                "- Valorant IGN {name}#{tag} ({}) provided even if stats are missing.",
                region.to_uppercase()
            ));
        }
        if let Some(user) = &self.anilist_user {
            lines.push(format!("- AniList profile submitted: {user}."));
        }
        if let Some(id) = self.steam_identifier() {
            lines.push(format!("- Steam identifier: {id}."));
        }
        lines
    }
}

/// One roast request's worth of aggregated profile data. Built once, used to
/// render the prompt and the persisted snapshot, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedUserData {
    pub spotify: Fragment<SpotifyProfile>,
    pub valorant: Fragment<ValorantProfile>,
    pub anime: Fragment<AnimeProfile>,
    pub steam: Fragment<SteamProfile>,
    pub inputs: RoastInputs,
}

impl CombinedUserData {
    pub fn new(
        spotify: Fragment<SpotifyProfile>,
        valorant: Fragment<ValorantProfile>,
        anime: Fragment<AnimeProfile>,
        steam: Fragment<SteamProfile>,
        inputs: RoastInputs,
    ) -> Self {
        Self {
            spotify,
            valorant,
            anime,
            steam,
            inputs,
        }
    }

    /// Names of present fragments in fixed priority order. Placeholder
    /// fragments count: a supplied identifier is worth referencing even
    /// without live stats.
    pub fn sources(&self) -> Vec<String> {
        let named: [(&str, bool); 4] = [
            ("Spotify", self.spotify.is_present()),
            ("Valorant", self.valorant.is_present()),
            ("AniList", self.anime.is_present()),
            ("Steam", self.steam.is_present()),
        ];
        named
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name.to_owned())
            .collect()
    }

    /// JSON snapshot stored alongside the roast. Present fragments carry a
    /// `type` marker naming their source; absent ones stay `{}`.
    pub fn as_view(&self) -> Value {
        json!({
            "spotify": serde_json::to_value(&self.spotify).unwrap_or_else(|_| json!({})),
            "valorant": tagged_fragment(&self.valorant, "valorant"),
            "anime": tagged_fragment(&self.anime, "anime"),
            "steam": tagged_fragment(&self.steam, "steam"),
            "inputs": serde_json::to_value(&self.inputs).unwrap_or_else(|_| json!({})),
            "sources": self.sources(),
        })
    }

    /// Deterministic prompt block: one labeled section per present fragment
    /// in source order, then a summary of the raw identifiers, then the
    /// sentinel line if nothing else rendered. Never empty.
    pub fn prompt_block(&self) -> String {
        let mut parts = Vec::new();
        if let Some(spotify) = self.spotify.as_ref() {
            parts.push(spotify.prompt_section());
        }
        if let Some(valorant) = self.valorant.as_ref() {
            parts.push(valorant.prompt_section());
        }
        if let Some(anime) = self.anime.as_ref() {
            parts.push(anime.prompt_section());
        }
        if let Some(steam) = self.steam.as_ref() {
            parts.push(steam.prompt_section());
        }

        let summary = self.inputs.summary_lines();
        if !summary.is_empty() {
            parts.push(format!("User Provided Identifiers:\n{}", summary.join("\n")));
        }

        if parts.is_empty() {
            return NO_TELEMETRY_PROMPT.to_owned();
        }
        parts.join("\n\n")
    }
}

fn tagged_fragment<T: Serialize>(fragment: &Fragment<T>, source: &str) -> Value {
    let mut value = serde_json::to_value(fragment).unwrap_or_else(|_| json!({}));
    if let Some(map) = value.as_object_mut() {
        if !map.is_empty() {
            map.insert("type".to_owned(), Value::String(source.to_owned()));
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_data() -> CombinedUserData {
        CombinedUserData::new(
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            RoastInputs::default(),
        )
    }

    #[test]
    fn empty_aggregation_falls_back_to_sentinel() {
        let combined = no_data();
        assert_eq!(combined.prompt_block(), NO_TELEMETRY_PROMPT);
        assert!(combined.sources().is_empty());
    }

    #[test]
    fn prompt_block_is_never_empty() {
        let combined = no_data();
        assert!(!combined.prompt_block().is_empty());
    }

    #[test]
    fn sources_keep_fixed_priority_order() {
        let combined = CombinedUserData::new(
            Fragment::Present(SpotifyProfile {
                top_artists: vec!["Carly Rae Jepsen (pop)".to_owned()],
                recent_tracks: vec![],
            }),
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Present(SteamProfile::id_only("gaben")),
            RoastInputs::default(),
        );
        assert_eq!(combined.sources(), vec!["Spotify", "Steam"]);
    }

    #[test]
    fn placeholder_counts_as_a_source_and_shows_in_view() {
        let inputs = RoastInputs {
            valorant_name: Some("Foo".to_owned()),
            valorant_tag: Some("1234".to_owned()),
            valorant_region: Some("na".to_owned()),
            ..Default::default()
        };
        let combined = CombinedUserData::new(
            Fragment::Absent,
            Fragment::Present(ValorantProfile::handle_only("Foo", "1234")),
            Fragment::Absent,
            Fragment::Absent,
            inputs,
        );

        assert_eq!(combined.sources(), vec!["Valorant"]);

        let view = combined.as_view();
        assert_eq!(view["valorant"]["type"], "valorant");
        assert_eq!(view["valorant"]["ign"], "Foo#1234");
        assert!(view["valorant"]["notes"]
            .as_str()
            .unwrap()
            .contains("unavailable"));
    }

    #[test]
    fn as_view_is_idempotent() {
        let combined = CombinedUserData::new(
            Fragment::Absent,
            Fragment::Present(ValorantProfile::handle_only("Foo", "1234")),
            Fragment::Absent,
            Fragment::Absent,
            RoastInputs::default(),
        );
        assert_eq!(combined.as_view(), combined.as_view());
    }

    #[test]
    fn identifier_summary_renders_without_fragments() {
        let inputs = RoastInputs {
            anilist_user: Some("weeb42".to_owned()),
            steam_vanity: Some("gaben".to_owned()),
            ..Default::default()
        };
        let combined = CombinedUserData::new(
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            Fragment::Absent,
            inputs,
        );
        let block = combined.prompt_block();
        assert!(block.starts_with("User Provided Identifiers:"));
        assert!(block.contains("- AniList profile submitted: weeb42."));
        assert!(block.contains("- Steam identifier: gaben."));
    }

    #[test]
    fn absent_fragments_stay_empty_maps_in_view() {
        let view = no_data().as_view();
        assert_eq!(view["spotify"], serde_json::json!({}));
        assert_eq!(view["valorant"], serde_json::json!({}));
    }
}

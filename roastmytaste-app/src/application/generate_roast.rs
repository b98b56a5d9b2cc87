use crate::domain::{
    AnimeProfile, CombinedUserData, Fragment, Roast, RoastInputs, SpotifyProfile, SteamProfile,
    ValorantProfile,
};
use crate::infrastructure::anilist::AnilistClient;
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::security::InputSanitizer;
use crate::infrastructure::spotify::SpotifyClient;
use crate::infrastructure::steam::SteamClient;
use crate::infrastructure::valorant::ValorantClient;
use uuid::Uuid;

/// The roast pipeline: sanitize identifiers, fan out to whichever sources
/// apply, aggregate, generate. Source failures degrade, generation failures
/// become the roast text; this use-case itself never fails.
pub struct GenerateRoast {
    spotify: SpotifyClient,
    valorant: ValorantClient,
    anilist: AnilistClient,
    steam: SteamClient,
    gemini: GeminiClient,
}

impl GenerateRoast {
    pub fn new(
        gemini_api_key: String,
        henrik_api_key: Option<String>,
        steam_api_key: Option<String>,
    ) -> Self {
        Self {
            spotify: SpotifyClient::new(),
            valorant: ValorantClient::new(henrik_api_key),
            anilist: AnilistClient::new(),
            steam: SteamClient::new(steam_api_key),
            gemini: GeminiClient::new(gemini_api_key),
        }
    }

    pub async fn execute(
        &self,
        inputs: RoastInputs,
        spotify_token: Option<&str>,
        user_id: Option<Uuid>,
    ) -> Roast {
        let inputs = sanitize_inputs(inputs);

        // Independent upstreams; a slow one only costs its own timeout.
        let (spotify, valorant, anime, steam) = tokio::join!(
            self.fetch_spotify(spotify_token),
            self.fetch_valorant(&inputs),
            self.fetch_anime(&inputs),
            self.fetch_steam(&inputs),
        );

        let combined = CombinedUserData::new(spotify, valorant, anime, steam, inputs);
        let prompt = combined.prompt_block();

        let roast_text = match self.gemini.generate_roast(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "roast generation failed; persisting the failure text");
                err.to_string()
            }
        };

        Roast::new(user_id, roast_text, &combined)
    }

    async fn fetch_spotify(&self, token: Option<&str>) -> Fragment<SpotifyProfile> {
        match token {
            Some(token) => self.spotify.fetch_profile(token).await,
            None => Fragment::Absent,
        }
    }

    async fn fetch_valorant(&self, inputs: &RoastInputs) -> Fragment<ValorantProfile> {
        let Some((name, tag, region)) = inputs.valorant_identity() else {
            return Fragment::Absent;
        };
        let fragment = self.valorant.fetch_profile(name, tag, region).await;
        if fragment.is_absent() {
            // The identifier was supplied, so the roast still gets a handle
            // to work with.
            return Fragment::Present(ValorantProfile::handle_only(name, tag));
        }
        fragment
    }

    async fn fetch_anime(&self, inputs: &RoastInputs) -> Fragment<AnimeProfile> {
        let Some(username) = inputs.anilist_user.as_deref() else {
            return Fragment::Absent;
        };
        let fragment = self.anilist.fetch_profile(username).await;
        if fragment.is_absent() {
            return Fragment::Present(AnimeProfile::handle_only(username));
        }
        fragment
    }

    async fn fetch_steam(&self, inputs: &RoastInputs) -> Fragment<SteamProfile> {
        let Some(identifier) = inputs.steam_identifier() else {
            return Fragment::Absent;
        };
        let fragment = self
            .steam
            .fetch_profile(inputs.steam_id.as_deref(), inputs.steam_vanity.as_deref())
            .await;
        if fragment.is_absent() {
            return Fragment::Present(SteamProfile::id_only(identifier));
        }
        fragment
    }
}

fn sanitize_inputs(inputs: RoastInputs) -> RoastInputs {
    RoastInputs {
        valorant_name: InputSanitizer::clean_optional(inputs.valorant_name.as_deref()),
        valorant_tag: InputSanitizer::clean_optional(inputs.valorant_tag.as_deref()),
        valorant_region: InputSanitizer::clean_optional(inputs.valorant_region.as_deref()),
        anilist_user: InputSanitizer::clean_optional(inputs.anilist_user.as_deref()),
        steam_id: InputSanitizer::clean_optional(inputs.steam_id.as_deref()),
        steam_vanity: InputSanitizer::clean_optional(inputs.steam_vanity.as_deref()),
        spotify_name: inputs.spotify_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_fields_become_absent_identifiers() {
        let inputs = sanitize_inputs(RoastInputs {
            valorant_name: Some("   ".to_owned()),
            anilist_user: Some("  weeb42 ".to_owned()),
            ..Default::default()
        });
        assert_eq!(inputs.valorant_name, None);
        assert_eq!(inputs.anilist_user.as_deref(), Some("weeb42"));
    }
}

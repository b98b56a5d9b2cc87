mod fragment;
mod profiles;
mod roast;
mod user;
mod user_data;

pub use fragment::Fragment;
pub use profiles::{AnimeProfile, AnimeStats, CombatSummary, SpotifyProfile, SteamProfile, SteamStats, ValorantProfile};
pub use roast::Roast;
pub use user::{avatar_or_fallback, User};
pub use user_data::{CombinedUserData, RoastInputs, NO_TELEMETRY_PROMPT};

use crate::application::GenerateRoast;
use crate::infrastructure::auth::{GoogleOAuth, SpotifyOAuth};
use crate::infrastructure::db::{RecentRoastRepository, RoastRepository, UserRepository};
use crate::infrastructure::security::CooldownLimiter;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub generate_roast: Arc<GenerateRoast>,
    pub rate_limiter: CooldownLimiter,
    pub roasts: RoastRepository,
    pub users: UserRepository,
    pub recent_roasts: RecentRoastRepository,
    pub google_oauth: GoogleOAuth,
    pub spotify_oauth: SpotifyOAuth,
}

impl AppContext {
    /// Wire everything from the environment. Missing required credentials
    /// abort startup; the optional source keys just disable their source.
    pub fn from_env(db: DatabaseConnection) -> Self {
        let db = Arc::new(db);
        let gemini_api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        let henrik_api_key = std::env::var("HENRIK_API_KEY").ok();
        let steam_api_key = std::env::var("STEAM_API_KEY").ok();
        if henrik_api_key.is_none() {
            tracing::warn!("HENRIK_API_KEY not set; Valorant lookups will run unauthenticated");
        }
        if steam_api_key.is_none() {
            tracing::warn!("STEAM_API_KEY not set; the Steam source is disabled");
        }

        let google_oauth = GoogleOAuth::new(
            &std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set"),
            &std::env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set"),
            &std::env::var("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8888/auth/google/callback".to_string()),
        )
        .expect("Failed to configure Google OAuth");

        let spotify_oauth = SpotifyOAuth::new(
            &std::env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set"),
            &std::env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set"),
            &std::env::var("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8888/auth/spotify/callback".to_string()),
        )
        .expect("Failed to configure Spotify OAuth");

        Self {
            generate_roast: Arc::new(GenerateRoast::new(
                gemini_api_key,
                henrik_api_key,
                steam_api_key,
            )),
            rate_limiter: CooldownLimiter::new(),
            roasts: RoastRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            recent_roasts: RecentRoastRepository::new(db.clone()),
            google_oauth,
            spotify_oauth,
        }
    }
}

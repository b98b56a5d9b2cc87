mod google_oauth;
mod spotify_oauth;

pub use google_oauth::{GoogleOAuth, GoogleUserInfo};
pub use spotify_oauth::SpotifyOAuth;

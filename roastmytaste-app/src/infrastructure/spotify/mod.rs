mod client;
mod tokens;
mod types;

pub use client::SpotifyClient;
pub use tokens::SpotifyTokens;

const DEFAULT_PORT: u16 = 8888;

pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        Self { port, database_url }
    }
}

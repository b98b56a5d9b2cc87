use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub google_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new(google_id: String, email: String, name: String, avatar_url: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            google_id,
            email,
            name,
            avatar_url,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Generated-avatar fallback for accounts whose identity provider returned no
/// picture. Seeded by the stable user id.
pub fn avatar_or_fallback(avatar_url: Option<&str>, user_id: uuid::Uuid) -> String {
    match avatar_url {
        Some(url) if url.starts_with("http") => url.to_owned(),
        _ => format!("https://api.dicebear.com/7.x/avataaars/svg?seed={user_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_avatar_kicks_in_for_missing_or_bogus_urls() {
        let id = uuid::Uuid::new_v4();
        assert!(avatar_or_fallback(None, id).contains("dicebear"));
        assert!(avatar_or_fallback(Some("javascript:alert(1)"), id).contains("dicebear"));
        assert_eq!(
            avatar_or_fallback(Some("https://lh3.example/pic.png"), id),
            "https://lh3.example/pic.png"
        );
    }
}

use roastmytaste_app::infrastructure::spotify::SpotifyTokens;
use tower_sessions::Session;
use uuid::Uuid;

pub const USER_ID_KEY: &str = "user_id";
pub const USER_NAME_KEY: &str = "user_name";
pub const SPOTIFY_TOKENS_KEY: &str = "spotify_tokens";
pub const SPOTIFY_AUTHENTICATED_KEY: &str = "spotify_authenticated";
pub const MY_ROAST_IDS_KEY: &str = "my_roast_ids";
pub const OAUTH_CSRF_KEY: &str = "oauth_csrf";
pub const OAUTH_PKCE_KEY: &str = "oauth_pkce";
pub const POST_AUTH_REDIRECT_KEY: &str = "post_auth_redirect";

/// Upper bound on the session-held "my roasts" id list.
pub const MY_ROASTS_CAP: usize = 20;

pub async fn user_id(session: &Session) -> Option<Uuid> {
    session.get(USER_ID_KEY).await.ok().flatten()
}

pub async fn user_name(session: &Session) -> Option<String> {
    session.get(USER_NAME_KEY).await.ok().flatten()
}

pub async fn spotify_tokens(session: &Session) -> Option<SpotifyTokens> {
    session.get(SPOTIFY_TOKENS_KEY).await.ok().flatten()
}

pub async fn forget_spotify_tokens(session: &Session) {
    let _ = session.remove::<SpotifyTokens>(SPOTIFY_TOKENS_KEY).await;
}

pub async fn my_roast_ids(session: &Session) -> Vec<String> {
    session
        .get(MY_ROAST_IDS_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Track a freshly generated roast in the session. Session store failures are
/// not worth failing the request over.
pub async fn remember_roast(session: &Session, roast_id: &str) {
    let mut ids = my_roast_ids(session).await;
    push_front_unique(&mut ids, roast_id);
    let _ = session.insert(MY_ROAST_IDS_KEY, &ids).await;
}

/// Front-insert with dedupe: a re-generated id moves to the front instead of
/// appearing twice, and the list never grows past the cap.
pub fn push_front_unique(ids: &mut Vec<String>, id: &str) {
    ids.retain(|existing| existing != id);
    ids.insert(0, id.to_owned());
    ids.truncate(MY_ROASTS_CAP);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_go_to_the_front() {
        let mut ids = vec!["b".to_owned(), "c".to_owned()];
        push_front_unique(&mut ids, "a");
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn reinserting_moves_instead_of_duplicating() {
        let mut ids = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        push_front_unique(&mut ids, "b");
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn the_list_never_exceeds_the_cap() {
        let mut ids: Vec<String> = (0..MY_ROASTS_CAP).map(|i| format!("id{i}")).collect();
        push_front_unique(&mut ids, "fresh");
        assert_eq!(ids.len(), MY_ROASTS_CAP);
        assert_eq!(ids.first().map(String::as_str), Some("fresh"));
        assert!(!ids.contains(&format!("id{}", MY_ROASTS_CAP - 1)));
    }
}

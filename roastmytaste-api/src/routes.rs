use crate::session::{
    self, OAUTH_CSRF_KEY, OAUTH_PKCE_KEY, POST_AUTH_REDIRECT_KEY, SPOTIFY_AUTHENTICATED_KEY,
    SPOTIFY_TOKENS_KEY, USER_ID_KEY, USER_NAME_KEY,
};
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use oauth2::PkceCodeVerifier;
use roastmytaste_app::domain::{avatar_or_fallback, RoastInputs, User};
use roastmytaste_app::infrastructure::db::entities::{roast, user};
use roastmytaste_app::AppContext;
use roastmytaste_errors::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use tower_sessions::Session;
use uuid::Uuid;

const FEED_PER_PAGE: u64 = 20;
const HISTORY_LIMIT: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct RoastForm {
    pub valorant_name: Option<String>,
    pub valorant_tag: Option<String>,
    pub valorant_region: Option<String>,
    pub anilist_user: Option<String>,
    pub steam_id: Option<String>,
    pub steam_vanity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub redirect: Option<String>,
}

pub async fn ping() -> Json<Value> {
    Json(json!({"ok": true}))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn auth_status(session: Session) -> Json<Value> {
    let spotify_authenticated: bool = session
        .get(SPOTIFY_AUTHENTICATED_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    let name = session::user_name(&session).await;
    Json(json!({
        "spotify_authenticated": spotify_authenticated,
        "user": {"name": name},
    }))
}

/// The roast orchestration entry point. Rate limit first, then fan out,
/// generate, persist, and update the per-user tracking state.
pub async fn generate_roast(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Json(form): Json<RoastForm>,
) -> Result<Json<Value>, AppError> {
    ctx.rate_limiter
        .check(addr.ip())
        .map_err(|exceeded| AppError::RateLimited {
            wait_secs: exceeded.wait_secs,
        })?;

    let user_id = session::user_id(&session).await;
    let spotify_access = resolve_spotify_access(&ctx, &session).await;
    let spotify_name = if spotify_access.is_some() {
        session::user_name(&session).await
    } else {
        None
    };

    let inputs = RoastInputs {
        valorant_name: form.valorant_name,
        valorant_tag: form.valorant_tag,
        valorant_region: form.valorant_region,
        anilist_user: form.anilist_user,
        steam_id: form.steam_id,
        steam_vanity: form.steam_vanity,
        spotify_name,
    };

    let roast = ctx
        .generate_roast
        .execute(inputs, spotify_access.as_deref(), user_id)
        .await;

    // A roast without a durable record does not count as created.
    let model = ctx.roasts.create(&roast).await.map_err(db_error)?;

    if let Some(user_id) = user_id {
        ctx.recent_roasts
            .record_view(user_id, &model.id)
            .await
            .map_err(db_error)?;
    }

    session::remember_roast(&session, &model.id).await;

    // The access token was only needed for this read; a revoked account must
    // not keep working off a stale session copy.
    session::forget_spotify_tokens(&session).await;

    Ok(Json(json!({
        "id": model.id,
        "sources": model.sources,
        "roast": model.roast_text,
        "raw": model.raw_data,
        "inputs": model.inputs,
        "timestamp": model.created_at.map(|t| t.to_rfc3339()),
    })))
}

pub async fn get_roast(
    State(ctx): State<AppContext>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let model = ctx
        .roasts
        .find_by_id(&id)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;

    if let Some(user_id) = session::user_id(&session).await {
        ctx.recent_roasts
            .record_view(user_id, &model.id)
            .await
            .map_err(db_error)?;
    }

    let author = match model.user_id {
        Some(user_id) => ctx.users.find_by_id(user_id).await.map_err(db_error)?,
        None => None,
    };
    Ok(Json(roast_view(&model, author.as_ref())))
}

pub async fn get_history(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    let Some(user_id) = session::user_id(&session).await else {
        return Ok(Json(json!({"roasts": []})));
    };

    let roasts = ctx
        .recent_roasts
        .list_recent(user_id, HISTORY_LIMIT)
        .await
        .map_err(db_error)?;
    let views = with_authors(&ctx, &roasts).await?;
    Ok(Json(json!({"roasts": views})))
}

pub async fn get_public_roasts(
    State(ctx): State<AppContext>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Value>, AppError> {
    let page = ctx
        .roasts
        .find_public_page(query.page.unwrap_or(1), FEED_PER_PAGE)
        .await
        .map_err(db_error)?;

    let views = with_authors(&ctx, &page.roasts).await?;
    Ok(Json(json!({
        "roasts": views,
        "total": page.meta.total,
        "page": page.meta.page,
        "pages": page.meta.pages,
        "has_next": page.meta.has_next,
        "has_prev": page.meta.has_prev,
        "per_page": page.meta.per_page,
    })))
}

pub async fn get_my_roasts(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    let ids = session::my_roast_ids(&session).await;
    if ids.is_empty() {
        return Ok(Json(json!({"roasts": []})));
    }

    let items = ctx.roasts.find_by_ids(&ids).await.map_err(db_error)?;

    // Session order wins; ids whose roast disappeared are skipped.
    let mut by_id: HashMap<String, roast::Model> =
        items.into_iter().map(|item| (item.id.clone(), item)).collect();
    let ordered: Vec<roast::Model> = ids.iter().filter_map(|id| by_id.remove(id)).collect();

    let views = with_authors(&ctx, &ordered).await?;
    Ok(Json(json!({"roasts": views})))
}

pub async fn google_login(
    State(ctx): State<AppContext>,
    session: Session,
) -> Result<Redirect, AppError> {
    let (url, csrf_token, pkce_verifier) = ctx.google_oauth.auth_url();
    session
        .insert(OAUTH_CSRF_KEY, csrf_token.secret())
        .await
        .map_err(session_error)?;
    session
        .insert(OAUTH_PKCE_KEY, pkce_verifier.secret())
        .await
        .map_err(session_error)?;
    Ok(Redirect::to(&url))
}

pub async fn google_callback(
    State(ctx): State<AppContext>,
    session: Session,
    Query(callback): Query<AuthCallback>,
) -> Result<Redirect, AppError> {
    let code = callback
        .code
        .ok_or_else(|| AppError::OAuth("Missing authorization code".to_owned()))?;

    let stored_state: Option<String> = session.remove(OAUTH_CSRF_KEY).await.ok().flatten();
    if stored_state.is_none() || stored_state != callback.state {
        return Err(AppError::OAuth("State mismatch".to_owned()));
    }
    let verifier: String = session
        .remove(OAUTH_PKCE_KEY)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::OAuth("Missing PKCE verifier".to_owned()))?;

    let info = ctx
        .google_oauth
        .exchange_code(&code, PkceCodeVerifier::new(verifier))
        .await?;

    let user = User::new(info.sub, info.email, info.name, info.picture);
    let model = ctx.users.upsert(&user).await.map_err(db_error)?;

    session
        .insert(USER_ID_KEY, model.id)
        .await
        .map_err(session_error)?;
    session
        .insert(USER_NAME_KEY, &model.name)
        .await
        .map_err(session_error)?;

    Ok(Redirect::to("/"))
}

pub async fn spotify_login(
    State(ctx): State<AppContext>,
    session: Session,
    Query(query): Query<RedirectQuery>,
) -> Result<Redirect, AppError> {
    let (url, csrf_token) = ctx.spotify_oauth.auth_url();
    session
        .insert(OAUTH_CSRF_KEY, csrf_token.secret())
        .await
        .map_err(session_error)?;
    if let Some(target) = query.redirect {
        let _ = session.insert(POST_AUTH_REDIRECT_KEY, target).await;
    }
    Ok(Redirect::to(&url))
}

pub async fn spotify_callback(
    State(ctx): State<AppContext>,
    session: Session,
    Query(callback): Query<AuthCallback>,
) -> Result<Redirect, AppError> {
    if let Some(code) = callback.code {
        let stored_state: Option<String> = session.remove(OAUTH_CSRF_KEY).await.ok().flatten();
        if stored_state.is_none() || stored_state != callback.state {
            return Err(AppError::OAuth("State mismatch".to_owned()));
        }

        let tokens = ctx.spotify_oauth.exchange_code(&code).await?;
        if let Some(name) = ctx
            .spotify_oauth
            .fetch_display_name(&tokens.access_token)
            .await
        {
            let _ = session.insert(USER_NAME_KEY, name).await;
        }
        session
            .insert(SPOTIFY_TOKENS_KEY, &tokens)
            .await
            .map_err(session_error)?;
        session
            .insert(SPOTIFY_AUTHENTICATED_KEY, true)
            .await
            .map_err(session_error)?;
    }

    let target: String = session
        .remove(POST_AUTH_REDIRECT_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| "/".to_owned());
    Ok(Redirect::to(&target))
}

pub async fn spotify_logout(
    session: Session,
    Query(query): Query<RedirectQuery>,
) -> Redirect {
    session::forget_spotify_tokens(&session).await;
    let _ = session.remove::<bool>(SPOTIFY_AUTHENTICATED_KEY).await;
    Redirect::to(query.redirect.as_deref().unwrap_or("/"))
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await.map_err(session_error)?;
    Ok(Redirect::to("/"))
}

/// Session token cache policy: use a live token as-is, refresh an expired one
/// at most once and cache it back, and degrade to "no Spotify" when refresh
/// is impossible or fails.
async fn resolve_spotify_access(ctx: &AppContext, session: &Session) -> Option<String> {
    let tokens = session::spotify_tokens(session).await?;
    if !tokens.is_expired(chrono::Utc::now()) {
        return Some(tokens.access_token);
    }

    let Some(refresh_token) = tokens.refresh_token.as_deref() else {
        session::forget_spotify_tokens(session).await;
        return None;
    };

    match ctx.spotify_oauth.refresh(refresh_token).await {
        Ok(fresh) => {
            let _ = session.insert(SPOTIFY_TOKENS_KEY, &fresh).await;
            Some(fresh.access_token)
        }
        Err(err) => {
            tracing::warn!(%err, "Spotify token refresh failed; dropping the cached tokens");
            session::forget_spotify_tokens(session).await;
            None
        }
    }
}

fn roast_view(model: &roast::Model, author: Option<&user::Model>) -> Value {
    json!({
        "id": model.id,
        "roast": model.roast_text,
        "sources": model.sources,
        "raw": model.raw_data,
        "inputs": model.inputs,
        "timestamp": model.created_at.map(|t| t.to_rfc3339()),
        "user": author.map(|u| json!({
            "id": u.id,
            "email": u.email,
            "name": u.name,
            "picture": avatar_or_fallback(u.avatar_url.as_deref(), u.id),
        })),
        "is_public": model.is_public,
    })
}

/// Resolve the owning users for a batch of roasts with one query.
async fn with_authors(ctx: &AppContext, roasts: &[roast::Model]) -> Result<Vec<Value>, AppError> {
    let author_ids: Vec<Uuid> = roasts
        .iter()
        .filter_map(|r| r.user_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let authors: HashMap<Uuid, user::Model> = ctx
        .users
        .find_by_ids(&author_ids)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(|author| (author.id, author))
        .collect();

    Ok(roasts
        .iter()
        .map(|r| roast_view(r, r.user_id.and_then(|id| authors.get(&id))))
        .collect())
}

fn db_error(err: sea_orm::DbErr) -> AppError {
    AppError::Database(err.to_string())
}

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session error: {err}"))
}

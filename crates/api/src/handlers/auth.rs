//! Handlers for the `/auth` resource (Battle.net login, callback, me, logout).

use axum::extract::{Query, State};
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Json;
use chrono::{Duration, Utc};
use guildbook_core::types::DbId;
use guildbook_db::models::session::CreateSession;
use guildbook_db::repositories::{OAuthStateRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string of the OAuth redirect back from Battle.net.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Response body for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: DbId,
    #[serde(rename = "battleTag")]
    pub battle_tag: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/login
///
/// Store a fresh single-use state and redirect the browser to Battle.net.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Redirect> {
    let oauth_state = Uuid::new_v4().simple().to_string();
    let url = state
        .bnet
        .authorize_url(&redirect_uri(&state, &headers), &oauth_state)?;

    OAuthStateRepo::create(&state.pool, &oauth_state).await?;

    Ok(Redirect::to(&url))
}

/// GET /api/v1/auth/callback
///
/// Redeem the state, exchange the code, upsert the user, open a session,
/// and hand the access token to the browser app in the URL fragment.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> AppResult<Redirect> {
    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    let valid_state = match params.state.as_deref() {
        Some(s) if !s.is_empty() => OAuthStateRepo::consume(&state.pool, s).await?,
        _ => false,
    };
    if !valid_state {
        return Err(AppError::BadRequest("Invalid OAuth state".into()));
    }

    let token = state
        .bnet
        .exchange_code(&code, &redirect_uri(&state, &headers))
        .await?;
    let info = state.bnet.fetch_user_info(&token.access_token).await?;

    let user = UserRepo::upsert_by_battle_net_id(&state.pool, &info.sub, &info.battletag).await?;

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            access_token: token.access_token,
            expires_at: Utc::now() + Duration::days(state.config.jwt.expiry_days),
        },
    )
    .await?;

    let jwt = generate_access_token(user.id, &user.battletag, session.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, session_id = session.id, "User logged in");

    Ok(Redirect::to(&format!(
        "{}/#token={jwt}",
        state.config.frontend_url
    )))
}

/// GET /api/v1/auth/me
pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.user_id,
        battle_tag: user.battle_tag,
    })
}

/// POST /api/v1/auth/logout
///
/// Revoke the session, then revoke the Battle.net token. Provider failures
/// are logged and otherwise ignored.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<SuccessResponse>> {
    let provider_token = SessionRepo::revoke(&state.pool, user.session_id, user.user_id).await?;

    if let Some(token) = provider_token {
        if let Err(e) = state.bnet.revoke_token(&token).await {
            tracing::warn!(user_id = user.user_id, error = %e, "Battle.net token revocation failed");
        }
    }

    tracing::info!(user_id = user.user_id, session_id = user.session_id, "User logged out");
    Ok(Json(SuccessResponse::ok()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The configured redirect URI, or one derived from the request's `Host`.
fn redirect_uri(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(uri) = &state.config.bnet.redirect_uri {
        return uri.clone();
    }
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}/api/v1/auth/callback")
}

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing, Json, Router};
use chrono::{Duration, Utc};
use guildbook_bnet::BnetConfig;
use guildbook_core::types::DbId;
use guildbook_db::models::session::CreateSession;
use guildbook_db::models::user::User;
use guildbook_db::repositories::{SessionRepo, UserRepo};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use guildbook_api::auth::jwt::{generate_access_token, JwtConfig};
use guildbook_api::config::ServerConfig;
use guildbook_api::router::build_app_router;
use guildbook_api::state::AppState;

/// Provider bearer token stored on sessions created by [`login_as`] and
/// accepted by [`spawn_fake_bnet`].
pub const PROVIDER_TOKEN: &str = "bnet-access";

/// Build a test `ServerConfig` with safe defaults.
///
/// Battle.net credentials are unset, so login reports "not configured"
/// unless a test supplies them.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        frontend_url: "http://localhost:5173".to_string(),
        guild_name: "Red Sun".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 7,
        },
        bnet: BnetConfig::default(),
    }
}

/// Config whose Battle.net endpoints point at a fake server.
pub fn config_with_bnet(base_url: &str) -> ServerConfig {
    let mut config = test_config();
    config.bnet = BnetConfig {
        client_id: Some("client-id".to_string()),
        client_secret: Some("client-secret".to_string()),
        redirect_uri: None,
        oauth_url: base_url.to_string(),
        api_url: base_url.to_string(),
        namespace: "profile-classic1x-us".to_string(),
    };
    config
}

/// Build the production router around `pool` with [`test_config`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Create a user with an active session and return it with a bearer token.
pub async fn login_as(pool: &PgPool, battle_net_id: &str, battletag: &str) -> (User, String) {
    let user = UserRepo::upsert_by_battle_net_id(pool, battle_net_id, battletag)
        .await
        .expect("user upsert should succeed");
    let session = SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            access_token: PROVIDER_TOKEN.to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .expect("session creation should succeed");
    let token = generate_access_token(user.id, &user.battletag, session.id, &test_config().jwt)
        .expect("token generation should succeed");
    (user, token)
}

/// Insert an active recipe into the named profession's catalog.
pub async fn insert_recipe(pool: &PgPool, profession: &str, name: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO recipes (profession_id, name, source)
         SELECT id, $2, 'trainer' FROM professions WHERE name = $1
         RETURNING id",
    )
    .bind(profession)
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("recipe insert should succeed")
}

pub async fn profession_id(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("SELECT id FROM professions WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("profession should exist")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Fake Battle.net
// ---------------------------------------------------------------------------

/// Serve a minimal Battle.net stand-in on a random local port and return its
/// base URL.
///
/// The account has `Avarrai` and `Alt` on Dreamscythe and `Zug` on Mograine.
/// The `red-sun` roster lists `Avarrai` on Dreamscythe and nobody on
/// Mograine; any other guild or realm is a 404.
pub async fn spawn_fake_bnet() -> String {
    let app = Router::new()
        .route(
            "/token",
            routing::post(|| async {
                Json(json!({
                    "access_token": PROVIDER_TOKEN,
                    "token_type": "bearer",
                    "expires_in": 86400
                }))
            }),
        )
        .route(
            "/userinfo",
            routing::get(|| async { Json(json!({ "sub": "777", "battletag": "Player#1234" })) }),
        )
        .route("/revoke", routing::post(|| async { StatusCode::OK }))
        .route(
            "/profile/user/wow",
            routing::get(|| async {
                Json(json!({
                    "wow_accounts": [{
                        "characters": [
                            { "name": "Avarrai", "realm": { "slug": "dreamscythe", "name": "Dreamscythe" } },
                            { "name": "Alt", "realm": { "slug": "dreamscythe", "name": "Dreamscythe" } },
                            { "name": "Zug", "realm": { "slug": "mograine", "name": "Mograine" } }
                        ]
                    }]
                }))
            }),
        )
        .route("/data/wow/guild/{realm}/{guild}/roster", routing::get(fake_roster));

    serve(app).await
}

/// Serve a Battle.net stand-in whose every endpoint fails with 500.
pub async fn spawn_failing_bnet() -> String {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server error");
    });
    format!("http://{addr}")
}

async fn fake_roster(Path((realm, guild)): Path<(String, String)>) -> Response {
    match (realm.as_str(), guild.as_str()) {
        ("dreamscythe", "red-sun") => Json(json!({
            "members": [
                { "character": { "name": "Avarrai", "realm": { "name": "Dreamscythe" } } }
            ]
        }))
        .into_response(),
        ("mograine", "red-sun") => Json(json!({ "members": [] })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

//! HTTP-level tests for character CRUD and the guild import list.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_characters(pool: PgPool) {
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let alchemy = common::profession_id(&pool, "Alchemy").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/characters",
        json!({ "name": "  Avarrai ", "realm": "Dreamscythe", "profession_id": alchemy }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Avarrai");
    assert_eq!(created["profession_id"], alchemy);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/characters",
        json!({ "name": "Zug", "realm": "Mograine" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let list = body_json(get_auth(app, "/api/v1/characters", &token).await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Avarrai");
    assert_eq!(list[0]["profession_name"], "Alchemy");
    assert_eq!(list[1]["name"], "Zug");
    assert!(list[1]["profession_name"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_name_and_realm(pool: PgPool) {
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/characters",
        json!({ "name": "   ", "realm": "Dreamscythe" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "name and realm are required");

    let response = post_json_auth(
        app,
        "/api/v1/characters",
        json!({ "name": "Avarrai" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_character_is_409(pool: PgPool) {
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let alchemy = common::profession_id(&pool, "Alchemy").await;
    let app = common::build_test_app(pool);
    let body = json!({ "name": "Avarrai", "realm": "Dreamscythe", "profession_id": alchemy });

    let first = post_json_auth(app.clone(), "/api/v1/characters", body, &token).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        app,
        "/api/v1/characters",
        json!({ "name": "avarrai", "realm": "DREAMSCYTHE", "profession_id": alchemy }),
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(
        json["error"],
        "avarrai on DREAMSCYTHE is already tracked for this profession"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_owner_scoped(pool: PgPool) {
    let (_owner, owner_token) = common::login_as(&pool, "1", "Owner#1").await;
    let (_other, other_token) = common::login_as(&pool, "2", "Other#2").await;
    let app = common::build_test_app(pool);

    let created = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/characters",
            json!({ "name": "Avarrai", "realm": "Dreamscythe" }),
            &owner_token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/characters/{}", created["id"]);

    let response = delete_auth(app.clone(), &uri, &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let response = delete_auth(app, &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_characters_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/characters").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Guild import list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_list_filters_by_guild(pool: PgPool) {
    let bnet = common::spawn_fake_bnet().await;
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let app = common::build_test_app_with(pool, common::config_with_bnet(&bnet));

    let response = get_auth(app, "/api/v1/characters/import", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{ "name": "Avarrai", "realm": "Dreamscythe" }])
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_list_for_unknown_guild_is_empty(pool: PgPool) {
    let bnet = common::spawn_fake_bnet().await;
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let mut config = common::config_with_bnet(&bnet);
    config.guild_name = "No Such Guild".to_string();
    let app = common::build_test_app_with(pool, config);

    let response = get_auth(app, "/api/v1/characters/import", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_import_list_degrades_on_provider_failure(pool: PgPool) {
    let bnet = common::spawn_failing_bnet().await;
    let (_user, token) = common::login_as(&pool, "1", "One#1").await;
    let app = common::build_test_app_with(pool, common::config_with_bnet(&bnet));

    let response = get_auth(app, "/api/v1/characters/import", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

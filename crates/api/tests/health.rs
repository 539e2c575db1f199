mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("x-request-id"),
        "request id must be propagated to the response"
    );

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
    assert_eq!(json["guild"], "Red Sun");
    assert_eq!(json["catalog_recipes"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_counts_only_active_recipes(pool: PgPool) {
    common::insert_recipe(&pool, "Alchemy", "Haste Potion").await;
    let retired = common::insert_recipe(&pool, "Alchemy", "Old Potion").await;
    common::insert_recipe(&pool, "Tailoring", "Bolt of Runecloth").await;
    sqlx::query("UPDATE recipes SET deleted_at = NOW() WHERE id = $1")
        .bind(retired)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["catalog_recipes"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_professions_are_public(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/professions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 8);
    assert_eq!(names[0], "Alchemy");
    assert!(json[0]["icon_url"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

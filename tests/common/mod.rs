#![allow(dead_code)]

use shortqr::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_link(pool: &PgPool, code: &str, target: &str) -> i64 {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO links (code, target_url) VALUES ($1, $2) RETURNING id")
            .bind(code)
            .bind(target)
            .fetch_one(pool)
            .await
            .unwrap();

    id
}

pub async fn create_test_link_with_artifact(
    pool: &PgPool,
    code: &str,
    target: &str,
    artifact: &str,
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO links (code, target_url, qr_artifact) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(code)
    .bind(target)
    .bind(artifact)
    .fetch_one(pool)
    .await
    .unwrap();

    id
}

pub async fn click_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn qr_artifact(pool: &PgPool, code: &str) -> Option<String> {
    sqlx::query_scalar("SELECT qr_artifact FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), String::new())
}

pub fn create_test_state_with_base(pool: PgPool, base: &str) -> AppState {
    AppState::new(Arc::new(pool), base.to_string())
}

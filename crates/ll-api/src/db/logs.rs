//! Log content queries.

use sqlx::PgPool;

/// Check if a log exists without loading its content.
pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM logs WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Get the raw content of a log.
pub async fn get_content(pool: &PgPool, id: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT content FROM logs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

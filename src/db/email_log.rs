use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{EmailLog, EmailLogFilter, NewEmailLog};

pub async fn create(pool: &PgPool, entry: &NewEmailLog) -> Result<Uuid, sqlx::Error> {
    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO email_log
            (id, sender_email, sender_name, question, email_html, email_text,
             provider_message_id, status, error_message)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
    )
    .bind(Uuid::now_v7())
    .bind(&entry.sender_email)
    .bind(&entry.sender_name)
    .bind(&entry.question)
    .bind(&entry.email_content.html)
    .bind(&entry.email_content.text)
    .bind(&entry.provider_message_id)
    .bind(entry.status.as_str())
    .bind(&entry.error_message)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Newest first.
pub async fn list(
    pool: &PgPool,
    filter: &EmailLogFilter,
    limit: i64,
) -> Result<Vec<EmailLog>, sqlx::Error> {
    sqlx::query_as::<_, EmailLog>(
        "SELECT * FROM email_log
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::text IS NULL OR sender_email = $2)
         ORDER BY created_at DESC, id DESC LIMIT $3",
    )
    .bind(filter.status.map(|s| s.as_str()))
    .bind(&filter.sender_email)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, filter: &EmailLogFilter) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM email_log
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::text IS NULL OR sender_email = $2)",
    )
    .bind(filter.status.map(|s| s.as_str()))
    .bind(&filter.sender_email)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn distinct_senders(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT DISTINCT sender_email FROM email_log")
        .fetch_all(pool)
        .await
}

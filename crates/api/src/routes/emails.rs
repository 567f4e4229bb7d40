use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use funnel_core::events::FunnelEvent;
use funnel_core::id;
use funnel_core::lead::{is_valid_email, LeadSource, Subscriber};

use crate::config::LeadUniqueness;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/emails", get(list_emails).post(create_email))
        .route("/emails/{id}", delete(delete_email))
}

const EMAIL_UNIQUE_INDEX: &str = "emails_email_unique";

/// Align the schema with the configured dedup policy at startup. The
/// unique index is what actually serializes concurrent submits of the
/// same address; an application-level check would race.
pub async fn enforce_uniqueness(pool: &PgPool, policy: LeadUniqueness) -> Result<(), sqlx::Error> {
    sqlx::query(uniqueness_index_sql(policy)).execute(pool).await?;
    Ok(())
}

fn uniqueness_index_sql(policy: LeadUniqueness) -> &'static str {
    match policy {
        LeadUniqueness::ByEmail => {
            "CREATE UNIQUE INDEX IF NOT EXISTS emails_email_unique ON emails (email)"
        }
        // Reverting to the legacy policy must also lift the constraint,
        // or the flag would be a no-op.
        LeadUniqueness::ById => "DROP INDEX IF EXISTS emails_email_unique",
    }
}

/// Newest-first subscriber list, capped at 1000.
async fn list_emails(State(state): State<AppState>) -> ApiResult<Json<Vec<Subscriber>>> {
    let rows: Vec<(String, String, String, DateTime<Utc>, Option<Value>)> = sqlx::query_as(
        "SELECT id, email, source, timestamp, quiz_answers FROM emails \
         ORDER BY created_at DESC LIMIT 1000",
    )
    .fetch_all(state.pool())
    .await?;

    let mut subscribers = Vec::with_capacity(rows.len());
    for (id, email, source, timestamp, quiz_answers) in rows {
        let Some(source) = LeadSource::parse(&source) else {
            tracing::warn!(%id, %source, "skipping subscriber with unknown source");
            continue;
        };
        let quiz_answers = quiz_answers.and_then(|value| match serde_json::from_value(value) {
            Ok(answers) => Some(answers),
            Err(err) => {
                tracing::warn!(%id, %err, "dropping undecodable quiz answers");
                None
            }
        });
        subscribers.push(Subscriber {
            id,
            email,
            source,
            timestamp,
            quiz_answers,
        });
    }

    Ok(Json(subscribers))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEmailRequest {
    id: Option<String>,
    email: String,
    source: LeadSource,
    timestamp: Option<DateTime<Utc>>,
    quiz_answers: Option<Vec<u32>>,
}

async fn create_email(
    State(state): State<AppState>,
    Json(req): Json<CreateEmailRequest>,
) -> ApiResult<Json<Value>> {
    let email = req.email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    let id = req.id.unwrap_or_else(|| id::generate(Utc::now()));
    let timestamp = req.timestamp.unwrap_or_else(Utc::now);

    let quiz_answers = req
        .quiz_answers
        .map(|answers| serde_json::to_value(answers).expect("integer list serializes"));

    let result = sqlx::query(
        "INSERT INTO emails (id, email, source, timestamp, quiz_answers) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&id)
    .bind(&email)
    .bind(req.source.as_str())
    .bind(timestamp)
    .bind(quiz_answers)
    .execute(state.pool())
    .await;

    if let Err(err) = result {
        // Both uniqueness failures land here; the constraint name tells
        // an email-level conflict (unique-by-email policy) apart from an
        // id collision on the PRIMARY KEY.
        match unique_violation(&err) {
            Some(constraint) if constraint == EMAIL_UNIQUE_INDEX => {
                return Err(ApiError::Conflict("Email already exists".to_string()));
            }
            Some(_) => {
                return Err(ApiError::Conflict(format!("Record already exists: {id}")));
            }
            None => return Err(err.into()),
        }
    }

    let _ = state.event_bus().publish(FunnelEvent::LeadCaptured {
        id: id.clone(),
        source: req.source.as_str().to_string(),
        timestamp,
    });

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Email saved successfully",
    })))
}

async fn delete_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let result = sqlx::query("DELETE FROM emails WHERE id = $1")
        .bind(&id)
        .execute(state.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Email not found".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Email deleted successfully",
    })))
}

fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Some(db.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

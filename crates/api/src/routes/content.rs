use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use funnel_core::content::{Section, SiteContent};
use funnel_core::events::FunnelEvent;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/content", get(get_content).post(save_content))
}

/// Full-document fetch. Rows are decoded per section; sections that are
/// missing from the table (or fail to decode) come back as defaults so
/// the response is always a total document.
async fn get_content(State(state): State<AppState>) -> ApiResult<Json<SiteContent>> {
    let rows: Vec<(String, Value)> = sqlx::query_as("SELECT section, content FROM site_content")
        .fetch_all(state.pool())
        .await?;

    let mut sections = BTreeMap::new();
    for (name, content) in rows {
        match name.parse::<Section>() {
            Ok(section) => {
                sections.insert(section, content);
            }
            Err(_) => {
                tracing::warn!(section = %name, "ignoring unknown section row");
            }
        }
    }

    Ok(Json(SiteContent::from_sections(sections)))
}

#[derive(Debug, Deserialize)]
struct SaveContentRequest {
    section: String,
    content: Value,
}

/// Single-section upsert keyed by the section name: repeated pushes of
/// the same section are idempotent replacement, last writer wins.
async fn save_content(
    State(state): State<AppState>,
    Json(req): Json<SaveContentRequest>,
) -> ApiResult<Json<Value>> {
    let section: Section = req
        .section
        .parse()
        .map_err(|err: funnel_core::error::EditError| ApiError::BadRequest(err.to_string()))?;

    sqlx::query(
        "INSERT INTO site_content (section, content) VALUES ($1, $2) \
         ON CONFLICT (section) DO UPDATE SET content = EXCLUDED.content",
    )
    .bind(section.as_str())
    .bind(&req.content)
    .execute(state.pool())
    .await?;

    let _ = state.event_bus().publish(FunnelEvent::ContentSaved {
        section: section.as_str().to_string(),
        timestamp: Utc::now(),
    });

    Ok(Json(json!({
        "success": true,
        "message": "Content saved successfully",
    })))
}

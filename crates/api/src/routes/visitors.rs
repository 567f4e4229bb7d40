use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use funnel_core::events::FunnelEvent;
use funnel_core::id;
use funnel_core::visitor::{Visitor, DIRECT_REFERRER};

use crate::error::ApiResult;
use crate::routes::client_ip;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/visitors", get(list_visitors).post(create_visitor))
}

/// Newest-first visit log, capped at 1000. The table itself retains
/// unbounded history.
async fn list_visitors(State(state): State<AppState>) -> ApiResult<Json<Vec<Visitor>>> {
    let rows: Vec<(String, DateTime<Utc>, String, String, String, String)> = sqlx::query_as(
        "SELECT id, timestamp, user_agent, referrer, page, ip_address FROM visitors \
         ORDER BY created_at DESC LIMIT 1000",
    )
    .fetch_all(state.pool())
    .await?;

    let visitors = rows
        .into_iter()
        .map(
            |(id, timestamp, user_agent, referrer, page, ip_address)| Visitor {
                id,
                timestamp,
                user_agent,
                referrer,
                page,
                ip_address,
            },
        )
        .collect();

    Ok(Json(visitors))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateVisitorRequest {
    id: Option<String>,
    timestamp: DateTime<Utc>,
    user_agent: Option<String>,
    referrer: Option<String>,
    page: String,
}

/// Append one visit. The IP address is server-assigned; whatever the
/// client sends for it is ignored.
async fn create_visitor(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<CreateVisitorRequest>,
) -> ApiResult<Json<Value>> {
    let id = req.id.unwrap_or_else(|| id::generate(Utc::now()));
    let referrer = req
        .referrer
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DIRECT_REFERRER.to_string());
    let ip_address = client_ip(&headers, peer);

    sqlx::query(
        "INSERT INTO visitors (id, timestamp, user_agent, referrer, page, ip_address) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&id)
    .bind(req.timestamp)
    .bind(req.user_agent.unwrap_or_default())
    .bind(&referrer)
    .bind(&req.page)
    .bind(&ip_address)
    .execute(state.pool())
    .await?;

    let _ = state.event_bus().publish(FunnelEvent::VisitorRecorded {
        id: id.clone(),
        page: req.page,
        timestamp: req.timestamp,
    });

    Ok(Json(json!({
        "success": true,
        "id": id,
        "message": "Visitor saved successfully",
    })))
}

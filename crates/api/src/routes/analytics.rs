use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::routes::client_ip;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics", get(get_analytics).post(track_event))
}

#[derive(Debug, Serialize)]
struct EmailStat {
    source: String,
    count: i64,
    date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VisitorStat {
    date: NaiveDate,
    count: i64,
    unique_visitors: i64,
}

#[derive(Debug, Serialize)]
struct PageStat {
    page: String,
    visits: i64,
}

#[derive(Debug, Serialize)]
struct ReferrerStat {
    referrer: String,
    count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsSummary {
    emails: Vec<EmailStat>,
    visitors: Vec<VisitorStat>,
    top_pages: Vec<PageStat>,
    referrers: Vec<ReferrerStat>,
}

/// Rolling aggregates for the admin dashboard: 30-day capture and
/// visit counts grouped by day, plus 7-day top pages and referrers.
async fn get_analytics(State(state): State<AppState>) -> ApiResult<Json<AnalyticsSummary>> {
    let emails: Vec<(String, i64, NaiveDate)> = sqlx::query_as(
        "SELECT source, COUNT(*) AS count, created_at::date AS date FROM emails \
         WHERE created_at >= NOW() - INTERVAL '30 days' \
         GROUP BY source, created_at::date ORDER BY date DESC",
    )
    .fetch_all(state.pool())
    .await?;

    let visitors: Vec<(NaiveDate, i64, i64)> = sqlx::query_as(
        "SELECT created_at::date AS date, COUNT(*) AS count, \
                COUNT(DISTINCT ip_address) AS unique_visitors \
         FROM visitors WHERE created_at >= NOW() - INTERVAL '30 days' \
         GROUP BY created_at::date ORDER BY date DESC",
    )
    .fetch_all(state.pool())
    .await?;

    let top_pages: Vec<(String, i64)> = sqlx::query_as(
        "SELECT page, COUNT(*) AS visits FROM visitors \
         WHERE created_at >= NOW() - INTERVAL '7 days' \
         GROUP BY page ORDER BY visits DESC LIMIT 10",
    )
    .fetch_all(state.pool())
    .await?;

    let referrers: Vec<(String, i64)> = sqlx::query_as(
        "SELECT referrer, COUNT(*) AS count FROM visitors \
         WHERE created_at >= NOW() - INTERVAL '7 days' AND referrer <> 'Direct' \
         GROUP BY referrer ORDER BY count DESC LIMIT 10",
    )
    .fetch_all(state.pool())
    .await?;

    Ok(Json(AnalyticsSummary {
        emails: emails
            .into_iter()
            .map(|(source, count, date)| EmailStat { source, count, date })
            .collect(),
        visitors: visitors
            .into_iter()
            .map(|(date, count, unique_visitors)| VisitorStat {
                date,
                count,
                unique_visitors,
            })
            .collect(),
        top_pages: top_pages
            .into_iter()
            .map(|(page, visits)| PageStat { page, visits })
            .collect(),
        referrers: referrers
            .into_iter()
            .map(|(referrer, count)| ReferrerStat { referrer, count })
            .collect(),
    }))
}

/// Raw event write. Field names are snake_case on this endpoint, the
/// shape the tracking snippets already send.
#[derive(Debug, Deserialize)]
struct TrackEventRequest {
    event_type: String,
    event_data: Option<Value>,
    session_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

async fn track_event(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<TrackEventRequest>,
) -> ApiResult<Json<Value>> {
    let session_id = req
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let timestamp = req.timestamp.unwrap_or_else(Utc::now);
    let ip_address = client_ip(&headers, peer);

    sqlx::query(
        "INSERT INTO analytics (event_type, event_data, session_id, ip_address, timestamp) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&req.event_type)
    .bind(req.event_data)
    .bind(&session_id)
    .bind(&ip_address)
    .bind(timestamp)
    .execute(state.pool())
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Analytics saved successfully",
    })))
}

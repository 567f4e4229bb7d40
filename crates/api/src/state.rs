use std::sync::Arc;

use funnel_core::events::EventBus;
use sqlx::PgPool;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    event_bus: EventBus,
}

impl AppState {
    pub fn new(pool: PgPool, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(InnerState { pool, event_bus }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }
}

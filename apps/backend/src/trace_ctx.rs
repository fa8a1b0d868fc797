//! Task-local trace id for the request being served.
//!
//! `RequestTrace` scopes each request's future with its id, so error
//! rendering and DB error mapping can tag output without threading the id
//! through every call.

use std::fmt;

use tokio::task_local;
use uuid::Uuid;

const UNKNOWN: &str = "unknown";

/// Request-scoped trace identifier, also stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TraceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

task_local! {
    static CURRENT: TraceId;
}

/// Trace id of the current task, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    CURRENT
        .try_with(|id| id.0.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `id` as the current trace id.
pub async fn with_trace_id<F, R>(id: TraceId, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    CURRENT.scope(id, future).await
}

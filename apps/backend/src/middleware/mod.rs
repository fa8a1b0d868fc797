//! Request middleware.
//!
//! Wire as `.wrap(StructuredLogger).wrap(TraceSpan).wrap(RequestTrace)`: the
//! last `wrap` runs first, so the trace id exists before the others read it.

pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

use actix_web::dev::ServiceRequest;
use actix_web::HttpMessage;

pub use request_trace::RequestTrace;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;

use crate::trace_ctx::TraceId;

/// Trace id stored by `RequestTrace`, if it has run.
fn request_trace_id(req: &ServiceRequest) -> Option<String> {
    req.extensions().get::<TraceId>().map(ToString::to_string)
}

//! HTTP middleware. Registration order in `main` matters: `RequestTrace` is
//! wrapped last so it runs first and the others can read its `TraceId`.

pub mod cors;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;

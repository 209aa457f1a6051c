//! OpenTelemetry instrumentation for a GraphQL execution engine.
//!
//! [`Tracer`] registers as an [`EngineExtension`](otelgql_engine_api::EngineExtension)
//! and emits one server span per operation (back-dated to the request start
//! when known), zero-cost child spans for the parse/read/validate phases,
//! and one span per resolver field, all annotated with argument, directive,
//! variable, persisted-query, and complexity attributes. Execution errors
//! become `exception` events and an error status; the instrumentation never
//! alters the response it wraps.
//!
//! ```no_run
//! use otelgql_tracer::{Tracer, TracerOptions};
//!
//! let tracer = Tracer::new(
//!     TracerOptions::new().with_struct_field_tracing(false),
//! );
//! // hand `tracer` to the engine as a boxed extension
//! ```

pub mod attributes;
mod config;
mod errors;
mod tracer;

pub use config::{TracerOptions, DEFAULT_COMPLEXITY_EXTENSION_NAME};
pub use errors::ErrorFilter;
pub use tracer::{Tracer, EXTENSION_NAME};

pub use otelgql_engine_api as engine_api;

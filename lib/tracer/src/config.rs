use std::sync::Arc;

use otelgql_engine_api::GraphQLError;

use crate::errors::ErrorFilter;

/// Extension name the complexity statistics are published under when the
/// caller does not configure one.
pub const DEFAULT_COMPLEXITY_EXTENSION_NAME: &str = "ComplexityLimit";

/// Options for [`Tracer`](crate::Tracer) construction. Everything defaults
/// to a sensible value; an empty complexity extension name silently falls
/// back to [`DEFAULT_COMPLEXITY_EXTENSION_NAME`].
#[derive(Clone, Default)]
pub struct TracerOptions {
    pub(crate) complexity_extension_name: Option<String>,
    pub(crate) trace_struct_fields: bool,
    pub(crate) error_filter: Option<ErrorFilter>,
}

impl TracerOptions {
    pub fn new() -> Self {
        TracerOptions::default()
    }

    /// Look up complexity statistics under the given extension name instead
    /// of the default.
    pub fn with_complexity_extension_name(mut self, name: impl Into<String>) -> Self {
        self.complexity_extension_name = Some(name.into());
        self
    }

    /// Also create spans for plain data fields (neither methods nor
    /// registered resolvers). Off by default: data fields vastly outnumber
    /// resolver fields in most responses.
    pub fn with_struct_field_tracing(mut self, enabled: bool) -> Self {
        self.trace_struct_fields = enabled;
        self
    }

    /// Report only errors the predicate selects. The response is never
    /// affected; unselected errors are simply not recorded as events.
    pub fn with_error_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&GraphQLError) -> bool + Send + Sync + 'static,
    {
        self.error_filter = Some(Arc::new(filter));
        self
    }
}

/// Options resolved against their defaults, immutable for the lifetime of
/// the tracer that holds them.
pub(crate) struct ResolvedConfig {
    pub(crate) complexity_extension_name: String,
    pub(crate) trace_struct_fields: bool,
    pub(crate) error_filter: ErrorFilter,
}

impl From<TracerOptions> for ResolvedConfig {
    fn from(options: TracerOptions) -> Self {
        ResolvedConfig {
            complexity_extension_name: options
                .complexity_extension_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLEXITY_EXTENSION_NAME.to_owned()),
            trace_struct_fields: options.trace_struct_fields,
            error_filter: options.error_filter.unwrap_or_else(|| Arc::new(|_| true)),
        }
    }
}

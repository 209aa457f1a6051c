use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::trace::{
    Span, SpanKind, TraceContextExt, Tracer as OtelTracer, TracerProvider as OtelTracerProvider,
};
use opentelemetry::{Context, InstrumentationScope, KeyValue};
use otelgql_engine_api::{
    ApqStats, ComplexityStats, EngineExtension, FieldContext, FieldResolver, OperationContext,
    OperationStats, ResolvedField, Response, ResponseHandler, APQ_STATS_KEY,
};

use crate::attributes::{
    field_attributes, KEY_APQ_HASH, KEY_APQ_SENT_QUERY, KEY_COMPLEXITY_CALCULATED,
    KEY_COMPLEXITY_LIMIT, KEY_RESOLVER_IS_METHOD, KEY_RESOLVER_IS_RESOLVER, KEY_RESOLVER_PATH,
    VARIABLES_PREFIX,
};
use crate::config::{ResolvedConfig, TracerOptions};
use crate::errors::record_graphql_errors;

/// Name this extension registers under with the engine.
pub const EXTENSION_NAME: &str = "OpenTelemetryTracer";

/// Span name used when no operation could be parsed at all.
const ANONYMOUS_OPERATION: &str = "anonymous-op";

const INSTRUMENTATION_NAME: &str = "otelgql-tracer";

fn instrumentation_scope() -> InstrumentationScope {
    InstrumentationScope::builder(INSTRUMENTATION_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .build()
}

/// The engine extension that turns operation and field interceptions into
/// OpenTelemetry spans.
///
/// Holds only the resolved configuration and a tracer handle; both
/// interception slots borrow everything else per call, so one `Tracer` value
/// serves any number of concurrent operations and field resolutions.
pub struct Tracer<T = BoxedTracer> {
    tracer: T,
    config: ResolvedConfig,
}

impl Tracer<BoxedTracer> {
    /// Build against the process-global tracer provider.
    pub fn new(options: TracerOptions) -> Self {
        let tracer = global::tracer_provider().tracer_with_scope(instrumentation_scope());
        Tracer::with_tracer(tracer, options)
    }
}

impl<T> Tracer<T>
where
    T: OtelTracer,
{
    /// Build against a caller-supplied tracer provider.
    pub fn from_provider<P>(provider: &P, options: TracerOptions) -> Self
    where
        P: OtelTracerProvider<Tracer = T>,
    {
        Tracer::with_tracer(provider.tracer_with_scope(instrumentation_scope()), options)
    }

    fn with_tracer(tracer: T, options: TracerOptions) -> Self {
        let config = ResolvedConfig::from(options);
        tracing::debug!(
            extension = EXTENSION_NAME,
            complexity_extension = %config.complexity_extension_name,
            trace_struct_fields = config.trace_struct_fields,
            "initialized GraphQL tracing extension"
        );
        Tracer { tracer, config }
    }

    /// Child spans for the parse/read/validate phases: already-measured
    /// intervals, so each one starts and ends at its recorded timestamps.
    fn capture_operation_timings(&self, cx: &Context, stats: &OperationStats) {
        for (name, timing) in [
            ("parsing", &stats.parsing),
            ("read", &stats.read),
            ("validation", &stats.validation),
        ] {
            let mut span = self
                .tracer
                .span_builder(name)
                .with_kind(SpanKind::Server)
                .with_start_time(timing.start)
                .start_with_context(&self.tracer, cx);
            span.end_with_timestamp(timing.end);
        }
    }

    fn operation_attributes(&self, operation: &OperationContext) -> Vec<KeyValue> {
        let mut attrs = Vec::with_capacity(operation.variables.len() + 4);
        for (name, value) in &operation.variables {
            attrs.push(KeyValue::new(
                VARIABLES_PREFIX.with([name.as_str()]).encode(),
                render_variable(value),
            ));
        }
        if let Some(apq) = operation.stats.extensions.get::<ApqStats>(APQ_STATS_KEY) {
            attrs.push(KeyValue::new(KEY_APQ_HASH, apq.hash.clone()));
            attrs.push(KeyValue::new(KEY_APQ_SENT_QUERY, apq.sent_query));
        }
        if let Some(complexity) = operation
            .stats
            .extensions
            .get::<ComplexityStats>(&self.config.complexity_extension_name)
        {
            attrs.push(KeyValue::new(KEY_COMPLEXITY_LIMIT, complexity.limit));
            attrs.push(KeyValue::new(KEY_COMPLEXITY_CALCULATED, complexity.calculated));
        }
        attrs
    }
}

#[async_trait::async_trait]
impl<T> EngineExtension for Tracer<T>
where
    T: OtelTracer + Send + Sync + 'static,
    T::Span: Send + Sync + 'static,
{
    fn extension_name(&self) -> &'static str {
        EXTENSION_NAME
    }

    async fn intercept_response<'exec>(
        &'exec self,
        cx: Context,
        operation: &'exec OperationContext,
        next: ResponseHandler<'exec>,
    ) -> Response {
        let mut builder = self
            .tracer
            .span_builder(operation_span_name(operation))
            .with_kind(SpanKind::Server);
        if let Some(start) = operation.stats.operation_start {
            // Back-date to cover the whole request, not just this call.
            builder = builder.with_start_time(start);
        }
        let caller_span_id = cx.span().span_context().span_id();
        let caller_span_valid = cx.span().span_context().is_valid();

        let span = builder.start_with_context(&self.tracer, &cx);
        let op_cx = cx.with_span(span);
        if !op_cx.span().is_recording() {
            let response = next(op_cx.clone()).await;
            op_cx.span().end();
            return response;
        }

        self.capture_operation_timings(&op_cx, &operation.stats);
        op_cx.span().set_attributes(self.operation_attributes(operation));

        let response = next(op_cx.clone()).await;
        if !response.errors.is_empty() {
            record_graphql_errors(&op_cx.span(), &response.errors, &self.config.error_filter);
            // Reflect the failure on a caller-supplied enclosing span too.
            if caller_span_valid && caller_span_id != op_cx.span().span_context().span_id() {
                record_graphql_errors(&cx.span(), &response.errors, &self.config.error_filter);
            }
        }
        op_cx.span().end();
        response
    }

    async fn intercept_field<'exec>(
        &'exec self,
        cx: Context,
        field: &'exec FieldContext,
        next: FieldResolver<'exec>,
    ) -> ResolvedField {
        if !field.is_method && !field.is_resolver && !self.config.trace_struct_fields {
            return next(cx).await;
        }

        let span = self
            .tracer
            .span_builder(field_span_name(field))
            .with_kind(SpanKind::Server)
            .start_with_context(&self.tracer, &cx);
        let field_cx = cx.with_span(span);
        if !field_cx.span().is_recording() {
            let resolved = next(field_cx.clone()).await;
            field_cx.span().end();
            return resolved;
        }

        let mut attrs = field_attributes(&field.field);
        attrs.push(KeyValue::new(KEY_RESOLVER_PATH, field.path.to_string()));
        attrs.push(KeyValue::new(KEY_RESOLVER_IS_METHOD, field.is_method));
        attrs.push(KeyValue::new(KEY_RESOLVER_IS_RESOLVER, field.is_resolver));
        field_cx.span().set_attributes(attrs);

        let resolved = next(field_cx.clone()).await;
        if !resolved.errors.is_empty() {
            record_graphql_errors(&field_cx.span(), &resolved.errors, &self.config.error_filter);
        }
        field_cx.span().end();
        resolved
    }
}

/// Explicit request name, then the parsed operation's declared name, then
/// its type keyword, then the anonymous fallback.
fn operation_span_name(operation: &OperationContext) -> String {
    if let Some(name) = operation
        .operation_name
        .as_deref()
        .filter(|name| !name.is_empty())
    {
        return name.to_owned();
    }
    match &operation.operation {
        Some(parsed) => match parsed.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => name.to_owned(),
            None => parsed.operation_type.to_string(),
        },
        None => ANONYMOUS_OPERATION.to_owned(),
    }
}

/// `Object/field`, with the enclosing list index before the field name and
/// the iterated list index after it when present.
fn field_span_name(field: &FieldContext) -> String {
    let mut name = field.field.object.clone();
    if let Some(idx) = field.parent_list_index {
        name.push('/');
        name.push_str(&idx.to_string());
    }
    name.push('/');
    name.push_str(&field.field.name);
    if let Some(idx) = field.list_index {
        name.push('/');
        name.push_str(&idx.to_string());
    }
    name
}

fn render_variable(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otelgql_engine_api::{
        Field, OperationType, ParsedOperation, PhaseTiming, ResponsePath, StatsBag,
    };
    use std::collections::HashMap;
    use std::time::SystemTime;

    fn operation(
        operation_name: Option<&str>,
        parsed: Option<ParsedOperation>,
    ) -> OperationContext {
        let now = SystemTime::now();
        OperationContext {
            operation_name: operation_name.map(str::to_owned),
            operation: parsed,
            variables: HashMap::new(),
            stats: OperationStats {
                operation_start: None,
                parsing: PhaseTiming::new(now, now),
                read: PhaseTiming::new(now, now),
                validation: PhaseTiming::new(now, now),
                extensions: StatsBag::default(),
            },
        }
    }

    #[test]
    fn operation_name_prefers_the_request_supplied_name() {
        let op = operation(
            Some("GetUser"),
            Some(ParsedOperation {
                name: Some("Other".into()),
                operation_type: OperationType::Query,
            }),
        );
        assert_eq!(operation_span_name(&op), "GetUser");
    }

    #[test]
    fn operation_name_falls_back_to_parsed_name_then_keyword() {
        let op = operation(
            None,
            Some(ParsedOperation {
                name: Some("GetUser".into()),
                operation_type: OperationType::Query,
            }),
        );
        assert_eq!(operation_span_name(&op), "GetUser");

        let op = operation(
            Some(""),
            Some(ParsedOperation {
                name: None,
                operation_type: OperationType::Mutation,
            }),
        );
        assert_eq!(operation_span_name(&op), "mutation");
    }

    #[test]
    fn unparsed_operation_uses_the_anonymous_label() {
        assert_eq!(operation_span_name(&operation(None, None)), "anonymous-op");
    }

    #[test]
    fn field_span_name_includes_list_indices() {
        let mut ctx = FieldContext {
            field: Field {
                object: "User".into(),
                name: "friends".into(),
                alias: "friends".into(),
                directives: vec![],
                definition_args: vec![],
                arguments: vec![],
            },
            path: ResponsePath::default(),
            parent_list_index: None,
            list_index: None,
            is_method: true,
            is_resolver: true,
        };
        assert_eq!(field_span_name(&ctx), "User/friends");

        ctx.parent_list_index = Some(2);
        ctx.list_index = Some(0);
        assert_eq!(field_span_name(&ctx), "User/2/friends/0");
    }

    #[test]
    fn variables_render_strings_raw_and_the_rest_as_json() {
        assert_eq!(render_variable(&serde_json::json!("aereal")), "aereal");
        assert_eq!(render_variable(&serde_json::json!(42)), "42");
        assert_eq!(render_variable(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}

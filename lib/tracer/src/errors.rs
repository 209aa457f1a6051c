use std::backtrace::Backtrace;
use std::error::Error;
use std::sync::Arc;

use opentelemetry::trace::{SpanRef, Status};
use opentelemetry::KeyValue;
use otelgql_engine_api::GraphQLError;

use crate::attributes::{
    EXCEPTION_EVENT_NAME, KEY_ERRORS_PATH, KEY_EXCEPTION_MESSAGE, KEY_EXCEPTION_STACKTRACE,
    KEY_EXCEPTION_TYPE,
};

/// Selects which errors are reported as span events. Selection never affects
/// the response itself, only what the trace records.
pub type ErrorFilter = Arc<dyn Fn(&GraphQLError) -> bool + Send + Sync>;

/// Type label reported for an error that carries no recorded cause.
const DEFAULT_ERROR_TYPE: &str = "GraphQLError";

/// Upper bound on cause-chain hops, guarding against cyclic chains.
const MAX_CAUSE_DEPTH: usize = 32;

/// Record the given errors on `span`: one `exception` event per error the
/// filter selects, then an error status whose description reflects every
/// original message whenever at least one error was selected.
pub(crate) fn record_graphql_errors(span: &SpanRef<'_>, errors: &[GraphQLError], filter: &ErrorFilter) {
    let mut selected = false;
    for error in errors {
        if !filter(error) {
            continue;
        }
        selected = true;
        let cause = root_cause(error);
        span.add_event(
            EXCEPTION_EVENT_NAME,
            vec![
                KeyValue::new(KEY_ERRORS_PATH, error.path_string()),
                KeyValue::new(
                    KEY_EXCEPTION_TYPE,
                    error.source_type_name().unwrap_or(DEFAULT_ERROR_TYPE),
                ),
                KeyValue::new(KEY_EXCEPTION_MESSAGE, cause.to_string()),
                KeyValue::new(
                    KEY_EXCEPTION_STACKTRACE,
                    Backtrace::force_capture().to_string(),
                ),
            ],
        );
    }
    if selected {
        span.set_status(Status::error(aggregate_description(errors)));
    }
}

/// The deepest cause reachable through [`Error::source`], bounded by
/// [`MAX_CAUSE_DEPTH`].
fn root_cause(error: &GraphQLError) -> &(dyn Error + 'static) {
    let mut current: &(dyn Error + 'static) = error;
    for _ in 0..MAX_CAUSE_DEPTH {
        match current.source() {
            Some(next) => current = next,
            None => return current,
        }
    }
    tracing::warn!(
        max_depth = MAX_CAUSE_DEPTH,
        "error cause chain exceeds maximum unwrap depth, using last visited cause"
    );
    current
}

fn aggregate_description(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use otelgql_engine_api::{PathSegment, ResponsePath};
    use std::fmt;

    #[derive(Debug)]
    struct Chain {
        depth: usize,
        next: Option<Box<Chain>>,
    }

    impl Chain {
        fn of_length(len: usize) -> Chain {
            (0..len).rev().fold(None::<Chain>, |next, depth| {
                Some(Chain {
                    depth,
                    next: next.map(Box::new),
                })
            }).unwrap()
        }
    }

    impl fmt::Display for Chain {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "link {}", self.depth)
        }
    }

    impl Error for Chain {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.next
                .as_deref()
                .map(|next| next as &(dyn Error + 'static))
        }
    }

    #[test]
    fn root_cause_reaches_the_deepest_link() {
        let error = GraphQLError::new("wrapped").with_source(Chain::of_length(3));
        assert_eq!(root_cause(&error).to_string(), "link 2");
    }

    #[test]
    fn root_cause_without_source_is_the_error_itself() {
        let error = GraphQLError::new("boom")
            .with_path(ResponsePath::new(vec![PathSegment::Field("user".into())]));
        assert_eq!(root_cause(&error).to_string(), "user: boom");
    }

    #[test]
    fn root_cause_stops_at_the_depth_cap() {
        // 40 links; hop 1 lands on link 0, so hop 32 lands on link 31.
        let error = GraphQLError::new("wrapped").with_source(Chain::of_length(40));
        assert_eq!(root_cause(&error).to_string(), "link 31");
    }

    #[test]
    fn aggregate_description_joins_qualified_messages() {
        let errors = vec![
            GraphQLError::new("invalid name")
                .with_path(ResponsePath::new(vec![
                    PathSegment::Field("user".into()),
                    PathSegment::Field("name".into()),
                ])),
            GraphQLError::new("invalid age")
                .with_path(ResponsePath::new(vec![
                    PathSegment::Field("user".into()),
                    PathSegment::Field("age".into()),
                ])),
        ];
        assert_eq!(
            aggregate_description(&errors),
            "user.name: invalid name\nuser.age: invalid age"
        );
    }
}

use futures::future::BoxFuture;
use opentelemetry::Context;

use crate::error::SchemaValidationError;
use crate::field::FieldContext;
use crate::operation::OperationContext;
use crate::response::{ResolvedField, Response};

/// Root types of the schema an extension is being registered against.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInfo<'a> {
    pub query_type: &'a str,
    pub mutation_type: Option<&'a str>,
    pub subscription_type: Option<&'a str>,
}

/// Continuation producing the operation's response. Invoked exactly once.
pub type ResponseHandler<'exec> =
    Box<dyn FnOnce(Context) -> BoxFuture<'exec, Response> + Send + 'exec>;

/// Continuation resolving one field. Invoked exactly once.
pub type FieldResolver<'exec> =
    Box<dyn FnOnce(Context) -> BoxFuture<'exec, ResolvedField> + Send + 'exec>;

/// The capability set an extension registers with the engine.
///
/// The engine calls each slot at the matching point of the request
/// lifecycle; every slot defaults to passing execution straight through, so
/// an extension only implements the interceptions it cares about. The
/// [`Context`] value carries whatever the caller's tracing scope put there
/// and must be handed to `next` (possibly extended) so nested interceptions
/// see it.
#[async_trait::async_trait]
pub trait EngineExtension: Send + Sync + 'static {
    fn extension_name(&self) -> &'static str;

    /// Inspect the schema at registration time. Defaults to accepting it.
    fn validate(&self, schema: &SchemaInfo<'_>) -> Result<(), SchemaValidationError> {
        let _ = schema;
        Ok(())
    }

    /// Wrap the production of one operation's response.
    async fn intercept_response<'exec>(
        &'exec self,
        cx: Context,
        operation: &'exec OperationContext,
        next: ResponseHandler<'exec>,
    ) -> Response {
        let _ = operation;
        next(cx).await
    }

    /// Wrap the resolution of one field occurrence.
    async fn intercept_field<'exec>(
        &'exec self,
        cx: Context,
        field: &'exec FieldContext,
        next: FieldResolver<'exec>,
    ) -> ResolvedField {
        let _ = field;
        next(cx).await
    }
}

/// How the engine stores registered extensions.
pub type BoxedEngineExtension = Box<dyn EngineExtension>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl EngineExtension for Passthrough {
        fn extension_name(&self) -> &'static str {
            "Passthrough"
        }
    }

    #[test]
    fn default_validate_accepts_any_schema() {
        let ext = Passthrough;
        let schema = SchemaInfo {
            query_type: "Query",
            mutation_type: None,
            subscription_type: None,
        };
        assert!(ext.validate(&schema).is_ok());
    }

    #[tokio::test]
    async fn default_slots_delegate_to_next() {
        let ext: BoxedEngineExtension = Box::new(Passthrough);
        let resolved = ext
            .intercept_field(
                Context::new(),
                &crate::field::FieldContext {
                    field: crate::field::Field {
                        object: "Query".into(),
                        name: "ping".into(),
                        alias: "ping".into(),
                        directives: vec![],
                        definition_args: vec![],
                        arguments: vec![],
                    },
                    path: Default::default(),
                    parent_list_index: None,
                    list_index: None,
                    is_method: false,
                    is_resolver: false,
                },
                Box::new(|_cx| {
                    Box::pin(async {
                        ResolvedField {
                            value: Some(serde_json::json!("pong")),
                            errors: vec![],
                        }
                    })
                }),
            )
            .await;
        assert_eq!(resolved.value, Some(serde_json::json!("pong")));
    }
}

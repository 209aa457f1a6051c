//! The execution-engine surface that `otelgql-tracer` instruments.
//!
//! Everything in this crate is read-only from an extension's point of view:
//! the engine owns the operation/field contexts and error records and hands
//! borrows to the registered [`EngineExtension`] for the duration of one
//! interception call.

pub mod error;
pub mod extension;
pub mod field;
pub mod operation;
pub mod response;
pub mod value;

pub use error::{GraphQLError, SchemaValidationError};
pub use extension::{
    BoxedEngineExtension, EngineExtension, FieldResolver, ResponseHandler, SchemaInfo,
};
pub use field::{Argument, ArgumentDefinition, Directive, DirectiveLocation, Field, FieldContext};
pub use operation::{
    ApqStats, ComplexityStats, OperationContext, OperationStats, OperationType, ParsedOperation,
    PhaseTiming, StatsBag, APQ_STATS_KEY,
};
pub use response::{PathSegment, ResolvedField, Response, ResponsePath};
pub use value::Value;

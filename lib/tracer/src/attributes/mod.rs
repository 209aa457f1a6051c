use opentelemetry::Key;

mod field;
mod path;
mod value;

pub use field::field_attributes;
pub use path::AttrPath;
pub(crate) use value::value_attributes;

/// Resolver identity attributes
pub const KEY_RESOLVER_OBJECT: Key = Key::from_static_str("graphql.resolver.object");
pub const KEY_RESOLVER_FIELD: Key = Key::from_static_str("graphql.resolver.field");
pub const KEY_RESOLVER_ALIAS: Key = Key::from_static_str("graphql.resolver.alias");
pub const KEY_RESOLVER_PATH: Key = Key::from_static_str("graphql.resolver.path");
pub const KEY_RESOLVER_IS_METHOD: Key = Key::from_static_str("graphql.resolver.is_method");
pub const KEY_RESOLVER_IS_RESOLVER: Key = Key::from_static_str("graphql.resolver.is_resolver");

/// Operation attributes
pub const KEY_APQ_HASH: Key = Key::from_static_str("graphql.operation.apq.hash");
pub const KEY_APQ_SENT_QUERY: Key = Key::from_static_str("graphql.operation.apq.sent_query");
pub const KEY_COMPLEXITY_LIMIT: Key = Key::from_static_str("graphql.operation.complexity.limit");
pub const KEY_COMPLEXITY_CALCULATED: Key =
    Key::from_static_str("graphql.operation.complexity.calculated");

/// Error attributes (OpenTelemetry exception semantic conventions plus ours)
pub const KEY_ERRORS_PATH: Key = Key::from_static_str("graphql.errors.path");
pub const KEY_EXCEPTION_TYPE: Key = Key::from_static_str("exception.type");
pub const KEY_EXCEPTION_MESSAGE: Key = Key::from_static_str("exception.message");
pub const KEY_EXCEPTION_STACKTRACE: Key = Key::from_static_str("exception.stacktrace");

pub const EXCEPTION_EVENT_NAME: &str = "exception";

lazy_static::lazy_static! {
    /// `graphql.resolver.args.<name>...` — argument value trees.
    pub static ref ARGS_PREFIX: AttrPath = AttrPath::new(["graphql", "resolver", "args"]);
    /// `graphql.resolver.directives.<name>...` — per-directive attributes.
    pub static ref DIRECTIVES_PREFIX: AttrPath = AttrPath::new(["graphql", "resolver", "directives"]);
    /// `graphql.operation.variables.<name>` — client variable bindings.
    pub static ref VARIABLES_PREFIX: AttrPath = AttrPath::new(["graphql", "operation", "variables"]);
}

use crate::response::ResponsePath;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
}

/// A named argument as supplied in the document.
#[derive(Debug, Clone)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

/// An argument declared on the field's schema definition, with its
/// unresolved default value when one exists.
#[derive(Debug, Clone)]
pub struct ArgumentDefinition {
    pub name: String,
    pub default_value: Option<Value>,
}

/// A directive applied to the field, with its arguments in document order.
#[derive(Debug, Clone)]
pub struct Directive {
    pub name: String,
    pub location: DirectiveLocation,
    pub arguments: Vec<Argument>,
}

/// One resolved field occurrence as collected by the engine.
///
/// `definition_args` follow schema declaration order; `arguments` hold only
/// what the caller actually supplied and may be a subset.
#[derive(Debug, Clone)]
pub struct Field {
    /// Name of the object type declaring this field.
    pub object: String,
    pub name: String,
    pub alias: String,
    pub directives: Vec<Directive>,
    pub definition_args: Vec<ArgumentDefinition>,
    pub arguments: Vec<Argument>,
}

impl Field {
    /// The supplied argument with the given name, if the caller passed one.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// Per-occurrence resolution context for one field in the response tree.
#[derive(Debug, Clone)]
pub struct FieldContext {
    pub field: Field,
    /// Full response path down to this field.
    pub path: ResponsePath,
    /// Index of the enclosing element when the parent field produced a list.
    pub parent_list_index: Option<usize>,
    /// Index currently being iterated when this field itself produces a list.
    pub list_index: Option<usize>,
    /// The field is backed by a method on the parent object.
    pub is_method: bool,
    /// The field is backed by a registered resolver.
    pub is_resolver: bool,
}

use std::fmt;

/// An argument or default value as it appears in the parsed document.
///
/// A node either is a leaf (everything except a non-empty object) or has an
/// ordered list of named children. The `Display` impl renders the GraphQL
/// literal form and is the single source of truth for how values appear in
/// span attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    /// An unresolved variable reference, rendered as `$name`.
    Variable(String),
    List(Vec<Value>),
    /// Object fields in document order. Duplicate names are kept as-is.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// The named children of this node, or `None` for leaf values.
    ///
    /// Lists and empty objects are leaves: their children carry no names, so
    /// they flatten to their textual form instead.
    pub fn children(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(fields) if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Enum(v) => f.write_str(v),
            Value::Variable(name) => write!(f, "${name}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_graphql_literal_forms() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("aereal".into()).to_string(), "\"aereal\"");
        assert_eq!(Value::Enum("ADMIN".into()).to_string(), "ADMIN");
        assert_eq!(Value::Variable("name".into()).to_string(), "$name");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(Value::Object(vec![]).to_string(), "{}");
        assert_eq!(
            Value::Object(vec![(
                "nested".into(),
                Value::Object(vec![("val".into(), Value::String("root".into()))]),
            )])
            .to_string(),
            "{nested: {val: \"root\"}}"
        );
    }

    #[test]
    fn only_non_empty_objects_have_children() {
        assert!(Value::Null.children().is_none());
        assert!(Value::List(vec![Value::Int(1)]).children().is_none());
        assert!(Value::Object(vec![]).children().is_none());

        let obj = Value::Object(vec![("a".into(), Value::Int(1))]);
        assert_eq!(obj.children().unwrap().len(), 1);
    }
}

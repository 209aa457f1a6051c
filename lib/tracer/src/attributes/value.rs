use opentelemetry::KeyValue;
use otelgql_engine_api::Value;

use crate::attributes::AttrPath;

/// Textual form of a possibly-absent value. An argument definition with no
/// default renders the same `null` token as an explicit null.
pub(crate) fn render_value(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "null".to_owned(),
    }
}

/// Flatten a value tree into `(path, literal)` pairs.
///
/// Leaves emit exactly one pair at `base`; nodes with named children emit
/// nothing themselves and recurse with the child name appended. Repeated
/// child names each emit their own pair under the same key.
pub(crate) fn value_attributes(value: Option<&Value>, base: &AttrPath, out: &mut Vec<KeyValue>) {
    match value.and_then(Value::children) {
        Some(children) => {
            for (name, child) in children {
                value_attributes(Some(child), &base.with([name.as_str()]), out);
            }
        }
        None => out.push(KeyValue::new(base.encode(), render_value(value))),
    }
}

use opentelemetry::KeyValue;
use otelgql_engine_api::Field;

use crate::attributes::{
    value_attributes, ARGS_PREFIX, DIRECTIVES_PREFIX, KEY_RESOLVER_ALIAS, KEY_RESOLVER_FIELD,
    KEY_RESOLVER_OBJECT,
};

/// Attributes describing one resolved field: identity, directives, and
/// arguments.
///
/// Directives are processed in document order; arguments in schema
/// declaration order, regardless of the order the caller supplied them in.
/// An argument the caller omitted flattens its schema default and adds a
/// `<path>.default = true` marker.
pub fn field_attributes(field: &Field) -> Vec<KeyValue> {
    let mut attrs =
        Vec::with_capacity(3 + field.directives.len() * 2 + field.definition_args.len() * 2);
    attrs.push(KeyValue::new(KEY_RESOLVER_OBJECT, field.object.clone()));
    attrs.push(KeyValue::new(KEY_RESOLVER_FIELD, field.name.clone()));
    attrs.push(KeyValue::new(KEY_RESOLVER_ALIAS, field.alias.clone()));

    for directive in &field.directives {
        let base = DIRECTIVES_PREFIX.with([directive.name.as_str()]);
        let location: &'static str = directive.location.into();
        attrs.push(KeyValue::new(base.with(["location"]).encode(), location));
        for arg in &directive.arguments {
            value_attributes(
                Some(&arg.value),
                &base.with(["args", arg.name.as_str()]),
                &mut attrs,
            );
        }
    }

    for def in &field.definition_args {
        let base = ARGS_PREFIX.with([def.name.as_str()]);
        match field.argument(&def.name) {
            Some(arg) => value_attributes(Some(&arg.value), &base, &mut attrs),
            None => {
                value_attributes(def.default_value.as_ref(), &base, &mut attrs);
                attrs.push(KeyValue::new(base.with(["default"]).encode(), true));
            }
        }
    }

    attrs
}

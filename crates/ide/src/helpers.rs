use apollo_compiler::ast::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;

const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Reason given by `@deprecated`, or `None` when the element is not deprecated.
pub fn deprecation_reason(directives: &DirectiveList) -> Option<String> {
    let directive = directives.get("deprecated")?;
    let reason = directive
        .specified_argument_by_name("reason")
        .and_then(|value| value.as_str())
        .unwrap_or(DEFAULT_DEPRECATION_REASON);
    Some(reason.to_string())
}

pub fn type_description(ty: &ExtendedType) -> Option<&str> {
    match ty {
        ExtendedType::Scalar(t) => t.description.as_deref(),
        ExtendedType::Object(t) => t.description.as_deref(),
        ExtendedType::Interface(t) => t.description.as_deref(),
        ExtendedType::Union(t) => t.description.as_deref(),
        ExtendedType::Enum(t) => t.description.as_deref(),
        ExtendedType::InputObject(t) => t.description.as_deref(),
    }
}

/// SDL keyword introducing a type definition of this kind.
pub const fn type_keyword(ty: &ExtendedType) -> &'static str {
    match ty {
        ExtendedType::Scalar(_) => "scalar",
        ExtendedType::Object(_) => "type",
        ExtendedType::Interface(_) => "interface",
        ExtendedType::Union(_) => "union",
        ExtendedType::Enum(_) => "enum",
        ExtendedType::InputObject(_) => "input",
    }
}

/// Named type of `parent.field`, unwrapping lists and non-null.
pub fn field_type_name(schema: &Schema, parent: &str, field: &str) -> Option<String> {
    if field == "__typename" {
        return Some("String".to_string());
    }
    schema
        .type_field(parent, field)
        .ok()
        .map(|definition| definition.ty.inner_named_type().to_string())
}

/// Object types and interfaces that can stand in for `name` in a type
/// condition, `name` itself first.
pub fn possible_types(schema: &Schema, name: &str) -> Vec<String> {
    let mut types = vec![name.to_string()];
    match schema.types.get(name) {
        Some(ExtendedType::Union(union_)) => {
            types.extend(union_.members.iter().map(|m| m.name.to_string()));
        }
        Some(ExtendedType::Interface(_)) => {
            for (type_name, ty) in &schema.types {
                let implements = match ty {
                    ExtendedType::Object(t) => &t.implements_interfaces,
                    ExtendedType::Interface(t) => &t.implements_interfaces,
                    _ => continue,
                };
                if implements.iter().any(|i| i.name.as_str() == name) {
                    types.push(type_name.to_string());
                }
            }
        }
        _ => {}
    }
    types
}

/// Identifier characters directly before the end of `prefix`.
pub fn trailing_word(prefix: &str) -> &str {
    let start = prefix
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
        .last()
        .map_or(prefix.len(), |(i, _)| i);
    &prefix[start..]
}

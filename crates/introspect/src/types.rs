//! Typed shape of an introspection result.
//!
//! Every `__Type` arrives as one flat object whose `kind` decides which of the
//! optional member lists are populated, the same layout the server sends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a response to [`INTROSPECTION_QUERY`](crate::INTROSPECTION_QUERY).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    #[serde(default)]
    pub data: Option<IntrospectionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<NamedTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<NamedTypeRef>,
    pub types: Vec<IntrospectionType>,
    #[serde(default)]
    pub directives: Vec<IntrospectionDirective>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<IntrospectionInputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<TypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<IntrospectionEnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

impl IntrospectionType {
    /// Types the SDL printer never emits: introspection meta types and the
    /// five scalars every schema already has.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.name.starts_with("__")
            || matches!(
                self.name.as_str(),
                "Int" | "Float" | "String" | "Boolean" | "ID"
            )
    }

    #[must_use]
    pub fn fields(&self) -> &[IntrospectionField] {
        self.fields.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn input_fields(&self) -> &[IntrospectionInputValue] {
        self.input_fields.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        self.interfaces.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn enum_values(&self) -> &[IntrospectionEnumValue] {
        self.enum_values.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn possible_types(&self) -> &[TypeRef] {
        self.possible_types.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionDirective {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub locations: Vec<String>,
    #[serde(default)]
    pub args: Vec<IntrospectionInputValue>,
}

impl IntrospectionDirective {
    /// Directives every schema defines implicitly.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(
            self.name.as_str(),
            "skip" | "include" | "deprecated" | "specifiedBy" | "oneOf"
        )
    }
}

/// A possibly wrapped type reference (`[Episode!]!`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Innermost named type, skipping list and non-null wrappers.
    #[must_use]
    pub fn named(&self) -> Option<&str> {
        match (&self.name, &self.of_type) {
            (Some(name), _) => Some(name),
            (None, Some(inner)) => inner.named(),
            (None, None) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.of_type) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{inner}!"),
            (TypeKind::List, Some(inner)) => write!(f, "[{inner}]"),
            _ => f.write_str(self.name.as_deref().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(kind: TypeKind, name: &str) -> TypeRef {
        TypeRef {
            kind,
            name: Some(name.to_string()),
            of_type: None,
        }
    }

    fn wrap(kind: TypeKind, inner: TypeRef) -> TypeRef {
        TypeRef {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    #[test]
    fn test_type_ref_display() {
        let episode = named(TypeKind::Enum, "Episode");
        assert_eq!(episode.to_string(), "Episode");

        let list = wrap(
            TypeKind::NonNull,
            wrap(TypeKind::List, wrap(TypeKind::NonNull, episode.clone())),
        );
        assert_eq!(list.to_string(), "[Episode!]!");
        assert_eq!(list.named(), Some("Episode"));
    }

    #[test]
    fn test_deserialize_flat_type() {
        let json = serde_json::json!({
            "kind": "ENUM",
            "name": "Episode",
            "description": null,
            "fields": null,
            "inputFields": null,
            "interfaces": null,
            "enumValues": [
                { "name": "NEWHOPE", "description": null, "isDeprecated": false, "deprecationReason": null }
            ],
            "possibleTypes": null
        });
        let ty: IntrospectionType = serde_json::from_value(json).unwrap();
        assert_eq!(ty.kind, TypeKind::Enum);
        assert!(ty.fields().is_empty());
        assert_eq!(ty.enum_values().len(), 1);
        assert!(!ty.is_builtin());
    }

    #[test]
    fn test_response_with_errors_only() {
        let json = serde_json::json!({ "errors": [{ "message": "introspection disabled" }] });
        let response: IntrospectionResponse = serde_json::from_value(json).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors.map(|e| e.len()), Some(1));
    }

    #[test]
    fn test_builtin_directives() {
        let directive = |name: &str| IntrospectionDirective {
            name: name.to_string(),
            description: None,
            locations: vec!["FIELD".to_string()],
            args: Vec::new(),
        };
        assert!(directive("skip").is_builtin());
        assert!(directive("oneOf").is_builtin());
        assert!(!directive("cacheControl").is_builtin());
    }
}

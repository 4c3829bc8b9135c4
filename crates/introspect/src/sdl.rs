//! Printing an introspection result as schema definition language.

use crate::types::{
    IntrospectionDirective, IntrospectionField, IntrospectionInputValue, IntrospectionSchema,
    IntrospectionType, TypeKind, TypeRef,
};

/// Renders the introspected schema as SDL.
///
/// The output always starts with an explicit `schema { ... }` block so root
/// operation types keep their names whatever they are called. Built-in
/// scalars, `__` meta types and the implicit directives are left out.
#[must_use]
#[tracing::instrument(skip_all, fields(types = schema.types.len()))]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let mut printer = SdlPrinter::default();
    printer.schema_definition(schema);

    for directive in schema.directives.iter().filter(|d| !d.is_builtin()) {
        printer.directive(directive);
    }

    for ty in schema.types.iter().filter(|t| !t.is_builtin()) {
        printer.type_definition(ty);
    }

    tracing::debug!(bytes = printer.out.len(), "printed introspection as SDL");
    printer.finish()
}

#[derive(Default)]
struct SdlPrinter {
    out: String,
}

impl SdlPrinter {
    fn finish(self) -> String {
        let mut out = self.out.trim_end().to_string();
        out.push('\n');
        out
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn description(&mut self, description: Option<&str>, indent: &str) {
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            self.line(&format!("{indent}{}", quote(description)));
        }
    }

    fn schema_definition(&mut self, schema: &IntrospectionSchema) {
        self.line("schema {");
        let roots = [
            ("query", &schema.query_type),
            ("mutation", &schema.mutation_type),
            ("subscription", &schema.subscription_type),
        ];
        for (operation, root) in roots {
            if let Some(root) = root {
                self.line(&format!("  {operation}: {}", root.name));
            }
        }
        self.line("}");
        self.out.push('\n');
    }

    fn directive(&mut self, directive: &IntrospectionDirective) {
        self.description(directive.description.as_deref(), "");
        self.line(&format!(
            "directive @{}{} on {}",
            directive.name,
            arguments(&directive.args),
            directive.locations.join(" | ")
        ));
        self.out.push('\n');
    }

    fn type_definition(&mut self, ty: &IntrospectionType) {
        self.description(ty.description.as_deref(), "");
        match ty.kind {
            TypeKind::Scalar => self.line(&format!("scalar {}", ty.name)),
            TypeKind::Object | TypeKind::Interface => {
                let keyword = if ty.kind == TypeKind::Object {
                    "type"
                } else {
                    "interface"
                };
                let implements = implements_clause(ty.interfaces());
                if ty.fields().is_empty() {
                    self.line(&format!("{keyword} {}{implements}", ty.name));
                } else {
                    self.line(&format!("{keyword} {}{implements} {{", ty.name));
                    for field in ty.fields() {
                        self.field(field);
                    }
                    self.line("}");
                }
            }
            TypeKind::Union => {
                let members: Vec<String> =
                    ty.possible_types().iter().map(ToString::to_string).collect();
                self.line(&format!("union {} = {}", ty.name, members.join(" | ")));
            }
            TypeKind::Enum => {
                self.line(&format!("enum {} {{", ty.name));
                for value in ty.enum_values() {
                    self.description(value.description.as_deref(), "  ");
                    let deprecated =
                        deprecation(value.is_deprecated, value.deprecation_reason.as_deref());
                    self.line(&format!("  {}{deprecated}", value.name));
                }
                self.line("}");
            }
            TypeKind::InputObject => {
                self.line(&format!("input {} {{", ty.name));
                for input in ty.input_fields() {
                    self.description(input.description.as_deref(), "  ");
                    self.line(&format!("  {}", input_value(input)));
                }
                self.line("}");
            }
            TypeKind::List | TypeKind::NonNull => {
                tracing::warn!(name = %ty.name, "wrapper kind in type list, skipping");
                return;
            }
        }
        self.out.push('\n');
    }

    fn field(&mut self, field: &IntrospectionField) {
        self.description(field.description.as_deref(), "  ");
        self.line(&format!(
            "  {}{}: {}{}",
            field.name,
            arguments(&field.args),
            field.ty,
            deprecation(field.is_deprecated, field.deprecation_reason.as_deref())
        ));
    }
}

fn arguments(args: &[IntrospectionInputValue]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let args: Vec<String> = args.iter().map(input_value).collect();
    format!("({})", args.join(", "))
}

fn input_value(value: &IntrospectionInputValue) -> String {
    match &value.default_value {
        Some(default) => format!("{}: {} = {default}", value.name, value.ty),
        None => format!("{}: {}", value.name, value.ty),
    }
}

fn implements_clause(interfaces: &[TypeRef]) -> String {
    if interfaces.is_empty() {
        return String::new();
    }
    let names: Vec<String> = interfaces.iter().map(ToString::to_string).collect();
    format!(" implements {}", names.join(" & "))
}

fn deprecation(is_deprecated: bool, reason: Option<&str>) -> String {
    match (is_deprecated, reason) {
        (false, _) => String::new(),
        (true, Some(reason)) => format!(" @deprecated(reason: {})", quote(reason)),
        (true, None) => " @deprecated".to_string(),
    }
}

/// JSON string escaping is a subset of GraphQL string escaping.
fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_from(json: serde_json::Value) -> IntrospectionSchema {
        serde_json::from_value(json).unwrap()
    }

    fn string_ref() -> serde_json::Value {
        serde_json::json!({ "kind": "SCALAR", "name": "String", "ofType": null })
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("two\nlines"), "\"two\\nlines\"");
    }

    #[test]
    fn test_schema_block_always_printed() {
        let schema = schema_from(serde_json::json!({
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": null,
            "types": [
                { "kind": "OBJECT", "name": "Query", "fields": [
                    { "name": "hello", "args": [], "type": string_ref(), "isDeprecated": false }
                ], "interfaces": [] },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "OBJECT", "name": "__Schema", "fields": [], "interfaces": [] }
            ],
            "directives": [
                { "name": "skip", "locations": ["FIELD"], "args": [] }
            ]
        }));

        let sdl = introspection_to_sdl(&schema);
        assert_eq!(sdl, "schema {\n  query: Query\n}\n\ntype Query {\n  hello: String\n}\n");
    }

    #[test]
    fn test_deprecations_and_descriptions() {
        let schema = schema_from(serde_json::json!({
            "queryType": { "name": "Root" },
            "types": [
                { "kind": "OBJECT", "name": "Root", "description": "The \"root\"", "fields": [
                    { "name": "old", "args": [], "type": string_ref(),
                      "isDeprecated": true, "deprecationReason": "Use `new`" },
                    { "name": "gone", "args": [], "type": string_ref(),
                      "isDeprecated": true, "deprecationReason": null }
                ], "interfaces": [] },
                { "kind": "ENUM", "name": "Color", "enumValues": [
                    { "name": "RED", "isDeprecated": false },
                    { "name": "BLUE", "isDeprecated": true, "deprecationReason": "no" }
                ] }
            ],
            "directives": []
        }));

        let sdl = introspection_to_sdl(&schema);
        assert!(sdl.contains("  query: Root\n"));
        assert!(sdl.contains("\"The \\\"root\\\"\"\ntype Root {"));
        assert!(sdl.contains("  old: String @deprecated(reason: \"Use `new`\")\n"));
        assert!(sdl.contains("  gone: String @deprecated\n"));
        assert!(sdl.contains("  BLUE @deprecated(reason: \"no\")\n"));
    }

    #[test]
    fn test_arguments_inputs_and_unions() {
        let schema = schema_from(serde_json::json!({
            "queryType": { "name": "Query" },
            "types": [
                { "kind": "OBJECT", "name": "Query", "fields": [
                    { "name": "search", "isDeprecated": false,
                      "args": [
                          { "name": "text", "type": string_ref(), "defaultValue": "\"r2\"" },
                          { "name": "filter", "type": { "kind": "INPUT_OBJECT", "name": "Filter" } }
                      ],
                      "type": { "kind": "LIST", "name": null, "ofType":
                          { "kind": "UNION", "name": "SearchResult", "ofType": null } } }
                ], "interfaces": [] },
                { "kind": "INPUT_OBJECT", "name": "Filter", "inputFields": [
                    { "name": "limit", "type": { "kind": "NON_NULL", "ofType":
                        { "kind": "SCALAR", "name": "Int" } }, "defaultValue": "10" }
                ] },
                { "kind": "UNION", "name": "SearchResult", "possibleTypes": [
                    { "kind": "OBJECT", "name": "Human" },
                    { "kind": "OBJECT", "name": "Droid" }
                ] }
            ],
            "directives": [
                { "name": "auth", "locations": ["FIELD_DEFINITION", "OBJECT"], "args": [
                    { "name": "role", "type": string_ref() }
                ] }
            ]
        }));

        let sdl = introspection_to_sdl(&schema);
        assert!(sdl.contains("directive @auth(role: String) on FIELD_DEFINITION | OBJECT\n"));
        assert!(sdl.contains("  search(text: String = \"r2\", filter: Filter): [SearchResult]\n"));
        assert!(sdl.contains("input Filter {\n  limit: Int! = 10\n}\n"));
        assert!(sdl.contains("union SearchResult = Human | Droid\n"));
    }
}

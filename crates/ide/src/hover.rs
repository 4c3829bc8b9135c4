//! Hover text for the symbol under the cursor.

use apollo_compiler::schema::{ExtendedType, FieldDefinition};
use apollo_compiler::Schema;
use apollo_parser::cst;
use apollo_parser::SyntaxTree;
use graphql_types::{LineIndex, Position};

use crate::helpers::{deprecation_reason, type_description, type_keyword};
use crate::symbol::{operation_at, symbol_at, type_text, ArgumentOwner, Symbol};
use crate::types::HoverResult;

#[must_use]
#[tracing::instrument(skip(schema, source), fields(len = source.len()))]
pub fn hover(schema: &Schema, source: &str, position: Position) -> Option<HoverResult> {
    let index = LineIndex::new(source);
    let offset = index.offset(position)?;
    let tree = apollo_parser::Parser::new(source).parse();
    let found = symbol_at(&tree, schema, offset)?;
    tracing::debug!(symbol = ?found.symbol, "hover symbol");

    let contents = match &found.symbol {
        Symbol::Field { parent, name } => field_hover(schema, parent.as_deref()?, name)?,
        Symbol::Type { name } => type_hover(schema, name)?,
        Symbol::Argument { owner, name } => argument_hover(schema, owner, name)?,
        Symbol::Directive { name } => directive_hover(schema, name)?,
        Symbol::Variable { name } => variable_hover(&tree, offset, name)?,
        Symbol::FragmentSpread { name } => fragment_hover(&tree, name)?,
    };

    Some(HoverResult::new(contents).with_range(index.range(found.range)))
}

fn signature(code: &str) -> String {
    format!("```graphql\n{code}\n```")
}

fn push_paragraph(out: &mut String, text: Option<&str>) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        out.push_str("\n\n");
        out.push_str(text);
    }
}

fn field_hover(schema: &Schema, parent: &str, name: &str) -> Option<String> {
    if name == "__typename" {
        return Some(signature(&format!("{parent}.__typename: String!")));
    }
    let field = schema.type_field(parent, name).ok()?;
    let mut out = signature(&format!("{parent}.{}", field_signature(field)));
    push_paragraph(&mut out, field.description.as_deref());
    if let Some(reason) = deprecation_reason(&field.directives) {
        out.push_str(&format!("\n\n**Deprecated:** {reason}"));
    }
    Some(out)
}

fn field_signature(field: &FieldDefinition) -> String {
    if field.arguments.is_empty() {
        return format!("{}: {}", field.name, field.ty);
    }
    let arguments: Vec<String> = field
        .arguments
        .iter()
        .map(|a| format!("{}: {}", a.name, a.ty))
        .collect();
    format!("{}({}): {}", field.name, arguments.join(", "), field.ty)
}

fn type_hover(schema: &Schema, name: &str) -> Option<String> {
    let ty = schema.types.get(name)?;
    let mut header = format!("{} {name}", type_keyword(ty));
    match ty {
        ExtendedType::Object(object) if !object.implements_interfaces.is_empty() => {
            let interfaces: Vec<&str> = object
                .implements_interfaces
                .iter()
                .map(|i| i.name.as_str())
                .collect();
            header.push_str(&format!(" implements {}", interfaces.join(" & ")));
        }
        ExtendedType::Union(union_) => {
            let members: Vec<&str> = union_.members.iter().map(|m| m.name.as_str()).collect();
            header.push_str(&format!(" = {}", members.join(" | ")));
        }
        _ => {}
    }
    let mut out = signature(&header);
    push_paragraph(&mut out, type_description(ty));
    Some(out)
}

fn argument_hover(schema: &Schema, owner: &ArgumentOwner, name: &str) -> Option<String> {
    let argument = match owner {
        ArgumentOwner::Field { parent, field } => {
            let field = schema.type_field(parent.as_deref()?, field).ok()?;
            field.argument_by_name(name)?
        }
        ArgumentOwner::Directive(directive) => schema
            .directive_definitions
            .get(directive.as_str())?
            .argument_by_name(name)?,
    };
    let mut code = format!("{}: {}", argument.name, argument.ty);
    if let Some(default) = &argument.default_value {
        code.push_str(&format!(" = {default}"));
    }
    let mut out = signature(&code);
    push_paragraph(&mut out, argument.description.as_deref());
    Some(out)
}

fn directive_hover(schema: &Schema, name: &str) -> Option<String> {
    let directive = schema.directive_definitions.get(name)?;
    let locations: Vec<&str> = directive.locations.iter().map(|l| l.name()).collect();
    let mut out = signature(&format!("@{name} on {}", locations.join(" | ")));
    push_paragraph(&mut out, directive.description.as_deref());
    Some(out)
}

fn variable_hover(tree: &SyntaxTree, offset: usize, name: &str) -> Option<String> {
    let operation = operation_at(tree, offset)?;
    let definition = operation
        .variable_definitions()?
        .variable_definitions()
        .find(|d| {
            d.variable()
                .and_then(|v| v.name())
                .is_some_and(|n| n.text() == name)
        })?;
    let ty = type_text(&definition.ty()?);
    Some(signature(&format!("${name}: {ty}")))
}

fn fragment_hover(tree: &SyntaxTree, name: &str) -> Option<String> {
    tree.document().definitions().find_map(|definition| {
        let cst::Definition::FragmentDefinition(fragment) = definition else {
            return None;
        };
        let fragment_name = fragment.fragment_name()?.name()?;
        if fragment_name.text() != name {
            return None;
        }
        let condition = fragment.type_condition()?.named_type()?.name()?;
        Some(signature(&format!("fragment {name} on {}", condition.text())))
    })
}

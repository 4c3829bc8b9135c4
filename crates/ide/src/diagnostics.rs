//! Diagnostics for an operation buffer.
//!
//! A document with syntax errors reports only those. A syntactically valid
//! document is validated against the schema, and selections of deprecated
//! fields and arguments are reported as warnings.

use apollo_compiler::executable::{Selection, SelectionSet};
use apollo_compiler::parser::SourceSpan;
use apollo_compiler::validation::{DiagnosticList, Valid};
use apollo_compiler::{ExecutableDocument, Schema};
use graphql_types::{LineIndex, OffsetRange, Range};
use std::path::Path;

use crate::helpers::deprecation_reason;
use crate::types::Diagnostic;

const SOURCE: &str = "graphql";
const DOCUMENT_PATH: &str = "operation.graphql";

#[must_use]
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn diagnostics(schema: &Valid<Schema>, source: &str) -> Vec<Diagnostic> {
    let index = LineIndex::new(source);

    let syntax = syntax_diagnostics(source, &index);
    if !syntax.is_empty() {
        tracing::debug!(count = syntax.len(), "syntax errors");
        return syntax;
    }

    let mut diagnostics = Vec::new();
    let document = match ExecutableDocument::parse_and_validate(schema, source, DOCUMENT_PATH) {
        Ok(document) => document.into_inner(),
        Err(invalid) => {
            diagnostics.extend(validation_diagnostics(&invalid.errors, &index));
            invalid.partial
        }
    };
    deprecated_usages(&document, &index, &mut diagnostics);

    diagnostics.sort_by_key(|d| d.range.start);
    tracing::debug!(count = diagnostics.len(), "validated operation");
    diagnostics
}

fn syntax_diagnostics(source: &str, index: &LineIndex<'_>) -> Vec<Diagnostic> {
    let tree = apollo_parser::Parser::new(source).parse();
    tree.errors()
        .map(|error| {
            let start = error.index();
            let end = start + error.data().len().max(1);
            let range = index.range(OffsetRange::new(start, end));
            Diagnostic::error(range, error.message(), SOURCE, "syntax")
        })
        .collect()
}

fn validation_diagnostics(errors: &DiagnosticList, index: &LineIndex<'_>) -> Vec<Diagnostic> {
    use apollo_compiler::diagnostic::ToCliReport;

    errors
        .iter()
        .map(|diagnostic| {
            // Spans in another source file (the schema) have no place in this buffer.
            let span = diagnostic.error.location().filter(|location| {
                diagnostic
                    .sources
                    .get(&location.file_id())
                    .is_some_and(|file| file.path() == Path::new(DOCUMENT_PATH))
            });
            Diagnostic::error(
                span_range(span, index),
                diagnostic.error.to_string(),
                SOURCE,
                "validation",
            )
        })
        .collect()
}

fn deprecated_usages(
    document: &ExecutableDocument,
    index: &LineIndex<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for operation in document.operations.iter() {
        walk_selection_set(&operation.selection_set, index, diagnostics);
    }
    for fragment in document.fragments.values() {
        walk_selection_set(&fragment.selection_set, index, diagnostics);
    }
}

fn walk_selection_set(
    set: &SelectionSet,
    index: &LineIndex<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for selection in &set.selections {
        match selection {
            Selection::Field(field) => {
                let definition = &field.definition;
                if let Some(reason) = deprecation_reason(&definition.directives) {
                    let span = field.name.location().or_else(|| field.location());
                    diagnostics.push(Diagnostic::warning(
                        span_range(span, index),
                        format!("The field {}.{} is deprecated. {reason}", set.ty, field.name),
                        SOURCE,
                        "deprecated",
                    ));
                }
                for argument in &field.arguments {
                    let Some(argument_definition) = definition.argument_by_name(&argument.name)
                    else {
                        continue;
                    };
                    if let Some(reason) = deprecation_reason(&argument_definition.directives) {
                        diagnostics.push(Diagnostic::warning(
                            span_range(argument.location(), index),
                            format!(
                                "The argument {} of {}.{} is deprecated. {reason}",
                                argument.name, set.ty, field.name
                            ),
                            SOURCE,
                            "deprecated",
                        ));
                    }
                }
                walk_selection_set(&field.selection_set, index, diagnostics);
            }
            Selection::InlineFragment(inline) => {
                walk_selection_set(&inline.selection_set, index, diagnostics);
            }
            Selection::FragmentSpread(_) => {}
        }
    }
}

fn span_range(span: Option<SourceSpan>, index: &LineIndex<'_>) -> Range {
    span.map_or_else(Range::default, |span| {
        index.range(OffsetRange::new(span.offset(), span.end_offset()))
    })
}

//! Completion suggestions.
//!
//! The context is decided from the text just before the cursor (`$`, `@`,
//! `...`, `on`) and from the [`Scope`] the cursor is in. Suggestions are then
//! narrowed and ranked against the partially typed word.

use apollo_compiler::ast::OperationType;
use apollo_compiler::schema::{DirectiveLocation, ExtendedType};
use apollo_compiler::Schema;
use apollo_parser::cst;
use apollo_parser::SyntaxTree;
use graphql_types::{LineIndex, OffsetRange, Position};

use crate::helpers::{
    deprecation_reason, possible_types, trailing_word, type_description, type_keyword,
};
use crate::symbol::{operation_at, scope_at, type_text, Scope};
use crate::types::{CompletionItem, CompletionKind};

/// Fuzzy matches below this similarity are dropped.
const MIN_SIMILARITY: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Context {
    Fields { parent: String },
    Arguments { parent: String, field: String },
    DirectiveArguments { directive: String },
    ArgumentValue { type_name: String },
    Directives(DirectiveLocation),
    Variables,
    InputTypes,
    TypeCondition { parent: Option<String> },
    FragmentSpread,
    Definitions,
}

#[must_use]
#[tracing::instrument(skip(schema, source), fields(len = source.len()))]
pub fn completions(schema: &Schema, source: &str, position: Position) -> Vec<CompletionItem> {
    let index = LineIndex::new(source);
    let Some(offset) = index.offset(position) else {
        return Vec::new();
    };
    let tree = apollo_parser::Parser::new(source).parse();

    let prefix = &source[..offset];
    let word = trailing_word(prefix);
    let before = prefix[..prefix.len() - word.len()].trim_end();
    let scope = scope_at(&tree, schema, offset);

    let Some(context) = context(schema, source, before, &scope) else {
        tracing::debug!(?scope, "no completion context");
        return Vec::new();
    };
    tracing::debug!(?context, word, "completion context");

    let items = match context {
        Context::Fields { parent } => field_items(schema, &parent),
        Context::Arguments { parent, field } => argument_items(schema, &parent, &field),
        Context::DirectiveArguments { directive } => directive_argument_items(schema, &directive),
        Context::ArgumentValue { type_name } => value_items(schema, &type_name),
        Context::Directives(location) => directive_items(schema, location),
        Context::Variables => variable_items(&tree, offset),
        Context::InputTypes => input_type_items(schema),
        Context::TypeCondition { parent } => type_condition_items(schema, parent.as_deref()),
        Context::FragmentSpread => fragment_items(&tree),
        Context::Definitions => definition_items(schema),
    };
    rank(items, word)
}

fn context(schema: &Schema, source: &str, before: &str, scope: &Scope) -> Option<Context> {
    if before.ends_with('$') {
        return match scope {
            Scope::VariableDefinitions { .. } => None,
            _ => Some(Context::Variables),
        };
    }
    if before.ends_with('@') {
        return Some(Context::Directives(directive_location(scope)));
    }
    if ends_with_keyword(before, "on") {
        let head = before[..before.len() - 2].trim_end();
        if head.ends_with("...") {
            let parent = match scope {
                Scope::SelectionSet { parent } => parent.clone(),
                _ => None,
            };
            return Some(Context::TypeCondition { parent });
        }
        if matches!(scope, Scope::FragmentHeader) {
            return Some(Context::TypeCondition { parent: None });
        }
    }

    match scope {
        Scope::TopLevel => Some(Context::Definitions),
        Scope::OperationHeader(_) | Scope::FragmentHeader => None,
        Scope::VariableDefinitions { range } => {
            let inside = &source[range.start..before.len().max(range.start)];
            let current = inside.rsplit('$').next().unwrap_or_default();
            (inside.contains('$') && current.contains(':') && !current.contains('='))
                .then_some(Context::InputTypes)
        }
        Scope::SelectionSet { parent } => {
            if before.ends_with("...") {
                return Some(Context::FragmentSpread);
            }
            parent.clone().map(|parent| Context::Fields { parent })
        }
        Scope::FieldArguments {
            parent,
            field,
            range,
        } => match argument_being_valued(source, *range, before) {
            Some(argument) => {
                let definition = schema.type_field(parent.as_deref()?, field).ok()?;
                let argument = definition.argument_by_name(&argument)?;
                Some(Context::ArgumentValue {
                    type_name: argument.ty.inner_named_type().to_string(),
                })
            }
            None => Some(Context::Arguments {
                parent: parent.clone()?,
                field: field.clone(),
            }),
        },
        Scope::DirectiveArguments { directive, range } => {
            match argument_being_valued(source, *range, before) {
                Some(argument) => {
                    let definition = schema.directive_definitions.get(directive.as_str())?;
                    let argument = definition.argument_by_name(&argument)?;
                    Some(Context::ArgumentValue {
                        type_name: argument.ty.inner_named_type().to_string(),
                    })
                }
                None => Some(Context::DirectiveArguments {
                    directive: directive.clone(),
                }),
            }
        }
    }
}

fn ends_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_suffix(keyword).is_some_and(|head| {
        !head
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Name of the argument whose value is being typed, when the last token
/// before the word is the `:` after an argument name.
fn argument_being_valued(source: &str, range: OffsetRange, before: &str) -> Option<String> {
    let inside = &source[range.start..before.len().max(range.start)];
    let head = inside.strip_suffix(':')?.trim_end();
    let name = trailing_word(head);
    (!name.is_empty()).then(|| name.to_string())
}

fn directive_location(scope: &Scope) -> DirectiveLocation {
    match scope {
        Scope::OperationHeader(OperationType::Query) | Scope::TopLevel => DirectiveLocation::Query,
        Scope::OperationHeader(OperationType::Mutation) => DirectiveLocation::Mutation,
        Scope::OperationHeader(OperationType::Subscription) => DirectiveLocation::Subscription,
        Scope::FragmentHeader => DirectiveLocation::FragmentDefinition,
        Scope::VariableDefinitions { .. } => DirectiveLocation::VariableDefinition,
        Scope::SelectionSet { .. }
        | Scope::FieldArguments { .. }
        | Scope::DirectiveArguments { .. } => DirectiveLocation::Field,
    }
}

fn field_items(schema: &Schema, parent: &str) -> Vec<CompletionItem> {
    let fields = match schema.types.get(parent) {
        Some(ExtendedType::Object(object)) => Some(&object.fields),
        Some(ExtendedType::Interface(interface)) => Some(&interface.fields),
        _ => None,
    };
    let mut items: Vec<CompletionItem> = fields
        .into_iter()
        .flat_map(|fields| fields.values())
        .map(|field| {
            CompletionItem::new(field.name.as_str(), CompletionKind::Field)
                .with_detail(field.ty.to_string())
                .with_documentation(field.description.as_deref())
                .with_deprecated(deprecation_reason(&field.directives).is_some())
        })
        .collect();
    if schema.types.contains_key(parent) {
        items.push(
            CompletionItem::new("__typename", CompletionKind::Field)
                .with_detail("String!")
                .with_documentation(Some("The name of the current Object type at runtime.")),
        );
    }
    items
}

fn argument_items(schema: &Schema, parent: &str, field: &str) -> Vec<CompletionItem> {
    let Ok(definition) = schema.type_field(parent, field) else {
        return Vec::new();
    };
    definition
        .arguments
        .iter()
        .map(|argument| {
            CompletionItem::new(argument.name.as_str(), CompletionKind::Argument)
                .with_detail(argument.ty.to_string())
                .with_documentation(argument.description.as_deref())
        })
        .collect()
}

fn directive_argument_items(schema: &Schema, directive: &str) -> Vec<CompletionItem> {
    let Some(definition) = schema.directive_definitions.get(directive) else {
        return Vec::new();
    };
    definition
        .arguments
        .iter()
        .map(|argument| {
            CompletionItem::new(argument.name.as_str(), CompletionKind::Argument)
                .with_detail(argument.ty.to_string())
                .with_documentation(argument.description.as_deref())
        })
        .collect()
}

fn value_items(schema: &Schema, type_name: &str) -> Vec<CompletionItem> {
    match schema.types.get(type_name) {
        Some(ExtendedType::Enum(enum_)) => enum_
            .values
            .values()
            .map(|value| {
                CompletionItem::new(value.value.as_str(), CompletionKind::EnumValue)
                    .with_detail(type_name)
                    .with_documentation(value.description.as_deref())
                    .with_deprecated(deprecation_reason(&value.directives).is_some())
            })
            .collect(),
        Some(ExtendedType::Scalar(_)) if type_name == "Boolean" => ["true", "false"]
            .into_iter()
            .map(|keyword| CompletionItem::new(keyword, CompletionKind::Keyword).with_detail(type_name))
            .collect(),
        _ => Vec::new(),
    }
}

fn directive_items(schema: &Schema, location: DirectiveLocation) -> Vec<CompletionItem> {
    schema
        .directive_definitions
        .values()
        .filter(|directive| directive.locations.contains(&location))
        .map(|directive| {
            CompletionItem::new(directive.name.as_str(), CompletionKind::Directive)
                .with_documentation(directive.description.as_deref())
        })
        .collect()
}

fn variable_items(tree: &SyntaxTree, offset: usize) -> Vec<CompletionItem> {
    let Some(definitions) = operation_at(tree, offset).and_then(|op| op.variable_definitions())
    else {
        return Vec::new();
    };
    definitions
        .variable_definitions()
        .filter_map(|definition| {
            let name = definition.variable()?.name()?.text().to_string();
            let item = CompletionItem::new(name, CompletionKind::Variable);
            Some(match definition.ty() {
                Some(ty) => item.with_detail(type_text(&ty)),
                None => item,
            })
        })
        .collect()
}

fn input_type_items(schema: &Schema) -> Vec<CompletionItem> {
    schema
        .types
        .iter()
        .filter(|(name, ty)| !name.starts_with("__") && ty.is_input_type())
        .map(|(name, ty)| {
            CompletionItem::new(name.as_str(), CompletionKind::Type)
                .with_detail(type_keyword(ty))
                .with_documentation(type_description(ty))
        })
        .collect()
}

fn type_condition_items(schema: &Schema, parent: Option<&str>) -> Vec<CompletionItem> {
    let names: Vec<String> = match parent {
        Some(parent) => possible_types(schema, parent),
        None => schema
            .types
            .iter()
            .filter(|(name, ty)| {
                !name.starts_with("__")
                    && matches!(
                        ty,
                        ExtendedType::Object(_) | ExtendedType::Interface(_) | ExtendedType::Union(_)
                    )
            })
            .map(|(name, _)| name.to_string())
            .collect(),
    };
    names
        .into_iter()
        .filter_map(|name| {
            let ty = schema.types.get(name.as_str())?;
            Some(
                CompletionItem::new(name.as_str(), CompletionKind::Type)
                    .with_detail(type_keyword(ty))
                    .with_documentation(type_description(ty)),
            )
        })
        .collect()
}

fn fragment_items(tree: &SyntaxTree) -> Vec<CompletionItem> {
    tree.document()
        .definitions()
        .filter_map(|definition| {
            let cst::Definition::FragmentDefinition(fragment) = definition else {
                return None;
            };
            let name = fragment.fragment_name()?.name()?.text().to_string();
            let condition = fragment
                .type_condition()
                .and_then(|c| c.named_type())
                .and_then(|n| n.name())
                .map(|n| format!("on {}", n.text()));
            let item = CompletionItem::new(name, CompletionKind::Fragment);
            Some(match condition {
                Some(condition) => item.with_detail(condition),
                None => item,
            })
        })
        .collect()
}

fn definition_items(schema: &Schema) -> Vec<CompletionItem> {
    let mut keywords = vec!["query"];
    if schema.root_operation(OperationType::Mutation).is_some() {
        keywords.push("mutation");
    }
    if schema.root_operation(OperationType::Subscription).is_some() {
        keywords.push("subscription");
    }
    keywords.push("fragment");
    keywords
        .into_iter()
        .map(|keyword| CompletionItem::new(keyword, CompletionKind::Keyword))
        .collect()
}

/// Keeps items matching `word` and orders them: exact prefix, then
/// case-insensitive prefix, then substring, then fuzzy. Deprecated items sink
/// within each group. Ties keep schema order.
pub(crate) fn rank(items: Vec<CompletionItem>, word: &str) -> Vec<CompletionItem> {
    let needle = word.to_lowercase();
    let mut ranked: Vec<(u8, CompletionItem)> = items
        .into_iter()
        .filter_map(|item| {
            let group = match_group(&item.label, word, &needle)?;
            Some((group * 2 + u8::from(item.deprecated), item))
        })
        .collect();
    ranked.sort_by_key(|(key, _)| *key);
    ranked.into_iter().map(|(_, item)| item).collect()
}

fn match_group(label: &str, word: &str, needle: &str) -> Option<u8> {
    if word.is_empty() || label.starts_with(word) {
        return Some(0);
    }
    let haystack = label.to_lowercase();
    if haystack.starts_with(needle) {
        Some(1)
    } else if haystack.contains(needle) {
        Some(2)
    } else if strsim::jaro_winkler(needle, &haystack) >= MIN_SIMILARITY {
        Some(3)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_test_utils::{extract_cursor, swapi_schema};

    fn complete(input: &str) -> Vec<CompletionItem> {
        let (source, position) = extract_cursor(input);
        completions(&swapi_schema(), &source, position)
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_root_fields() {
        let items = complete("{ * }");
        let labels = labels(&items);
        assert_eq!(
            labels,
            [
                "allFilms",
                "film",
                "allPeople",
                "person",
                "allSpecies",
                "allStarships",
                "node",
                "__typename"
            ]
        );
        let films = &items[0];
        assert_eq!(films.kind, CompletionKind::Field);
        assert_eq!(films.detail.as_deref(), Some("FilmsConnection"));
    }

    #[test]
    fn test_nested_fields_follow_the_path() {
        let items = complete("{ allFilms { edges { node { * } } } }");
        let labels = labels(&items);
        assert!(labels.contains(&"title"));
        assert!(labels.contains(&"speciesConnection"));
        assert!(!labels.contains(&"allFilms"));
        assert_eq!(labels.last(), Some(&"__typename"));
    }

    #[test]
    fn test_deprecated_fields_rank_last() {
        let items = complete("{ film { * } }");
        let created = items.iter().position(|i| i.label == "created").unwrap();
        let title = items.iter().position(|i| i.label == "title").unwrap();
        assert!(items[created].deprecated);
        assert!(created > title);
    }

    #[test]
    fn test_partial_word_filters_and_ranks() {
        let items = complete("{ allFilms { edges { node { ti* } } } }");
        assert_eq!(labels(&items).first(), Some(&"title"));
        assert!(!labels(&items).contains(&"director"));
    }

    #[test]
    fn test_fields_in_unclosed_selection_set() {
        let items = complete("{ allFilms { *");
        assert!(labels(&items).contains(&"totalCount"));
    }

    #[test]
    fn test_argument_names() {
        let items = complete("{ allFilms(*) { totalCount } }");
        assert_eq!(labels(&items), ["after", "first", "before", "last"]);
        assert!(items.iter().all(|i| i.kind == CompletionKind::Argument));
    }

    #[test]
    fn test_boolean_directive_argument_value() {
        let items = complete("{ allFilms @include(if: *) { totalCount } }");
        assert_eq!(labels(&items), ["true", "false"]);
    }

    #[test]
    fn test_variables_after_dollar() {
        let items = complete("query Q($first: Int, $last: Int) { allFilms(first: $*) { totalCount } }");
        assert_eq!(labels(&items), ["first", "last"]);
        assert_eq!(items[0].detail.as_deref(), Some("Int"));
    }

    #[test]
    fn test_directives_after_at() {
        let items = complete("{ allFilms @* { totalCount } }");
        let labels = labels(&items);
        assert!(labels.contains(&"include"));
        assert!(labels.contains(&"skip"));
        assert!(!labels.contains(&"deprecated"));
    }

    #[test]
    fn test_input_types_in_variable_definitions() {
        let items = complete("query Q($first: *) { allFilms { totalCount } }");
        let labels = labels(&items);
        assert!(labels.contains(&"Int"));
        assert!(labels.contains(&"String"));
        assert!(!labels.contains(&"Film"));
    }

    #[test]
    fn test_inline_fragment_type_condition() {
        let items = complete("{ node(id: \"1\") { ... on * } }");
        let labels = labels(&items);
        assert_eq!(labels[0], "Node");
        assert!(labels.contains(&"Film"));
        assert!(labels.contains(&"Starship"));
        assert!(!labels.contains(&"PageInfo"));
    }

    #[test]
    fn test_fragment_spread_names() {
        let items = complete("{ film { ...* } }\nfragment FilmFields on Film { title }");
        assert_eq!(labels(&items), ["FilmFields"]);
        assert_eq!(items[0].detail.as_deref(), Some("on Film"));
    }

    #[test]
    fn test_definition_keywords() {
        let items = complete("*");
        assert_eq!(labels(&items), ["query", "fragment"]);
    }

    #[test]
    fn test_match_group() {
        assert_eq!(match_group("title", "ti", "ti"), Some(0));
        assert_eq!(match_group("Title", "ti", "ti"), Some(1));
        assert_eq!(match_group("subtitle", "tit", "tit"), Some(2));
        assert_eq!(match_group("director", "xyz", "xyz"), None);
    }
}

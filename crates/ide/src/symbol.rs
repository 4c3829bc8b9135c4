//! Cursor lookups over the concrete syntax tree.
//!
//! Two questions get answered here. [`symbol_at`] finds the name under the
//! cursor for hover. [`scope_at`] finds the syntactic region the cursor is in
//! for completion, which still works in half-typed documents.
//!
//! Both walks carry the type each selection set is selected on, resolved
//! against the schema as they descend.

use apollo_compiler::ast::OperationType;
use apollo_compiler::Schema;
use apollo_parser::cst::{self, CstNode};
use apollo_parser::{SyntaxToken, SyntaxTree};
use graphql_types::OffsetRange;

use crate::helpers::field_type_name;

pub fn node_range<N: CstNode>(node: &N) -> OffsetRange {
    let range = node.syntax().text_range();
    OffsetRange::new(range.start().into(), range.end().into())
}

/// Range of a name's identifier token, without surrounding trivia.
fn name_range(name: &cst::Name) -> OffsetRange {
    name.ident_token().map_or_else(
        || node_range(name),
        |token| {
            let range = token.text_range();
            OffsetRange::new(range.start().into(), range.end().into())
        },
    )
}

/// Whether the cursor sits between an opening and a closing bracket. An
/// unclosed region runs to the end of the document.
fn between(open: Option<SyntaxToken>, close: Option<SyntaxToken>, offset: usize) -> bool {
    let Some(open) = open else {
        return false;
    };
    let after_open = offset >= usize::from(open.text_range().end());
    let before_close = close.is_none_or(|c| offset <= usize::from(c.text_range().start()));
    after_open && before_close
}

fn curly_start(set: &cst::SelectionSet) -> usize {
    set.l_curly_token()
        .map_or_else(|| node_range(set).start, |t| t.text_range().start().into())
}

/// What the cursor is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A field selection. `parent` is the type it is selected on when the
    /// path to it resolves against the schema.
    Field {
        parent: Option<String>,
        name: String,
    },
    Type {
        name: String,
    },
    Argument {
        owner: ArgumentOwner,
        name: String,
    },
    Directive {
        name: String,
    },
    Variable {
        name: String,
    },
    FragmentSpread {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentOwner {
    Field {
        parent: Option<String>,
        field: String,
    },
    Directive(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAt {
    pub symbol: Symbol,
    pub range: OffsetRange,
}

/// Name under the cursor, treating the position just after a name as on it.
pub fn symbol_at(tree: &SyntaxTree, schema: &Schema, offset: usize) -> Option<SymbolAt> {
    let finder = SymbolFinder { schema, offset };
    tree.document()
        .definitions()
        .find_map(|definition| match definition {
            cst::Definition::OperationDefinition(op) => finder.operation(&op),
            cst::Definition::FragmentDefinition(fragment) => finder.fragment(&fragment),
            _ => None,
        })
}

struct SymbolFinder<'a> {
    schema: &'a Schema,
    offset: usize,
}

impl SymbolFinder<'_> {
    fn hit(&self, name: &cst::Name, symbol: Symbol) -> Option<SymbolAt> {
        let range = name_range(name);
        range.touches(self.offset).then_some(SymbolAt { symbol, range })
    }

    fn operation(&self, op: &cst::OperationDefinition) -> Option<SymbolAt> {
        if !node_range(op).touches(self.offset) {
            return None;
        }
        if let Some(definitions) = op.variable_definitions() {
            for definition in definitions.variable_definitions() {
                let found = definition
                    .variable()
                    .and_then(|v| self.variable(&v))
                    .or_else(|| definition.ty().and_then(|ty| self.type_reference(&ty)))
                    .or_else(|| {
                        definition
                            .default_value()
                            .and_then(|d| d.value())
                            .and_then(|v| self.value(&v))
                    });
                if found.is_some() {
                    return found;
                }
            }
        }
        if let Some(found) = op.directives().and_then(|d| self.directives(&d)) {
            return Some(found);
        }
        let root = root_type_name(self.schema, op);
        op.selection_set()
            .and_then(|set| self.selection_set(&set, root.as_deref()))
    }

    fn fragment(&self, fragment: &cst::FragmentDefinition) -> Option<SymbolAt> {
        if !node_range(fragment).touches(self.offset) {
            return None;
        }
        let type_name = fragment
            .type_condition()
            .and_then(|c| c.named_type())
            .and_then(|n| n.name());
        if let Some(name) = &type_name {
            let symbol = Symbol::Type {
                name: name.text().to_string(),
            };
            if let Some(found) = self.hit(name, symbol) {
                return Some(found);
            }
        }
        if let Some(found) = fragment.directives().and_then(|d| self.directives(&d)) {
            return Some(found);
        }
        let parent = type_name.map(|n| n.text().to_string());
        fragment
            .selection_set()
            .and_then(|set| self.selection_set(&set, parent.as_deref()))
    }

    fn selection_set(&self, set: &cst::SelectionSet, parent: Option<&str>) -> Option<SymbolAt> {
        if !node_range(set).touches(self.offset) {
            return None;
        }
        set.selections().find_map(|selection| match selection {
            cst::Selection::Field(field) => self.field(&field, parent),
            cst::Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name().and_then(|f| f.name());
                name.and_then(|name| {
                    let symbol = Symbol::FragmentSpread {
                        name: name.text().to_string(),
                    };
                    self.hit(&name, symbol)
                })
                .or_else(|| spread.directives().and_then(|d| self.directives(&d)))
            }
            cst::Selection::InlineFragment(inline) => {
                let condition = inline
                    .type_condition()
                    .and_then(|c| c.named_type())
                    .and_then(|n| n.name());
                if let Some(name) = &condition {
                    let symbol = Symbol::Type {
                        name: name.text().to_string(),
                    };
                    if let Some(found) = self.hit(name, symbol) {
                        return Some(found);
                    }
                }
                if let Some(found) = inline.directives().and_then(|d| self.directives(&d)) {
                    return Some(found);
                }
                let scope = condition
                    .map(|n| n.text().to_string())
                    .or_else(|| parent.map(ToString::to_string));
                inline
                    .selection_set()
                    .and_then(|nested| self.selection_set(&nested, scope.as_deref()))
            }
        })
    }

    fn field(&self, field: &cst::Field, parent: Option<&str>) -> Option<SymbolAt> {
        let name = field.name()?;
        let field_name = name.text().to_string();

        let symbol = Symbol::Field {
            parent: parent.map(ToString::to_string),
            name: field_name.clone(),
        };
        if let Some(found) = self.hit(&name, symbol) {
            return Some(found);
        }

        if let Some(arguments) = field.arguments() {
            for argument in arguments.arguments() {
                if let Some(arg_name) = argument.name() {
                    let symbol = Symbol::Argument {
                        owner: ArgumentOwner::Field {
                            parent: parent.map(ToString::to_string),
                            field: field_name.clone(),
                        },
                        name: arg_name.text().to_string(),
                    };
                    if let Some(found) = self.hit(&arg_name, symbol) {
                        return Some(found);
                    }
                }
                if let Some(found) = argument.value().and_then(|v| self.value(&v)) {
                    return Some(found);
                }
            }
        }

        if let Some(found) = field.directives().and_then(|d| self.directives(&d)) {
            return Some(found);
        }

        let nested = field.selection_set()?;
        let field_type = parent.and_then(|p| field_type_name(self.schema, p, &field_name));
        self.selection_set(&nested, field_type.as_deref())
    }

    fn directives(&self, directives: &cst::Directives) -> Option<SymbolAt> {
        directives.directives().find_map(|directive| {
            let name = directive.name()?;
            let directive_name = name.text().to_string();
            let symbol = Symbol::Directive {
                name: directive_name.clone(),
            };
            if let Some(found) = self.hit(&name, symbol) {
                return Some(found);
            }
            directive.arguments()?.arguments().find_map(|argument| {
                let from_name = argument.name().and_then(|arg_name| {
                    let symbol = Symbol::Argument {
                        owner: ArgumentOwner::Directive(directive_name.clone()),
                        name: arg_name.text().to_string(),
                    };
                    self.hit(&arg_name, symbol)
                });
                from_name.or_else(|| argument.value().and_then(|v| self.value(&v)))
            })
        })
    }

    fn variable(&self, variable: &cst::Variable) -> Option<SymbolAt> {
        let name = variable.name()?;
        let mut range = name_range(&name);
        if let Some(dollar) = variable.dollar_token() {
            range.start = dollar.text_range().start().into();
        }
        if !range.touches(self.offset) {
            return None;
        }
        Some(SymbolAt {
            symbol: Symbol::Variable {
                name: name.text().to_string(),
            },
            range,
        })
    }

    fn value(&self, value: &cst::Value) -> Option<SymbolAt> {
        match value {
            cst::Value::Variable(variable) => self.variable(variable),
            cst::Value::ListValue(list) => list.values().find_map(|v| self.value(&v)),
            cst::Value::ObjectValue(object) => object
                .object_fields()
                .find_map(|f| f.value().and_then(|v| self.value(&v))),
            _ => None,
        }
    }

    fn type_reference(&self, ty: &cst::Type) -> Option<SymbolAt> {
        let name = innermost_named_type(ty)?.name()?;
        let symbol = Symbol::Type {
            name: name.text().to_string(),
        };
        self.hit(&name, symbol)
    }
}

fn innermost_named_type(ty: &cst::Type) -> Option<cst::NamedType> {
    match ty {
        cst::Type::NamedType(named) => Some(named.clone()),
        cst::Type::ListType(list) => list.ty().and_then(|inner| innermost_named_type(&inner)),
        cst::Type::NonNullType(non_null) => non_null.named_type().or_else(|| {
            non_null
                .list_type()
                .and_then(|list| list.ty())
                .and_then(|inner| innermost_named_type(&inner))
        }),
    }
}

/// Source text of a type reference, without surrounding trivia.
pub fn type_text(ty: &cst::Type) -> String {
    match ty {
        cst::Type::NamedType(named) => named
            .name()
            .map(|n| n.text().to_string())
            .unwrap_or_default(),
        cst::Type::ListType(list) => {
            format!("[{}]", list.ty().map(|t| type_text(&t)).unwrap_or_default())
        }
        cst::Type::NonNullType(non_null) => {
            let inner = non_null
                .named_type()
                .map(|n| type_text(&cst::Type::NamedType(n)))
                .or_else(|| non_null.list_type().map(|l| type_text(&cst::Type::ListType(l))))
                .unwrap_or_default();
            format!("{inner}!")
        }
    }
}

pub fn operation_kind(op: &cst::OperationDefinition) -> OperationType {
    match op.operation_type() {
        Some(ty) if ty.mutation_token().is_some() => OperationType::Mutation,
        Some(ty) if ty.subscription_token().is_some() => OperationType::Subscription,
        _ => OperationType::Query,
    }
}

fn root_type_name(schema: &Schema, op: &cst::OperationDefinition) -> Option<String> {
    schema
        .root_operation(operation_kind(op))
        .map(ToString::to_string)
}

/// Operation whose text contains the offset.
pub fn operation_at(tree: &SyntaxTree, offset: usize) -> Option<cst::OperationDefinition> {
    tree.document()
        .definitions()
        .find_map(|definition| match definition {
            cst::Definition::OperationDefinition(op) if node_range(&op).touches(offset) => {
                Some(op)
            }
            _ => None,
        })
}

/// Syntactic region around the cursor, as far as completion cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Between definitions.
    TopLevel,
    /// Operation header before its selection set.
    OperationHeader(OperationType),
    /// Fragment header before its selection set.
    FragmentHeader,
    /// Inside the variable definitions parentheses.
    VariableDefinitions { range: OffsetRange },
    /// Inside a selection set. `parent` is unknown when the path leaves the
    /// schema.
    SelectionSet { parent: Option<String> },
    /// Inside a field's argument parentheses.
    FieldArguments {
        parent: Option<String>,
        field: String,
        range: OffsetRange,
    },
    /// Inside a directive's argument parentheses.
    DirectiveArguments { directive: String, range: OffsetRange },
}

pub fn scope_at(tree: &SyntaxTree, schema: &Schema, offset: usize) -> Scope {
    let walker = ScopeWalker { schema, offset };
    tree.document()
        .definitions()
        .find_map(|definition| match definition {
            cst::Definition::OperationDefinition(op) => walker.operation(&op),
            cst::Definition::FragmentDefinition(fragment) => walker.fragment(&fragment),
            _ => None,
        })
        .unwrap_or(Scope::TopLevel)
}

struct ScopeWalker<'a> {
    schema: &'a Schema,
    offset: usize,
}

impl ScopeWalker<'_> {
    fn operation(&self, op: &cst::OperationDefinition) -> Option<Scope> {
        let range = node_range(op);
        if self.offset < range.start {
            return None;
        }
        if let Some(definitions) = op.variable_definitions() {
            if between(
                definitions.l_paren_token(),
                definitions.r_paren_token(),
                self.offset,
            ) {
                let range = node_range(&definitions);
                return Some(Scope::VariableDefinitions { range });
            }
        }
        if let Some(directives) = op.directives() {
            if let Some(scope) = self.directives(&directives) {
                return Some(scope);
            }
        }
        match op.selection_set() {
            Some(set) => {
                if between(set.l_curly_token(), set.r_curly_token(), self.offset) {
                    let root = root_type_name(self.schema, op);
                    Some(self.selection_set(&set, root))
                } else if self.offset <= curly_start(&set) {
                    Some(Scope::OperationHeader(operation_kind(op)))
                } else {
                    None
                }
            }
            None => Some(Scope::OperationHeader(operation_kind(op))),
        }
    }

    fn fragment(&self, fragment: &cst::FragmentDefinition) -> Option<Scope> {
        let range = node_range(fragment);
        if self.offset < range.start {
            return None;
        }
        if let Some(directives) = fragment.directives() {
            if let Some(scope) = self.directives(&directives) {
                return Some(scope);
            }
        }
        match fragment.selection_set() {
            Some(set) => {
                if between(set.l_curly_token(), set.r_curly_token(), self.offset) {
                    let parent = fragment
                        .type_condition()
                        .and_then(|c| c.named_type())
                        .and_then(|n| n.name())
                        .map(|n| n.text().to_string());
                    Some(self.selection_set(&set, parent))
                } else if self.offset <= curly_start(&set) {
                    Some(Scope::FragmentHeader)
                } else {
                    None
                }
            }
            None => Some(Scope::FragmentHeader),
        }
    }

    fn selection_set(&self, set: &cst::SelectionSet, parent: Option<String>) -> Scope {
        for selection in set.selections() {
            let found = match selection {
                cst::Selection::Field(field) => self.field(&field, parent.as_deref()),
                cst::Selection::FragmentSpread(spread) => {
                    spread.directives().and_then(|d| self.directives(&d))
                }
                cst::Selection::InlineFragment(inline) => {
                    let nested = inline.selection_set().filter(|nested| {
                        between(nested.l_curly_token(), nested.r_curly_token(), self.offset)
                    });
                    match nested {
                        Some(nested) => {
                            let condition = inline
                                .type_condition()
                                .and_then(|c| c.named_type())
                                .and_then(|n| n.name())
                                .map(|n| n.text().to_string())
                                .or_else(|| parent.clone());
                            Some(self.selection_set(&nested, condition))
                        }
                        None => inline.directives().and_then(|d| self.directives(&d)),
                    }
                }
            };
            if let Some(scope) = found {
                return scope;
            }
        }
        Scope::SelectionSet { parent }
    }

    fn field(&self, field: &cst::Field, parent: Option<&str>) -> Option<Scope> {
        let field_name = field.name().map(|n| n.text().to_string())?;

        if let Some(arguments) = field.arguments() {
            if between(arguments.l_paren_token(), arguments.r_paren_token(), self.offset) {
                let range = node_range(&arguments);
                return Some(Scope::FieldArguments {
                    parent: parent.map(ToString::to_string),
                    field: field_name,
                    range,
                });
            }
        }
        if let Some(scope) = field.directives().and_then(|d| self.directives(&d)) {
            return Some(scope);
        }

        let nested = field.selection_set()?;
        if !between(nested.l_curly_token(), nested.r_curly_token(), self.offset) {
            return None;
        }
        let field_type = parent.and_then(|p| field_type_name(self.schema, p, &field_name));
        Some(self.selection_set(&nested, field_type))
    }

    fn directives(&self, directives: &cst::Directives) -> Option<Scope> {
        directives.directives().find_map(|directive| {
            let arguments = directive.arguments()?;
            if !between(arguments.l_paren_token(), arguments.r_paren_token(), self.offset) {
                return None;
            }
            let range = node_range(&arguments);
            let name = directive.name()?.text().to_string();
            Some(Scope::DirectiveArguments {
                directive: name,
                range,
            })
        })
    }
}

//! Foundation types for the GraphQL playground.
//!
//! This crate provides shared types used across the playground stack.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Coordinate conventions
//!
//! Two position conventions meet in the playground:
//!
//! - the language service speaks [`Position`]: 0-based `line` and `character`
//! - the editor widget speaks [`EditorPosition`]: 1-based `line_number` and `column`
//!
//! Every crossing between the two goes through [`EditorPosition::to_service`] /
//! [`EditorPosition::from_service`] so both directions stay consistent.
//!
//! # Type Categories
//!
//! - **Language types**: [`LanguageId`]
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`], [`LineIndex`]
//! - **Editor coordinates**: [`EditorPosition`], [`EditorRange`]
//! - **Severity types**: [`DiagnosticSeverity`]
//! - **Edit types**: [`TextEdit`]

mod edits;
mod editor;
mod language;
mod line_index;
mod position;
mod severity;

pub use edits::TextEdit;
pub use editor::{EditorPosition, EditorRange};
pub use language::LanguageId;
pub use line_index::LineIndex;
pub use position::{OffsetRange, Position, Range};
pub use severity::DiagnosticSeverity;

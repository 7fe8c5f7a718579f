#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for syntaxis.
//!
//! - **Declarations**: node kinds (`KindTable`) and tokens (`TokenTable`)
//! - **Compiled output**: the `Grammar` entity model consumed by parsing engines
//! - **Positions**: `SourceLocation` and `SourceSpan` shared by the lexer and diagnostics

pub mod grammar;
mod invariants;
mod kinds;
mod span;
mod tokens;


// ============================================================================
// Declarations
// ============================================================================

pub use kinds::{KindTable, NodeKind};
pub use tokens::{
    Recognizer, TokenDecl, TokenDeclBuilder, TokenId, TokenParent, TokenRole, TokenRoles,
    TokenTable, TokenTableBuilder, TokenTableError, Visibility,
};

// ============================================================================
// Compiled Grammar
// ============================================================================

pub use grammar::{
    Grammar, GrammarError, GrammarParts, RankIndex, RankedType, RankedTypeId, Rule, RuleId,
    RuleOrigin, RuleStep,
};

// ============================================================================
// Positions
// ============================================================================

pub use span::{SourceLocation, SourceSpan, Spanned};

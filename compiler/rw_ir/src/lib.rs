//! Runway IR - parsed declaration trees.
//!
//! This crate holds the data the parser hands to the semantic core:
//! - [`Span`] for source locations
//! - [`Module`] / [`Decl`] for top-level declarations
//! - [`TypeExpr`] for nested type expressions
//! - [`Literal`] for `param`/`var` defaults
//! - [`Block`] for unevaluated rule bodies
//!
//! The tree is immutable once built. Callers without a parser (the prelude,
//! tests, embedders) use the constructors on each node type.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod decl;
mod span;

pub use decl::{
    Block, Decl, DeclKind, FieldDecl, Literal, LiteralKind, Module, RuleDef, RuleForDef, RuleRef,
    TypeExpr, TypeExprKind, VariantDecl,
};
pub use span::Span;

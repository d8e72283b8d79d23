//! Constructors for building declaration trees in code.
//!
//! The prelude and tests have no parser to lean on. Every constructor uses
//! `Span::DUMMY`; chain `with_span` to attach a location.

use super::{
    Block, Decl, DeclKind, FieldDecl, Literal, LiteralKind, RuleDef, RuleForDef, TypeExpr,
    TypeExprKind, VariantDecl,
};
use crate::Span;

impl Decl {
    pub fn new(kind: DeclKind) -> Self {
        Decl {
            kind,
            span: Span::DUMMY,
        }
    }

    pub fn type_decl(name: impl Into<String>, ty: TypeExpr) -> Self {
        Decl::new(DeclKind::Type {
            name: name.into(),
            ty,
        })
    }

    pub fn param(name: impl Into<String>, ty: TypeExpr, default: Option<Literal>) -> Self {
        Decl::new(DeclKind::Param {
            name: name.into(),
            ty,
            default,
        })
    }

    pub fn var(name: impl Into<String>, ty: TypeExpr, default: Option<Literal>) -> Self {
        Decl::new(DeclKind::Var {
            name: name.into(),
            ty,
            default,
        })
    }

    pub fn rule(name: impl Into<String>, body: impl Into<String>) -> Self {
        Decl::new(DeclKind::Rule(RuleDef {
            name: name.into(),
            body: Block::new(body),
        }))
    }

    pub fn rule_for(
        name: impl Into<String>,
        index: impl Into<String>,
        iterable: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Decl::new(DeclKind::RuleFor(RuleForDef {
            name: name.into(),
            index: index.into(),
            iterable: iterable.into(),
            body: Block::new(body),
        }))
    }

    pub fn unknown(kind: impl Into<String>) -> Self {
        Decl::new(DeclKind::Unknown { kind: kind.into() })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind) -> Self {
        TypeExpr {
            kind,
            span: Span::DUMMY,
        }
    }

    pub fn alias(name: impl Into<String>) -> Self {
        TypeExpr::new(TypeExprKind::Alias(name.into()))
    }

    pub fn range(low: i64, high: i64) -> Self {
        TypeExpr::new(TypeExprKind::Range { low, high })
    }

    pub fn record(fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        TypeExpr::new(TypeExprKind::Record {
            fields: fields.into_iter().collect(),
        })
    }

    pub fn either(variants: impl IntoIterator<Item = VariantDecl>) -> Self {
        TypeExpr::new(TypeExprKind::Either {
            variants: variants.into_iter().collect(),
        })
    }

    /// `Array<value>[index]`.
    pub fn array(value: TypeExpr, index: TypeExpr) -> Self {
        TypeExpr::generic("Array", vec![value], Some(index))
    }

    pub fn generic(base: impl Into<String>, args: Vec<TypeExpr>, index: Option<TypeExpr>) -> Self {
        TypeExpr::new(TypeExprKind::Generic {
            base: base.into(),
            args,
            index: index.map(Box::new),
        })
    }

    pub fn unknown(kind: impl Into<String>) -> Self {
        TypeExpr::new(TypeExprKind::Unknown { kind: kind.into() })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        FieldDecl {
            name: name.into(),
            ty,
            span: Span::DUMMY,
        }
    }
}

impl VariantDecl {
    /// Variant without a payload.
    pub fn enumeration(name: impl Into<String>) -> Self {
        VariantDecl {
            name: name.into(),
            fields: None,
            span: Span::DUMMY,
        }
    }

    /// Variant carrying a record payload.
    pub fn record(name: impl Into<String>, fields: impl IntoIterator<Item = FieldDecl>) -> Self {
        VariantDecl {
            name: name.into(),
            fields: Some(fields.into_iter().collect()),
            span: Span::DUMMY,
        }
    }
}

impl Literal {
    pub fn number(value: i64) -> Self {
        Literal {
            kind: LiteralKind::Number(value),
            span: Span::DUMMY,
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Literal {
            kind: LiteralKind::Ident(name.into()),
            span: Span::DUMMY,
        }
    }
}

impl Block {
    pub fn new(source: impl Into<String>) -> Self {
        Block {
            source: source.into(),
            span: Span::DUMMY,
        }
    }
}

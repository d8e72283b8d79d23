//! Parsed declaration tree.
//!
//! The parser produces one [`Module`] per source file: an ordered list of
//! top-level [`Decl`]s whose type expressions nest arbitrarily. The semantic
//! core walks this tree read-only and never re-validates syntax.
//!
//! Every node kind is a closed enum. Parser output the core does not know
//! about is preserved in an `Unknown { kind }` variant so the loader can
//! report it instead of silently dropping it.

mod build;

use std::fmt;

use crate::Span;

/// A parsed source module: top-level declarations in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub decls: Vec<Decl>,
}

impl Module {
    pub fn new(decls: Vec<Decl>) -> Self {
        Module { decls }
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    /// `type Name: <type>;`
    Type { name: String, ty: TypeExpr },
    /// `param name: <type> = <literal>;` (the default is mandatory)
    Param {
        name: String,
        ty: TypeExpr,
        default: Option<Literal>,
    },
    /// `var name: <type> [= <literal>];`
    Var {
        name: String,
        ty: TypeExpr,
        default: Option<Literal>,
    },
    /// `rule name { ... }`
    Rule(RuleDef),
    /// `rule name for index in iterable { ... }`
    RuleFor(RuleForDef),
    /// Declaration kind the parser emitted but the core does not handle.
    Unknown { kind: String },
}

impl DeclKind {
    /// The parser's discriminator string for this kind.
    pub fn kind_name(&self) -> &str {
        match self {
            DeclKind::Type { .. } => "typedecl",
            DeclKind::Param { .. } => "paramdecl",
            DeclKind::Var { .. } => "vardecl",
            DeclKind::Rule(_) => "rule",
            DeclKind::RuleFor(_) => "rulefor",
            DeclKind::Unknown { kind } => kind,
        }
    }
}

/// A type expression, either on the right of a type declaration or nested
/// inside another type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExprKind {
    /// Reference to a previously declared type by name.
    Alias(String),
    /// `low..high`, inclusive on both ends.
    Range { low: i64, high: i64 },
    /// `record { field: <type>, ... }`
    Record { fields: Vec<FieldDecl> },
    /// `either { Tag, Tag { field: <type> }, ... }`
    Either { variants: Vec<VariantDecl> },
    /// `Base<args>[index]`, e.g. `Array<Cell>[1..5]`.
    Generic {
        base: String,
        args: Vec<TypeExpr>,
        index: Option<Box<TypeExpr>>,
    },
    /// Type expression kind the parser emitted but the core does not handle.
    Unknown { kind: String },
}

impl TypeExprKind {
    pub fn kind_name(&self) -> &str {
        match self {
            TypeExprKind::Alias(_) => "alias",
            TypeExprKind::Range { .. } => "range",
            TypeExprKind::Record { .. } => "record",
            TypeExprKind::Either { .. } => "either",
            TypeExprKind::Generic { .. } => "generic",
            TypeExprKind::Unknown { kind } => kind,
        }
    }
}

/// One `name: <type>` entry of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// One alternative of an either type.
///
/// `fields == None` is a plain enum variant (`enumvariant` in parser
/// output); `Some` carries the nested record layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDecl {
    pub name: String,
    pub fields: Option<Vec<FieldDecl>>,
    pub span: Span,
}

impl VariantDecl {
    pub fn is_enum(&self) -> bool {
        self.fields.is_none()
    }
}

/// Literal default on a `param` or `var` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    Number(i64),
    /// A constant referenced by name, such as an enum tag (`True`).
    Ident(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LiteralKind::Number(n) => write!(f, "{n}"),
            LiteralKind::Ident(name) => write!(f, "{name}"),
        }
    }
}

/// An unevaluated rule body.
///
/// The core stores rule bodies only so they can be handed to the formatter;
/// `source` is the body text exactly as the parser captured it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub source: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleForDef {
    pub name: String,
    /// Loop variable bound inside the body.
    pub index: String,
    /// Variable whose index domain the rule ranges over.
    pub iterable: String,
    pub body: Block,
}

/// Borrowed view of either rule form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleRef<'a> {
    Rule(&'a RuleDef),
    RuleFor(&'a RuleForDef),
}

impl<'a> RuleRef<'a> {
    pub fn name(self) -> &'a str {
        match self {
            RuleRef::Rule(rule) => &rule.name,
            RuleRef::RuleFor(rule) => &rule.name,
        }
    }

    pub fn body(self) -> &'a Block {
        match self {
            RuleRef::Rule(rule) => &rule.body,
            RuleRef::RuleFor(rule) => &rule.body,
        }
    }
}

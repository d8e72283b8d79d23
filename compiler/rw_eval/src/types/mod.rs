//! Declared types.
//!
//! A [`Type`] is a cheap handle onto one shared type object. Every
//! declaration produces exactly one object; aliases and repeated references
//! hand out clones of the same handle, so identity (`Type::same`) is pointer
//! identity and never structural.
//!
//! # Construction
//!
//! `Type::make` dispatches on the declaration's kind:
//! - `range` builds a [`RangeType`]
//! - `record` builds a [`RecordType`], resolving field types recursively
//! - `either` builds an [`EitherType`] and binds its enum tags as constants
//! - `generic` over `Array` builds an [`ArrayType`]
//! - `alias` returns the already-registered handle unchanged

mod either;
mod shapes;

use std::fmt;
use std::rc::Rc;

use rw_ir::{Span, TypeExpr, TypeExprKind};

use crate::environment::Environment;
use crate::errors::{duplicate_declaration, unknown_declaration_kind, unknown_type, EvalResult};
use crate::shared::Shared;
use crate::value::{ArrayValue, EitherValue, RangeValue, RecordValue, Value};

pub use either::{EitherTag, EitherType, EitherVariant};
pub use shapes::{ArrayType, RangeType, RecordType, MAX_ARRAY_LEN};

/// Handle to a declared type.
#[derive(Clone, Debug)]
pub enum Type {
    Range(Rc<RangeType>),
    Record(Rc<RecordType>),
    Either(Rc<EitherType>),
    Array(Rc<ArrayType>),
}

impl Type {
    /// Build (or, for aliases, look up) the type described by `decl`.
    ///
    /// `name` is attached for rendering only. Aliases ignore it: the
    /// referenced type keeps its own name.
    #[tracing::instrument(level = "trace", skip(decl, env), fields(kind = decl.kind.kind_name()))]
    pub fn make(decl: &TypeExpr, env: &mut Environment, name: Option<&str>) -> EvalResult<Type> {
        Self::make_kind(decl, env, name).map_err(|e| e.with_span(decl.span))
    }

    fn make_kind(decl: &TypeExpr, env: &mut Environment, name: Option<&str>) -> EvalResult<Type> {
        let span = decl.span;
        match &decl.kind {
            TypeExprKind::Alias(alias) => env.resolve_type(alias),
            TypeExprKind::Range { low, high } => {
                Ok(Type::Range(Rc::new(RangeType::new(*low, *high, name, span)?)))
            }
            TypeExprKind::Record { fields } => Ok(Type::Record(Rc::new(RecordType::make(
                fields, env, name, span,
            )?))),
            TypeExprKind::Either { variants } => {
                let either = EitherType::make(variants, env, name, span)?;
                register_tags(&either, env)?;
                Ok(Type::Either(either))
            }
            TypeExprKind::Generic { base, args, index } => {
                if base != "Array" {
                    return Err(unknown_type(base));
                }
                let array = ArrayType::make(base, args, index.as_deref(), env, name, span)?;
                Ok(Type::Array(Rc::new(array)))
            }
            TypeExprKind::Unknown { kind } => Err(unknown_declaration_kind(kind)),
        }
    }

    /// Fresh, structurally valid value of this type.
    ///
    /// Ranges start at `low`, eithers at their first variant, and records
    /// and arrays default every child.
    pub fn make_default_value(&self) -> Value {
        match self {
            Type::Range(range) => Value::Range(RangeValue::new(Rc::clone(range))),
            Type::Record(record) => Value::Record(RecordValue::new(Rc::clone(record))),
            Type::Either(either) => Value::Either(EitherValue::new(either)),
            Type::Array(array) => Value::Array(ArrayValue::new(Rc::clone(array))),
        }
    }

    /// Identity comparison: both handles refer to the same type object.
    pub fn same(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Range(a), Type::Range(b)) => Rc::ptr_eq(a, b),
            (Type::Record(a), Type::Record(b)) => Rc::ptr_eq(a, b),
            (Type::Either(a), Type::Either(b)) => Rc::ptr_eq(a, b),
            (Type::Array(a), Type::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Display name attached at declaration, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Range(t) => t.name(),
            Type::Record(t) => t.name(),
            Type::Either(t) => t.name(),
            Type::Array(t) => t.name(),
        }
    }

    /// Location of the declaring type expression.
    pub fn span(&self) -> Span {
        match self {
            Type::Range(t) => t.span(),
            Type::Record(t) => t.span(),
            Type::Either(t) => t.span(),
            Type::Array(t) => t.span(),
        }
    }

    pub fn as_range(&self) -> Option<&Rc<RangeType>> {
        match self {
            Type::Range(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Rc<RecordType>> {
        match self {
            Type::Record(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_either(&self) -> Option<&Rc<EitherType>> {
        match self {
            Type::Either(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Rc<ArrayType>> {
        match self {
            Type::Array(t) => Some(t),
            _ => None,
        }
    }
}

/// Types compare by identity, never structurally.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Range(t) => write!(f, "{t}"),
            Type::Record(t) => write!(f, "{t}"),
            Type::Either(t) => write!(f, "{t}"),
            Type::Array(t) => write!(f, "{t}"),
        }
    }
}

/// Bind every enum variant's tag as a constant in the declaring scope, so
/// literals such as `True` resolve by name.
///
/// A tag may replace an earlier tag of the same name, but never a variable
/// declared in the same frame, whatever the redefinition policy.
fn register_tags(either: &Rc<EitherType>, env: &mut Environment) -> EvalResult<()> {
    let enums = || either.variants().iter().filter(|v| v.is_enum());
    for variant in enums() {
        if let Some(existing) = env.get_local_var(variant.name()) {
            if !matches!(*existing.borrow(), Value::Tag(_)) {
                return Err(duplicate_declaration(variant.name()).with_span(either.span()));
            }
        }
    }
    for variant in enums() {
        if let Some(tag) = either.tag(variant.index()) {
            env.assign_var(variant.name(), Shared::new(Value::Tag(tag)))
                .map_err(|e| e.with_span(either.span()))?;
        }
    }
    Ok(())
}

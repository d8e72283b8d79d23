//! Error types for type construction, value mutation and loading.
//!
//! `EvalErrorKind` is the structured category; callers match on it rather
//! than on message text. Factory functions below are the public way to build
//! errors so messages stay consistent across the crate.
//!
//! # Error codes
//!
//! Every kind maps to a stable `E6xxx` code:
//! - E60xx: name resolution
//! - E61xx: type declaration (detected in `Type::make`)
//! - E62xx: value mutation and lookup (detected after load)
//! - E63xx: loader

use std::fmt;

use rw_ir::Span;

/// Result of any fallible core operation.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Name resolution
    #[error("unknown type `{name}`")]
    UnknownType { name: String },
    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String },
    #[error("`{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String },

    // Type declaration
    #[error("invalid range {low}..{high}: low bound exceeds high bound")]
    InvalidRange { low: i64, high: i64 },
    #[error("duplicate field `{field}` in {record}")]
    DuplicateField { field: String, record: String },
    #[error("duplicate variant `{variant}` in {either}")]
    DuplicateVariant { variant: String, either: String },
    #[error("array index type must be a range type, found {found}")]
    InvalidIndexType { found: String },
    #[error("{base} expects {expected}, found {found}")]
    GenericArity {
        base: String,
        expected: &'static str,
        found: String,
    },
    #[error("{either} declares no variants")]
    EmptyEither { either: String },
    #[error("array index type {index} spans {len} slots, more than the limit of {max}")]
    ArrayTooLarge { index: String, len: u64, max: u64 },

    // Mutation and lookup
    #[error("value {value} is out of range for {ty} ({low}..{high})")]
    OutOfRange {
        value: i64,
        low: i64,
        high: i64,
        ty: String,
    },
    #[error("type mismatch: expected {expected}, found {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("no field `{field}` on {ty}")]
    UnknownField { field: String, ty: String },
    #[error("index {index} is out of range for {ty} ({low}..{high})")]
    IndexOutOfRange {
        index: i64,
        low: i64,
        high: i64,
        ty: String,
    },

    // Loader
    #[error("unknown declaration kind `{kind}`")]
    UnknownDeclarationKind { kind: String },
    #[error("param `{name}` requires a default value")]
    MissingDefault { name: String },
}

impl EvalErrorKind {
    /// Stable diagnostic code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "E6001",
            Self::UnknownVariable { .. } => "E6002",
            Self::DuplicateDeclaration { .. } => "E6003",
            Self::InvalidRange { .. } => "E6101",
            Self::DuplicateField { .. } => "E6102",
            Self::DuplicateVariant { .. } => "E6103",
            Self::InvalidIndexType { .. } => "E6104",
            Self::GenericArity { .. } => "E6105",
            Self::EmptyEither { .. } => "E6106",
            Self::ArrayTooLarge { .. } => "E6107",
            Self::OutOfRange { .. } => "E6201",
            Self::TypeMismatch { .. } => "E6202",
            Self::UnknownField { .. } => "E6203",
            Self::IndexOutOfRange { .. } => "E6204",
            Self::UnknownDeclarationKind { .. } => "E6301",
            Self::MissingDefault { .. } => "E6302",
        }
    }
}

/// An error with an optional source location.
///
/// Errors raised while loading carry the span of the declaration being
/// processed; errors from post-load mutation usually have none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach a span unless one is already present.
    ///
    /// The innermost location wins: a field's span is more useful than the
    /// span of the declaration that contains it. Dummy spans from nodes built
    /// in code are skipped so an enclosing real span can still apply.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Name resolution

#[cold]
pub fn unknown_type(name: &str) -> EvalError {
    EvalErrorKind::UnknownType {
        name: name.to_owned(),
    }
    .into()
}

#[cold]
pub fn unknown_variable(name: &str) -> EvalError {
    EvalErrorKind::UnknownVariable {
        name: name.to_owned(),
    }
    .into()
}

#[cold]
pub fn duplicate_declaration(name: &str) -> EvalError {
    EvalErrorKind::DuplicateDeclaration {
        name: name.to_owned(),
    }
    .into()
}

// Type declaration

#[cold]
pub fn invalid_range(low: i64, high: i64) -> EvalError {
    EvalErrorKind::InvalidRange { low, high }.into()
}

#[cold]
pub fn duplicate_field(field: &str, record: impl fmt::Display) -> EvalError {
    EvalErrorKind::DuplicateField {
        field: field.to_owned(),
        record: record.to_string(),
    }
    .into()
}

#[cold]
pub fn duplicate_variant(variant: &str, either: impl fmt::Display) -> EvalError {
    EvalErrorKind::DuplicateVariant {
        variant: variant.to_owned(),
        either: either.to_string(),
    }
    .into()
}

#[cold]
pub fn invalid_index_type(found: impl fmt::Display) -> EvalError {
    EvalErrorKind::InvalidIndexType {
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn generic_arity(base: &str, expected: &'static str, found: impl fmt::Display) -> EvalError {
    EvalErrorKind::GenericArity {
        base: base.to_owned(),
        expected,
        found: found.to_string(),
    }
    .into()
}

#[cold]
pub fn empty_either(either: impl fmt::Display) -> EvalError {
    EvalErrorKind::EmptyEither {
        either: either.to_string(),
    }
    .into()
}

#[cold]
pub fn array_too_large(index: impl fmt::Display, len: u64, max: u64) -> EvalError {
    EvalErrorKind::ArrayTooLarge {
        index: index.to_string(),
        len,
        max,
    }
    .into()
}

// Mutation and lookup

#[cold]
pub fn out_of_range(value: i64, low: i64, high: i64, ty: impl fmt::Display) -> EvalError {
    EvalErrorKind::OutOfRange {
        value,
        low,
        high,
        ty: ty.to_string(),
    }
    .into()
}

#[cold]
pub fn type_mismatch(expected: impl fmt::Display, got: impl fmt::Display) -> EvalError {
    EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    }
    .into()
}

#[cold]
pub fn unknown_field(field: &str, ty: impl fmt::Display) -> EvalError {
    EvalErrorKind::UnknownField {
        field: field.to_owned(),
        ty: ty.to_string(),
    }
    .into()
}

#[cold]
pub fn index_out_of_range(index: i64, low: i64, high: i64, ty: impl fmt::Display) -> EvalError {
    EvalErrorKind::IndexOutOfRange {
        index,
        low,
        high,
        ty: ty.to_string(),
    }
    .into()
}

// Loader

#[cold]
pub fn unknown_declaration_kind(kind: &str) -> EvalError {
    EvalErrorKind::UnknownDeclarationKind {
        kind: kind.to_owned(),
    }
    .into()
}

#[cold]
pub fn missing_default(name: &str) -> EvalError {
    EvalErrorKind::MissingDefault {
        name: name.to_owned(),
    }
    .into()
}

#[cfg(test)]
mod tests;

//! Range, record and array types.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use rw_ir::{FieldDecl, Span, TypeExpr};

use super::Type;
use crate::environment::Environment;
use crate::errors::{
    array_too_large, duplicate_field, generic_arity, invalid_index_type, invalid_range, EvalResult,
};

// RangeType

/// Integer type over the closed interval `low..=high`.
#[derive(Debug)]
pub struct RangeType {
    name: Option<String>,
    span: Span,
    low: i64,
    high: i64,
}

impl RangeType {
    pub(super) fn new(low: i64, high: i64, name: Option<&str>, span: Span) -> EvalResult<Self> {
        if low > high {
            return Err(invalid_range(low, high));
        }
        Ok(RangeType {
            name: name.map(str::to_owned),
            span,
            low,
            high,
        })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Number of integers in the domain.
    pub fn len(&self) -> u64 {
        self.high.abs_diff(self.low).saturating_add(1)
    }

    /// Ranges always hold at least one value.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Zero-based position of `value` within the domain.
    pub fn offset(&self, value: i64) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        usize::try_from(value.abs_diff(self.low)).ok()
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}..{}", self.low, self.high),
        }
    }
}

// RecordType

/// Fixed, ordered set of named fields.
#[derive(Debug)]
pub struct RecordType {
    name: Option<String>,
    span: Span,
    fields: Vec<(String, Type)>,
    /// Field name to position in `fields`.
    layout: FxHashMap<String, usize>,
}

impl RecordType {
    pub(super) fn make(
        decls: &[FieldDecl],
        env: &mut Environment,
        name: Option<&str>,
        span: Span,
    ) -> EvalResult<Self> {
        let mut fields = Vec::with_capacity(decls.len());
        let mut layout = FxHashMap::default();
        for decl in decls {
            if layout.contains_key(&decl.name) {
                let record = name.unwrap_or("record");
                return Err(duplicate_field(&decl.name, record).with_span(decl.span));
            }
            let ty = Type::make(&decl.ty, env, None).map_err(|e| e.with_span(decl.span))?;
            layout.insert(decl.name.clone(), fields.len());
            fields.push((decl.name.clone(), ty));
        }
        Ok(RecordType {
            name: name.map(str::to_owned),
            span,
            fields,
            layout,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[(String, Type)] {
        &self.fields
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.layout.get(field).copied()
    }

    pub fn field_type(&self, field: &str) -> Option<&Type> {
        let index = self.field_index(field)?;
        self.fields.get(index).map(|(_, ty)| ty)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return write!(f, "{name}");
        }
        write!(f, "record {{ ")?;
        for (i, (field, ty)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {ty}")?;
        }
        write!(f, " }}")
    }
}

// ArrayType

/// Largest number of slots an array type may declare.
///
/// Every slot is materialized when a default value is built, so the index
/// domain is capped well below what an allocation could hold.
pub const MAX_ARRAY_LEN: u64 = 1 << 24;

/// Fixed-length sequence indexed by the values of a range type.
#[derive(Debug)]
pub struct ArrayType {
    name: Option<String>,
    span: Span,
    value_type: Type,
    index_type: Rc<RangeType>,
}

impl ArrayType {
    pub(super) fn make(
        base: &str,
        args: &[TypeExpr],
        index: Option<&TypeExpr>,
        env: &mut Environment,
        name: Option<&str>,
        span: Span,
    ) -> EvalResult<Self> {
        let [value_decl] = args else {
            return Err(generic_arity(base, "one type argument", args.len()));
        };
        let Some(index_decl) = index else {
            return Err(generic_arity(base, "an index type", "none"));
        };
        let value_type = Type::make(value_decl, env, None)?;
        let index_type = match Type::make(index_decl, env, None)? {
            Type::Range(range) => range,
            other => return Err(invalid_index_type(other).with_span(index_decl.span)),
        };
        let len = index_type.len();
        if len > MAX_ARRAY_LEN {
            return Err(
                array_too_large(&*index_type, len, MAX_ARRAY_LEN).with_span(index_decl.span)
            );
        }
        Ok(ArrayType {
            name: name.map(str::to_owned),
            span,
            value_type,
            index_type,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn value_type(&self) -> &Type {
        &self.value_type
    }

    pub fn index_type(&self) -> &Rc<RangeType> {
        &self.index_type
    }

    /// Number of slots: `high - low + 1` of the index type.
    pub fn len(&self) -> u64 {
        self.index_type.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(
                f,
                "Array<{}>[{}..{}]",
                self.value_type,
                self.index_type.low(),
                self.index_type.high()
            ),
        }
    }
}

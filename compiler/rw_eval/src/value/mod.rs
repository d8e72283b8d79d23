//! Runtime values.
//!
//! Every value holds a handle to the type that produced it, and its shape is
//! fully determined by that type. Containers own their children outright:
//! cloning a `Value` deep-copies records, arrays and either payloads while
//! type handles stay shared.
//!
//! # Rendering
//!
//! `Display` is the canonical form (`Digit(5)`, `Point { x: 1, y: 2 }`).
//! [`Value::inner`] is the bare content used when nesting (`5`,
//! `x: 1, y: 2`).

mod composite;
mod either;

use std::fmt;
use std::rc::Rc;

use crate::errors::{out_of_range, type_mismatch, unknown_field, EvalResult};
use crate::types::{EitherTag, RangeType, Type};

pub use composite::{ArrayValue, RecordInner, RecordValue};
pub use either::{Active, ActiveMut, EitherInner, EitherValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Range(RangeValue),
    Record(RecordValue),
    Either(EitherValue),
    /// A bare enum constant such as `True`.
    Tag(EitherTag),
    Array(ArrayValue),
}

impl Value {
    /// Handle to the type this value belongs to.
    pub fn ty(&self) -> Type {
        match self {
            Value::Range(v) => Type::Range(Rc::clone(v.ty())),
            Value::Record(v) => Type::Record(Rc::clone(v.ty())),
            Value::Either(v) => Type::Either(Rc::clone(v.ty())),
            Value::Tag(tag) => Type::Either(Rc::clone(tag.either())),
            Value::Array(v) => Type::Array(Rc::clone(v.ty())),
        }
    }

    /// Replace this value's content with `source`'s.
    ///
    /// Ranges accept any range value whose integer fits their own bounds.
    /// Either values accept an either value of the same type or one of its
    /// tags. Constants, records and arrays have no wholesale assignment;
    /// mutate their children instead.
    pub fn assign(&mut self, source: &Value) -> EvalResult<()> {
        match (&mut *self, source) {
            (Value::Range(target), Value::Range(source)) => target.assign(source.get()),
            (Value::Either(target), source) => target.assign(source),
            (target, source) => Err(type_mismatch(target.ty(), source.ty())),
        }
    }

    /// Assign an integer literal.
    pub fn assign_int(&mut self, value: i64) -> EvalResult<()> {
        match self {
            Value::Range(target) => target.assign(value),
            other => Err(type_mismatch(other.ty(), value)),
        }
    }

    /// Field `name` of a record, or of the active record variant of an either.
    pub fn lookup_field(&self, name: &str) -> EvalResult<&Value> {
        match self {
            Value::Record(record) => record.field(name),
            Value::Either(either) => match either.active() {
                Active::Record(_, payload) => payload.field(name),
                Active::Enum(tag) => Err(unknown_field(name, tag)),
            },
            other => Err(unknown_field(name, other.ty())),
        }
    }

    pub fn lookup_field_mut(&mut self, name: &str) -> EvalResult<&mut Value> {
        match self {
            Value::Record(record) => record.field_mut(name),
            Value::Either(either) => match either.active_mut() {
                ActiveMut::Record(_, payload) => payload.field_mut(name),
                ActiveMut::Enum(tag) => Err(unknown_field(name, tag)),
            },
            other => Err(unknown_field(name, other.ty())),
        }
    }

    /// Element `index` of an array.
    pub fn lookup_index(&self, index: i64) -> EvalResult<&Value> {
        match self {
            Value::Array(array) => array.at(index),
            other => Err(type_mismatch("an array", other.ty())),
        }
    }

    pub fn lookup_index_mut(&mut self, index: i64) -> EvalResult<&mut Value> {
        match self {
            Value::Array(array) => array.at_mut(index),
            other => Err(type_mismatch("an array", other.ty())),
        }
    }

    /// Structural equality; values of distinct type objects are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            Value::Range(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_range_mut(&mut self) -> Option<&mut RangeValue> {
        match self {
            Value::Range(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut RecordValue> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_either(&self) -> Option<&EitherValue> {
        match self {
            Value::Either(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_either_mut(&mut self) -> Option<&mut EitherValue> {
        match self {
            Value::Either(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayValue> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Bare content, for embedding inside another value's rendering.
    pub fn inner(&self) -> Inner<'_> {
        Inner(self)
    }

    pub fn inner_to_string(&self) -> String {
        self.inner().to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Range(v) => write!(f, "{v}"),
            Value::Record(v) => write!(f, "{v}"),
            Value::Either(v) => write!(f, "{v}"),
            Value::Tag(tag) => write!(f, "{tag}"),
            Value::Array(v) => write!(f, "{v}"),
        }
    }
}

/// Bare rendering of a value; see [`Value::inner`].
#[derive(Clone, Copy)]
pub struct Inner<'a>(&'a Value);

impl fmt::Display for Inner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Range(v) => write!(f, "{}", v.get()),
            Value::Record(v) => write!(f, "{}", v.inner()),
            Value::Either(v) => write!(f, "{}", v.inner()),
            Value::Tag(tag) => write!(f, "{tag}"),
            Value::Array(v) => write!(f, "{v}"),
        }
    }
}

// RangeValue

/// Current integer of a range-typed value; always within the type's bounds.
#[derive(Clone, Debug)]
pub struct RangeValue {
    ty: Rc<RangeType>,
    value: i64,
}

impl RangeValue {
    /// Default value: the type's low bound.
    pub fn new(ty: Rc<RangeType>) -> Self {
        let value = ty.low();
        RangeValue { ty, value }
    }

    pub fn ty(&self) -> &Rc<RangeType> {
        &self.ty
    }

    pub fn get(&self) -> i64 {
        self.value
    }

    /// Set the integer, failing with `OutOfRange` (and leaving the current
    /// value in place) when it lies outside the type's bounds.
    pub fn assign(&mut self, value: i64) -> EvalResult<()> {
        if !self.ty.contains(value) {
            tracing::debug!(value, ty = %self.ty, "range assignment out of bounds");
            return Err(out_of_range(value, self.ty.low(), self.ty.high(), &*self.ty));
        }
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty.name() {
            Some(name) => write!(f, "{name}({})", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl PartialEq for RangeValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ty, &other.ty) && self.value == other.value
    }
}

impl Eq for RangeValue {}

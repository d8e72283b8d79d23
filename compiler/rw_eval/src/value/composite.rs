//! Record and array values.
//!
//! Both are fixed-shape containers built once from their type and mutated
//! only through their children. Accessors return references into the
//! container, never copies.

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::errors::{index_out_of_range, unknown_field, EvalResult};
use crate::types::{ArrayType, RecordType};

// RecordValue

#[derive(Clone, Debug)]
pub struct RecordValue {
    ty: Rc<RecordType>,
    /// Children in field declaration order.
    fields: Vec<Value>,
}

impl RecordValue {
    /// Record with every field default-initialized.
    pub fn new(ty: Rc<RecordType>) -> Self {
        let fields = ty
            .fields()
            .iter()
            .map(|(_, field_ty)| field_ty.make_default_value())
            .collect();
        RecordValue { ty, fields }
    }

    pub fn ty(&self) -> &Rc<RecordType> {
        &self.ty
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> EvalResult<&Value> {
        self.ty
            .field_index(name)
            .and_then(|index| self.fields.get(index))
            .ok_or_else(|| unknown_field(name, &*self.ty))
    }

    pub fn field_mut(&mut self, name: &str) -> EvalResult<&mut Value> {
        match self.ty.field_index(name) {
            Some(index) => self
                .fields
                .get_mut(index)
                .ok_or_else(|| unknown_field(name, &*self.ty)),
            None => Err(unknown_field(name, &*self.ty)),
        }
    }

    /// `(field name, child)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields()
            .iter()
            .map(|(name, _)| name.as_str())
            .zip(self.fields.iter())
    }

    /// `f1: v1, f2: v2` without the surrounding name and braces.
    pub fn inner(&self) -> RecordInner<'_> {
        RecordInner(self)
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ty.name() {
            Some(name) => write!(f, "{name} {{ {} }}", self.inner()),
            None => write!(f, "{{ {} }}", self.inner()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct RecordInner<'a>(&'a RecordValue);

impl fmt::Display for RecordInner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ty, &other.ty) && self.fields == other.fields
    }
}

impl Eq for RecordValue {}

// ArrayValue

#[derive(Clone, Debug)]
pub struct ArrayValue {
    ty: Rc<ArrayType>,
    /// One child per index, ascending from the index type's low bound.
    items: Vec<Value>,
}

impl ArrayValue {
    /// Array with one default-initialized slot per index.
    pub fn new(ty: Rc<ArrayType>) -> Self {
        let index = ty.index_type();
        let items = (index.low()..=index.high())
            .map(|_| ty.value_type().make_default_value())
            .collect();
        ArrayValue { ty, items }
    }

    pub fn ty(&self) -> &Rc<ArrayType> {
        &self.ty
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slot at logical index `index`.
    pub fn at(&self, index: i64) -> EvalResult<&Value> {
        self.ty
            .index_type()
            .offset(index)
            .and_then(|offset| self.items.get(offset))
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn at_mut(&mut self, index: i64) -> EvalResult<&mut Value> {
        match self.ty.index_type().offset(index) {
            Some(offset) if offset < self.items.len() => Ok(&mut self.items[offset]),
            _ => Err(self.out_of_range(index)),
        }
    }

    /// `(logical index, child)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Value)> {
        let index = self.ty.index_type();
        (index.low()..=index.high()).zip(self.items.iter())
    }

    fn out_of_range(&self, index: i64) -> crate::errors::EvalError {
        let domain = self.ty.index_type();
        index_out_of_range(index, domain.low(), domain.high(), &*self.ty)
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (index, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}: {value}")?;
        }
        write!(f, "]")
    }
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ty, &other.ty) && self.items == other.items
    }
}

impl Eq for ArrayValue {}

//! Either values.
//!
//! The active tag and its payload are kept together and only ever replaced
//! together, so a record payload exists exactly when the active variant is a
//! record variant. Readers go through [`EitherValue::active`], which hands
//! back the tag and payload as one discriminated view.

use std::fmt;
use std::rc::Rc;

use super::{RecordValue, Value};
use crate::errors::{type_mismatch, EvalResult};
use crate::types::{EitherTag, EitherType};

#[derive(Clone, Debug)]
pub struct EitherValue {
    tag: EitherTag,
    payload: Option<RecordValue>,
}

/// Read view of an either value's active variant.
#[derive(Clone, Copy, Debug)]
pub enum Active<'a> {
    Enum(&'a EitherTag),
    Record(&'a EitherTag, &'a RecordValue),
}

/// Write view of an either value's active variant.
///
/// Only the payload is mutable; switching variants goes through
/// [`EitherValue::assign`].
#[derive(Debug)]
pub enum ActiveMut<'a> {
    Enum(&'a EitherTag),
    Record(&'a EitherTag, &'a mut RecordValue),
}

impl EitherValue {
    /// First variant, with a default payload if it is a record variant.
    pub fn new(either: &Rc<EitherType>) -> Self {
        Self::with_tag(either.first_tag())
    }

    fn with_tag(tag: EitherTag) -> Self {
        let payload = tag
            .variant()
            .record()
            .map(|record| RecordValue::new(Rc::clone(record)));
        EitherValue { tag, payload }
    }

    pub fn ty(&self) -> &Rc<EitherType> {
        self.tag.either()
    }

    pub fn tag(&self) -> &EitherTag {
        &self.tag
    }

    pub fn active(&self) -> Active<'_> {
        match &self.payload {
            Some(payload) => Active::Record(&self.tag, payload),
            None => Active::Enum(&self.tag),
        }
    }

    pub fn active_mut(&mut self) -> ActiveMut<'_> {
        match &mut self.payload {
            Some(payload) => ActiveMut::Record(&self.tag, payload),
            None => ActiveMut::Enum(&self.tag),
        }
    }

    /// Payload of the active record variant.
    pub fn payload(&self) -> Option<&RecordValue> {
        self.payload.as_ref()
    }

    /// Take on `source`'s content.
    ///
    /// An either value of the same type is copied wholesale, payload
    /// included. A bare tag of this type switches the active variant and
    /// installs a fresh default payload; the previous payload is dropped.
    pub fn assign(&mut self, source: &Value) -> EvalResult<()> {
        match source {
            Value::Either(other) if Rc::ptr_eq(self.ty(), other.ty()) => {
                self.tag = other.tag.clone();
                self.payload = other.payload.clone();
                Ok(())
            }
            Value::Tag(tag) if tag.is_of(self.ty()) => {
                tracing::trace!(from = %self.tag, to = %tag, "switch either variant");
                *self = Self::with_tag(tag.clone());
                Ok(())
            }
            other => Err(type_mismatch(&**self.ty(), other.ty())),
        }
    }

    /// Payload rendering, or the tag name for enum variants.
    pub fn inner(&self) -> EitherInner<'_> {
        EitherInner(self)
    }
}

/// Record payloads are named after their variant, so the payload's canonical
/// form already reads `Tag { .. }` and the bare and canonical forms coincide.
impl fmt::Display for EitherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

#[derive(Clone, Copy)]
pub struct EitherInner<'a>(&'a EitherValue);

impl fmt::Display for EitherInner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.payload {
            Some(payload) => write!(f, "{payload}"),
            None => write!(f, "{}", self.0.tag),
        }
    }
}

impl PartialEq for EitherValue {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.payload == other.payload
    }
}

impl Eq for EitherValue {}

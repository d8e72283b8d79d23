//! Either (tagged union) types, their variants and tags.
//!
//! An `EitherType` owns its variants. Each variant points back at its parent
//! through a `Weak` so the type graph stays acyclic under `Rc`. Tags are the
//! other direction: an `EitherTag` holds a strong handle to the parent plus
//! the variant's position, so a tag can outlive every binding of its type
//! and still render and compare.

use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashSet;
use rw_ir::{Span, VariantDecl};

use super::RecordType;
use crate::environment::Environment;
use crate::errors::{duplicate_variant, empty_either, EvalResult};

/// Closed set of named alternatives, exactly one active per value.
#[derive(Debug)]
pub struct EitherType {
    name: Option<String>,
    span: Span,
    variants: Vec<EitherVariant>,
}

/// One alternative of an [`EitherType`].
pub struct EitherVariant {
    name: String,
    index: usize,
    parent: Weak<EitherType>,
    /// Payload layout for record variants; `None` for enum variants.
    record: Option<Rc<RecordType>>,
}

impl EitherType {
    pub(super) fn make(
        decls: &[VariantDecl],
        env: &mut Environment,
        name: Option<&str>,
        span: Span,
    ) -> EvalResult<Rc<Self>> {
        if decls.is_empty() {
            return Err(empty_either(name.unwrap_or("either")));
        }
        let mut seen = FxHashSet::default();
        let mut resolved = Vec::with_capacity(decls.len());
        for decl in decls {
            if !seen.insert(decl.name.as_str()) {
                let either = name.unwrap_or("either");
                return Err(duplicate_variant(&decl.name, either).with_span(decl.span));
            }
            let record = match &decl.fields {
                None => None,
                Some(fields) => Some(Rc::new(RecordType::make(
                    fields,
                    env,
                    Some(&decl.name),
                    decl.span,
                )?)),
            };
            resolved.push((decl.name.clone(), record));
        }

        Ok(Rc::new_cyclic(|parent| EitherType {
            name: name.map(str::to_owned),
            span,
            variants: resolved
                .into_iter()
                .enumerate()
                .map(|(index, (name, record))| EitherVariant {
                    name,
                    index,
                    parent: parent.clone(),
                    record,
                })
                .collect(),
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Variants in declaration order.
    pub fn variants(&self) -> &[EitherVariant] {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&EitherVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Tag of the variant at `index`.
    pub fn tag(self: &Rc<Self>, index: usize) -> Option<EitherTag> {
        (index < self.variants.len()).then(|| EitherTag {
            either: Rc::clone(self),
            index,
        })
    }

    /// Tag of the first variant. `make` rejects eithers without variants.
    pub(crate) fn first_tag(self: &Rc<Self>) -> EitherTag {
        EitherTag {
            either: Rc::clone(self),
            index: 0,
        }
    }

    /// Tag of the variant called `name`.
    pub fn tag_named(self: &Rc<Self>, name: &str) -> Option<EitherTag> {
        let index = self.variant(name)?.index;
        self.tag(index)
    }
}

impl fmt::Display for EitherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return write!(f, "{name}");
        }
        write!(f, "either {{ ")?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", variant.name)?;
        }
        write!(f, " }}")
    }
}

impl EitherVariant {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position among the parent's variants.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_enum(&self) -> bool {
        self.record.is_none()
    }

    /// Payload layout of a record variant.
    pub fn record(&self) -> Option<&Rc<RecordType>> {
        self.record.as_ref()
    }

    /// The either type declaring this variant, while it is alive.
    pub fn parent(&self) -> Option<Rc<EitherType>> {
        self.parent.upgrade()
    }

    /// This variant's tag, while the parent type is alive.
    pub fn tag(&self) -> Option<EitherTag> {
        self.parent()?.tag(self.index)
    }
}

impl fmt::Debug for EitherVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EitherVariant")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

/// Discriminant of an either value; also usable as a bare enum constant.
///
/// Two tags are equal iff they name the same variant of the same type
/// object, so each variant has exactly one tag identity.
#[derive(Clone)]
pub struct EitherTag {
    either: Rc<EitherType>,
    index: usize,
}

impl EitherTag {
    pub fn either(&self) -> &Rc<EitherType> {
        &self.either
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variant(&self) -> &EitherVariant {
        // `index` is checked against the variant list when the tag is built.
        &self.either.variants[self.index]
    }

    pub fn name(&self) -> &str {
        self.variant().name()
    }

    /// Whether this tag belongs to `either`.
    pub fn is_of(&self, either: &Rc<EitherType>) -> bool {
        Rc::ptr_eq(&self.either, either)
    }
}

impl PartialEq for EitherTag {
    fn eq(&self, other: &Self) -> bool {
        self.is_of(&other.either) && self.index == other.index
    }
}

impl Eq for EitherTag {}

impl fmt::Debug for EitherTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EitherTag({}::{})", self.either, self.name())
    }
}

impl fmt::Display for EitherTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

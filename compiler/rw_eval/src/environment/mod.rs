//! Scope-chained name resolution.
//!
//! An [`Environment`] is an explicit list of frames. The innermost (local)
//! frame receives every new binding; lookups search local first, then each
//! parent frame from innermost to outermost. Parent frames are shared by
//! reference, so the prelude's frame is built once and appears in every
//! module environment derived from it via [`Environment::child`].
//!
//! Bindings are never removed. Variables are bound to [`SharedValue`] cells:
//! binding one cell under two names aliases it, and in-place mutation
//! through either name is visible through both.

use rustc_hash::FxHashMap;

use crate::errors::{duplicate_declaration, unknown_type, unknown_variable, EvalResult};
use crate::shared::Shared;
use crate::types::Type;
use crate::value::Value;

/// A variable cell as stored in an environment.
pub type SharedValue = Shared<Value>;

/// What happens when a name is bound twice in the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Redefinition {
    /// The later binding replaces the earlier one.
    #[default]
    Overwrite,
    /// The later binding fails with `DuplicateDeclaration`.
    Reject,
}

/// Bindings owned by one scope.
#[derive(Debug, Default)]
struct Frame {
    types: FxHashMap<String, Type>,
    vars: FxHashMap<String, SharedValue>,
    /// Variable names in first-binding order.
    var_order: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Environment {
    /// Frame receiving new bindings.
    local: Shared<Frame>,
    /// Enclosing frames, outermost first.
    parents: Vec<Shared<Frame>>,
    redefinition: Redefinition,
}

impl Environment {
    /// Root environment with a single empty frame.
    pub fn new() -> Self {
        Environment {
            local: Shared::default(),
            parents: Vec::new(),
            redefinition: Redefinition::default(),
        }
    }

    /// New environment whose parents are all of this environment's frames.
    ///
    /// The child shares frames with `self`; only its fresh local frame is
    /// private. The redefinition policy is inherited.
    #[must_use]
    pub fn child(&self) -> Self {
        let mut parents = Vec::with_capacity(self.parents.len() + 1);
        parents.extend(self.parents.iter().cloned());
        parents.push(self.local.clone());
        Environment {
            local: Shared::default(),
            parents,
            redefinition: self.redefinition,
        }
    }

    #[must_use]
    pub fn with_redefinition(mut self, redefinition: Redefinition) -> Self {
        self.redefinition = redefinition;
        self
    }

    pub fn redefinition(&self) -> Redefinition {
        self.redefinition
    }

    /// Number of frames, local included.
    pub fn depth(&self) -> usize {
        self.parents.len() + 1
    }

    /// Frames from innermost to outermost.
    fn frames(&self) -> impl Iterator<Item = &Shared<Frame>> {
        std::iter::once(&self.local).chain(self.parents.iter().rev())
    }

    /// Bind `name` to `ty` in the local frame.
    pub fn assign_type(&mut self, name: &str, ty: Type) -> EvalResult<()> {
        let mut frame = self.local.borrow_mut();
        if self.redefinition == Redefinition::Reject && frame.types.contains_key(name) {
            return Err(duplicate_declaration(name));
        }
        tracing::trace!(name, %ty, "bind type");
        frame.types.insert(name.to_owned(), ty);
        Ok(())
    }

    /// Bind `name` to the cell `value` in the local frame.
    pub fn assign_var(&mut self, name: &str, value: SharedValue) -> EvalResult<()> {
        let mut frame = self.local.borrow_mut();
        let exists = frame.vars.contains_key(name);
        if exists && self.redefinition == Redefinition::Reject {
            return Err(duplicate_declaration(name));
        }
        tracing::trace!(name, "bind var");
        if !exists {
            frame.var_order.push(name.to_owned());
        }
        frame.vars.insert(name.to_owned(), value);
        Ok(())
    }

    /// Look up a type through the scope chain.
    pub fn get_type(&self, name: &str) -> Option<Type> {
        self.frames()
            .find_map(|frame| frame.borrow().types.get(name).cloned())
    }

    /// Look up a variable cell through the scope chain.
    pub fn get_var(&self, name: &str) -> Option<SharedValue> {
        self.frames()
            .find_map(|frame| frame.borrow().vars.get(name).cloned())
    }

    /// Look up a variable cell in the local frame only.
    pub fn get_local_var(&self, name: &str) -> Option<SharedValue> {
        self.local.borrow().vars.get(name).cloned()
    }

    /// [`get_type`](Self::get_type), reporting a miss as `UnknownType`.
    pub fn resolve_type(&self, name: &str) -> EvalResult<Type> {
        self.get_type(name).ok_or_else(|| unknown_type(name))
    }

    /// [`get_var`](Self::get_var), reporting a miss as `UnknownVariable`.
    pub fn resolve_var(&self, name: &str) -> EvalResult<SharedValue> {
        self.get_var(name).ok_or_else(|| unknown_variable(name))
    }

    pub fn has_local_type(&self, name: &str) -> bool {
        self.local.borrow().types.contains_key(name)
    }

    pub fn has_local_var(&self, name: &str) -> bool {
        self.local.borrow().vars.contains_key(name)
    }

    /// Names bound as variables in the local frame, in first-binding order.
    pub fn local_var_names(&self) -> Vec<String> {
        self.local.borrow().var_order.clone()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

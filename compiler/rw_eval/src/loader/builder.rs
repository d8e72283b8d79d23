//! `LoaderBuilder` for creating `Loader` instances with various configurations.

use super::Loader;
use crate::environment::{Environment, Redefinition};
use crate::rules::{DiscardRules, RuleSink};

/// Builder for [`Loader`].
///
/// Defaults: a root environment with no parent, redefinitions overwrite,
/// and rules are discarded.
pub struct LoaderBuilder<'a> {
    parent: Option<Environment>,
    redefinition: Redefinition,
    sink: Option<Box<dyn RuleSink + 'a>>,
}

impl<'a> LoaderBuilder<'a> {
    pub fn new() -> Self {
        LoaderBuilder {
            parent: None,
            redefinition: Redefinition::default(),
            sink: None,
        }
    }

    /// Load into a child of `parent` (usually the prelude).
    #[must_use]
    pub fn parent(mut self, parent: &Environment) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Set how a second binding of a name in the module's own frame is
    /// treated.
    #[must_use]
    pub fn redefinition(mut self, redefinition: Redefinition) -> Self {
        self.redefinition = redefinition;
        self
    }

    /// Receive forwarded rules. Pass `&mut sink` to keep ownership.
    #[must_use]
    pub fn rule_sink(mut self, sink: impl RuleSink + 'a) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Loader<'a> {
        let env = match self.parent {
            Some(parent) => parent.child(),
            None => Environment::new(),
        };
        Loader {
            env: env.with_redefinition(self.redefinition),
            sink: self.sink.unwrap_or_else(|| Box::new(DiscardRules)),
            params: Vec::new(),
            vars: Vec::new(),
        }
    }
}

impl Default for LoaderBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

//! Hand-off of rule declarations.
//!
//! The loader does not evaluate rules. It forwards each `rule` and
//! `rule ... for` declaration, body untouched, to a [`RuleSink`] supplied by
//! the embedder (the formatter, in a full toolchain):
//! - [`RuleBuffer`] keeps owned copies, for tests and embedders that want to
//!   inspect rules after loading
//! - [`DiscardRules`] drops them (the loader's default)

use rw_ir::{RuleDef, RuleForDef, RuleRef};

/// Receiver for rule declarations encountered while loading.
pub trait RuleSink {
    fn accept(&mut self, rule: RuleRef<'_>);
}

impl<S: RuleSink + ?Sized> RuleSink for &mut S {
    fn accept(&mut self, rule: RuleRef<'_>) {
        (**self).accept(rule);
    }
}

/// Sink that ignores every rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardRules;

impl RuleSink for DiscardRules {
    fn accept(&mut self, rule: RuleRef<'_>) {
        tracing::trace!(rule = rule.name(), "rule discarded");
    }
}

/// Owned copy of a forwarded rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardedRule {
    Rule(RuleDef),
    RuleFor(RuleForDef),
}

impl ForwardedRule {
    pub fn as_rule_ref(&self) -> RuleRef<'_> {
        match self {
            ForwardedRule::Rule(rule) => RuleRef::Rule(rule),
            ForwardedRule::RuleFor(rule) => RuleRef::RuleFor(rule),
        }
    }

    pub fn name(&self) -> &str {
        self.as_rule_ref().name()
    }
}

impl From<RuleRef<'_>> for ForwardedRule {
    fn from(rule: RuleRef<'_>) -> Self {
        match rule {
            RuleRef::Rule(rule) => ForwardedRule::Rule(rule.clone()),
            RuleRef::RuleFor(rule) => ForwardedRule::RuleFor(rule.clone()),
        }
    }
}

/// Sink that collects rules in the order they were forwarded.
#[derive(Clone, Debug, Default)]
pub struct RuleBuffer {
    rules: Vec<ForwardedRule>,
}

impl RuleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[ForwardedRule] {
        &self.rules
    }

    /// Rule names in forwarding order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(ForwardedRule::name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn into_rules(self) -> Vec<ForwardedRule> {
        self.rules
    }
}

impl RuleSink for RuleBuffer {
    fn accept(&mut self, rule: RuleRef<'_>) {
        self.rules.push(rule.into());
    }
}

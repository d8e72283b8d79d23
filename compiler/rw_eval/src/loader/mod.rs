//! Declaration loader.
//!
//! Walks a parsed [`Module`] in source order and populates a fresh child
//! environment of the prelude:
//! - `type` declarations build a type and bind it by name
//! - `param` and `var` declarations build a default value, apply the literal
//!   default, and bind the result as a new variable cell
//! - `rule` declarations are forwarded unevaluated to the [`RuleSink`]
//!
//! Loading is all-or-nothing. The first failing declaration aborts the
//! load, and since [`Loader::load`] consumes the loader, the half-populated
//! environment is dropped with it.

mod builder;

use rw_ir::{Decl, DeclKind, Literal, LiteralKind, Module, RuleRef, TypeExpr};

use crate::environment::Environment;
use crate::errors::{missing_default, unknown_declaration_kind, EvalResult};
use crate::rules::RuleSink;
use crate::shared::Shared;
use crate::types::Type;
use crate::value::Value;

pub use builder::LoaderBuilder;

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadedModule {
    /// The module's environment, a child of the environment it was loaded
    /// against.
    pub env: Environment,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// Variable names in declaration order.
    pub vars: Vec<String>,
}

impl LoadedModule {
    /// Current value of the parameter or variable `name`.
    pub fn value(&self, name: &str) -> EvalResult<Value> {
        Ok(self.env.resolve_var(name)?.get())
    }
}

pub struct Loader<'a> {
    env: Environment,
    sink: Box<dyn RuleSink + 'a>,
    params: Vec<String>,
    vars: Vec<String>,
}

impl<'a> Loader<'a> {
    pub fn builder() -> LoaderBuilder<'a> {
        LoaderBuilder::new()
    }

    /// Loader over a child of `parent` with default settings.
    pub fn new(parent: &Environment) -> Self {
        Self::builder().parent(parent).build()
    }

    /// Environment being populated.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Process every declaration of `module` in order.
    #[tracing::instrument(level = "debug", skip_all, fields(decls = module.decls.len()))]
    pub fn load(mut self, module: &Module) -> EvalResult<LoadedModule> {
        for decl in &module.decls {
            self.load_decl(decl).map_err(|e| {
                tracing::debug!(kind = decl.kind.kind_name(), error = %e, "load failed");
                e.with_span(decl.span)
            })?;
        }
        tracing::debug!(
            params = self.params.len(),
            vars = self.vars.len(),
            "load complete"
        );
        Ok(LoadedModule {
            env: self.env,
            params: self.params,
            vars: self.vars,
        })
    }

    fn load_decl(&mut self, decl: &Decl) -> EvalResult<()> {
        match &decl.kind {
            DeclKind::Type { name, ty } => {
                let ty = Type::make(ty, &mut self.env, Some(name))?;
                tracing::debug!(name = name.as_str(), %ty, "declare type");
                self.env.assign_type(name, ty)
            }
            DeclKind::Param { name, ty, default } => {
                let default = default.as_ref().ok_or_else(|| missing_default(name))?;
                self.declare_var(name, ty, Some(default))?;
                record_name(&mut self.params, &mut self.vars, name);
                Ok(())
            }
            DeclKind::Var { name, ty, default } => {
                self.declare_var(name, ty, default.as_ref())?;
                record_name(&mut self.vars, &mut self.params, name);
                Ok(())
            }
            DeclKind::Rule(rule) => {
                tracing::debug!(name = rule.name.as_str(), "forward rule");
                self.sink.accept(RuleRef::Rule(rule));
                Ok(())
            }
            DeclKind::RuleFor(rule) => {
                self.env.resolve_var(&rule.iterable)?;
                tracing::debug!(
                    name = rule.name.as_str(),
                    iterable = rule.iterable.as_str(),
                    "forward rule"
                );
                self.sink.accept(RuleRef::RuleFor(rule));
                Ok(())
            }
            DeclKind::Unknown { kind } => Err(unknown_declaration_kind(kind)),
        }
    }

    fn declare_var(
        &mut self,
        name: &str,
        ty: &TypeExpr,
        default: Option<&Literal>,
    ) -> EvalResult<()> {
        let ty = Type::make(ty, &mut self.env, None)?;
        let mut value = ty.make_default_value();
        if let Some(literal) = default {
            self.apply_literal(&mut value, literal)
                .map_err(|e| e.with_span(literal.span))?;
        }
        tracing::debug!(name, %value, "declare var");
        self.env.assign_var(name, Shared::new(value))
    }

    fn apply_literal(&self, target: &mut Value, literal: &Literal) -> EvalResult<()> {
        match &literal.kind {
            LiteralKind::Number(n) => target.assign_int(*n),
            LiteralKind::Ident(name) => {
                let source = self.env.resolve_var(name)?.get();
                target.assign(&source)
            }
        }
    }
}

/// Append `name` unless a redefinition already recorded it.
///
/// The binding now lives in `names` only, so it is dropped from `other`.
fn record_name(names: &mut Vec<String>, other: &mut Vec<String>, name: &str) {
    other.retain(|n| n != name);
    if !names.iter().any(|n| n == name) {
        names.push(name.to_owned());
    }
}

/// Load `module` into a fresh child of `prelude`.
pub fn load_module(module: &Module, prelude: &Environment) -> EvalResult<LoadedModule> {
    Loader::new(prelude).load(module)
}

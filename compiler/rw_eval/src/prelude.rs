//! Built-in declarations shared by every module.
//!
//! The prelude is an ordinary environment produced by running the loader
//! over a fixed declaration list. Build it once and load every module
//! against it; module environments share its frame rather than copying it.

use rw_ir::{Decl, Module, TypeExpr, VariantDecl};

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::loader::Loader;

/// `type Boolean: either { False, True };`
fn declarations() -> Module {
    Module::new(vec![Decl::type_decl(
        "Boolean",
        TypeExpr::either([
            VariantDecl::enumeration("False"),
            VariantDecl::enumeration("True"),
        ]),
    )])
}

/// Build the prelude environment.
#[tracing::instrument(level = "debug")]
pub fn build() -> EvalResult<Environment> {
    let loaded = Loader::builder().build().load(&declarations())?;
    Ok(loaded.env)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::value::Value;

    #[test]
    fn test_prelude_declares_boolean() {
        let prelude = build().unwrap();
        let boolean = prelude.get_type("Boolean").unwrap();
        assert_eq!(boolean.to_string(), "Boolean");
        assert_eq!(boolean.make_default_value().to_string(), "False");
        assert_eq!(prelude.depth(), 1);
    }

    #[test]
    fn test_prelude_binds_boolean_constants() {
        let prelude = build().unwrap();
        let boolean = prelude.get_type("Boolean").unwrap();
        for name in ["False", "True"] {
            match prelude.get_var(name).unwrap().get() {
                Value::Tag(tag) => {
                    assert!(tag.is_of(boolean.as_either().unwrap()));
                    assert_eq!(tag.name(), name);
                }
                other => panic!("expected tag, got {other}"),
            }
        }
        assert_eq!(prelude.local_var_names(), ["False", "True"]);
    }

    #[test]
    fn test_separate_builds_are_independent() {
        let a = build().unwrap().get_type("Boolean").unwrap();
        let b = build().unwrap().get_type("Boolean").unwrap();
        assert!(!a.same(&b));
    }
}

//! Runway Eval - semantic core for Runway models.
//!
//! Turns parsed declarations into a populated environment of types and
//! values.
//!
//! # Architecture
//!
//! - [`Type`]: range, record, either and array types, compared by identity
//! - [`Value`]: mutable values whose shape is fixed by their type
//! - [`Environment`]: scope-chained bindings, innermost frame first
//! - [`Loader`]: processes a [`rw_ir::Module`] declaration by declaration
//! - [`prelude`]: the built-in environment every module is loaded against
//!
//! Rule declarations are not evaluated here; the loader forwards them to a
//! [`RuleSink`].
//!
//! ```text
//! let prelude = rw_eval::prelude::build()?;
//! let loaded = rw_eval::load_module(&module, &prelude)?;
//! println!("{}", loaded.value("d")?);
//! ```

pub mod environment;
pub mod errors;
pub mod loader;
pub mod prelude;
pub mod rules;
mod shared;
pub mod types;
pub mod value;

use std::sync::Once;

pub use environment::{Environment, Redefinition, SharedValue};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use loader::{load_module, LoadedModule, Loader, LoaderBuilder};
pub use rules::{DiscardRules, ForwardedRule, RuleBuffer, RuleSink};
pub use shared::Shared;
pub use types::{ArrayType, EitherTag, EitherType, EitherVariant, RangeType, RecordType, Type};
pub use value::{Active, ActiveMut, ArrayValue, EitherValue, RangeValue, RecordValue, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=rw_eval=debug` (loader
/// and registrations) or `RUST_LOG=rw_eval=trace` (type construction and
/// individual bindings).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the embedder.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rw_ir::{Decl, Literal, Module, TypeExpr};

    use super::*;

    #[test]
    fn test_init_tracing_twice_then_load() {
        init_tracing();
        init_tracing();

        let prelude = prelude::build().unwrap();
        let module = Module::new(vec![Decl::var(
            "d",
            TypeExpr::range(0, 9),
            Some(Literal::number(3)),
        )]);
        let loaded = load_module(&module, &prelude).unwrap();
        assert_eq!(loaded.value("d").unwrap().inner_to_string(), "3");
    }
}

//! Property tests for value invariants.
//!
//! Ranges, arrays and either values are generated from arbitrary bounds and
//! checked against the invariants every load must preserve.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use rw_eval::{Environment, Type, Value};
use rw_ir::{TypeExpr, VariantDecl};

fn make(decl: &TypeExpr) -> Type {
    let mut env = Environment::new();
    Type::make(decl, &mut env, None).unwrap()
}

/// `(low, high)` with `low <= high`, kept small enough to materialize arrays.
fn bounds() -> impl Strategy<Value = (i64, i64)> {
    (-1_000i64..1_000, 0i64..64).prop_map(|(low, width)| (low, low + width))
}

proptest! {
    #[test]
    fn range_assign_succeeds_iff_in_bounds((low, high) in bounds(), candidate in -1_200i64..1_200) {
        let ty = make(&TypeExpr::range(low, high));
        let mut value = ty.make_default_value();
        prop_assert_eq!(value.as_range().unwrap().get(), low);

        let result = value.assign_int(candidate);
        let in_bounds = low <= candidate && candidate <= high;
        prop_assert_eq!(result.is_ok(), in_bounds);

        let expected = if in_bounds { candidate } else { low };
        prop_assert_eq!(value.as_range().unwrap().get(), expected);
    }

    #[test]
    fn array_shape_follows_index_type((low, high) in bounds()) {
        let ty = make(&TypeExpr::array(TypeExpr::range(0, 1), TypeExpr::range(low, high)));
        let value = ty.make_default_value();
        let array = value.as_array().unwrap();

        let expected_len = usize::try_from(high - low + 1).unwrap();
        prop_assert_eq!(array.len(), expected_len);

        let indices: Vec<i64> = array.iter().map(|(i, _)| i).collect();
        prop_assert_eq!(indices, (low..=high).collect::<Vec<_>>());
        prop_assert!(array.at(low - 1).is_err());
        prop_assert!(array.at(high + 1).is_err());
        prop_assert!(array.at(high).is_ok());
    }

    #[test]
    fn either_tags_cycle_without_payload_leaks(count in 1usize..8, picks in prop::collection::vec(0usize..8, 1..16)) {
        let variants = (0..count).map(|i| VariantDecl::enumeration(format!("V{i}")));
        let mut env = Environment::new();
        let ty = Type::make(&TypeExpr::either(variants), &mut env, Some("E")).unwrap();
        let either = ty.as_either().unwrap();
        let mut value = ty.make_default_value();

        for pick in picks {
            let index = pick % count;
            let tag = either.tag(index).unwrap();
            value.assign(&Value::Tag(tag)).unwrap();
            prop_assert_eq!(value.to_string(), format!("V{index}"));
            prop_assert!(value.as_either().unwrap().payload().is_none());
        }
    }

    #[test]
    fn defaults_equal_each_other((low, high) in bounds()) {
        let ty = make(&TypeExpr::range(low, high));
        prop_assert!(ty.make_default_value().equals(&ty.make_default_value()));
    }
}

//! End-to-end loading tests.
//!
//! Each test builds a module the way the parser would hand it over, loads it
//! against a freshly built prelude, then inspects and mutates the resulting
//! environment.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rw_eval::{load_module, prelude, Active, EvalErrorKind, LoadedModule, Value};
use rw_ir::{Decl, FieldDecl, Literal, Module, TypeExpr, VariantDecl};

fn load(decls: Vec<Decl>) -> LoadedModule {
    let prelude = prelude::build().expect("prelude builds");
    load_module(&Module::new(decls), &prelude).expect("module loads")
}

fn digit() -> Decl {
    Decl::type_decl("Digit", TypeExpr::range(0, 9))
}

#[test]
fn digit_variable_rejects_out_of_range_assignment() {
    let loaded = load(vec![
        digit(),
        Decl::var("d", TypeExpr::alias("Digit"), Some(Literal::number(5))),
    ]);
    let cell = loaded.env.get_var("d").unwrap();
    assert_eq!(cell.get().to_string(), "Digit(5)");

    let err = cell.borrow_mut().assign_int(10).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::OutOfRange {
            value: 10,
            low: 0,
            high: 9,
            ..
        }
    ));
    assert_eq!(cell.get().to_string(), "Digit(5)");
}

#[test]
fn alias_type_is_the_same_object() {
    let loaded = load(vec![
        Decl::type_decl("A", TypeExpr::range(0, 3)),
        Decl::type_decl("B", TypeExpr::alias("A")),
        Decl::var("a", TypeExpr::alias("A"), Some(Literal::number(2))),
        Decl::var("b", TypeExpr::alias("B"), Some(Literal::ident("a"))),
    ]);
    let a = loaded.env.get_type("A").unwrap();
    let b = loaded.env.get_type("B").unwrap();
    assert!(a.same(&b));
    assert_eq!(loaded.value("b").unwrap(), loaded.value("a").unwrap());
}

#[test]
fn point_renders_fields_in_declaration_order() {
    let loaded = load(vec![
        Decl::type_decl(
            "Point",
            TypeExpr::record([
                FieldDecl::new("x", TypeExpr::range(0, 9)),
                FieldDecl::new("y", TypeExpr::range(0, 9)),
            ]),
        ),
        Decl::var("p", TypeExpr::alias("Point"), None),
    ]);
    let cell = loaded.env.get_var("p").unwrap();
    {
        let mut p = cell.borrow_mut();
        p.lookup_field_mut("x").unwrap().assign_int(1).unwrap();
        p.lookup_field_mut("y").unwrap().assign_int(2).unwrap();
    }
    let rendered = cell.get().to_string();
    assert_eq!(rendered, "Point { x: 1, y: 2 }");
    assert_eq!(cell.get().to_string(), rendered);
}

#[test]
fn array_over_offset_index_range() {
    let loaded = load(vec![
        Decl::type_decl(
            "Row",
            TypeExpr::array(TypeExpr::range(0, 1), TypeExpr::range(5, 7)),
        ),
        Decl::var("row", TypeExpr::alias("Row"), None),
    ]);
    let row = loaded.value("row").unwrap();
    assert_eq!(row.to_string(), "[5: 0, 6: 0, 7: 0]");
    assert_eq!(row.as_array().unwrap().len(), 3);
    for index in [4, 8] {
        assert!(matches!(
            row.lookup_index(index).unwrap_err().kind,
            EvalErrorKind::IndexOutOfRange { .. }
        ));
    }
}

#[test]
fn either_with_record_variant_switches_cleanly() {
    let loaded = load(vec![
        Decl::type_decl(
            "Status",
            TypeExpr::either([
                VariantDecl::record("Sending", [FieldDecl::new("retries", TypeExpr::range(0, 3))]),
                VariantDecl::enumeration("Done"),
            ]),
        ),
        Decl::var("s", TypeExpr::alias("Status"), None),
    ]);
    let cell = loaded.env.get_var("s").unwrap();
    assert_eq!(cell.get().to_string(), "Sending { retries: 0 }");

    cell.borrow_mut()
        .lookup_field_mut("retries")
        .unwrap()
        .assign_int(2)
        .unwrap();
    let before = cell.get();

    let done = loaded.value("Done").unwrap();
    cell.borrow_mut().assign(&done).unwrap();
    assert_eq!(cell.get().to_string(), "Done");

    // Mutating the retained copy must not bring the dropped payload back.
    let mut retained = before.as_either().unwrap().payload().cloned().unwrap();
    retained.field_mut("retries").unwrap().assign_int(3).unwrap();
    let now = cell.get();
    assert!(matches!(now.as_either().unwrap().active(), Active::Enum(tag) if tag.name() == "Done"));

    // Copying the earlier value back restores its payload.
    cell.borrow_mut().assign(&before).unwrap();
    assert_eq!(cell.get().to_string(), "Sending { retries: 2 }");
}

#[test]
fn module_shadows_prelude_without_touching_it() {
    let prelude = prelude::build().unwrap();
    let module = Module::new(vec![
        Decl::type_decl(
            "Boolean",
            TypeExpr::either([VariantDecl::enumeration("Off"), VariantDecl::enumeration("On")]),
        ),
        Decl::var("flag", TypeExpr::alias("Boolean"), Some(Literal::ident("On"))),
    ]);
    let loaded = load_module(&module, &prelude).unwrap();
    assert_eq!(loaded.value("flag").unwrap().to_string(), "On");

    let other = load_module(
        &Module::new(vec![Decl::var(
            "flag",
            TypeExpr::alias("Boolean"),
            Some(Literal::ident("True")),
        )]),
        &prelude,
    )
    .unwrap();
    assert_eq!(other.value("flag").unwrap().to_string(), "True");
    assert!(other.env.get_var("On").is_none());
}

#[test]
fn variables_are_independent_cells() {
    let loaded = load(vec![
        digit(),
        Decl::var("a", TypeExpr::alias("Digit"), Some(Literal::number(1))),
        Decl::var("b", TypeExpr::alias("Digit"), Some(Literal::ident("a"))),
    ]);
    loaded
        .env
        .get_var("b")
        .unwrap()
        .borrow_mut()
        .assign_int(7)
        .unwrap();
    assert_eq!(loaded.value("a").unwrap().inner_to_string(), "1");
    assert_eq!(loaded.value("b").unwrap().inner_to_string(), "7");
}

#[test]
fn nested_types_render_recursively() {
    let loaded = load(vec![
        digit(),
        Decl::type_decl(
            "Server",
            TypeExpr::record([
                FieldDecl::new("id", TypeExpr::alias("Digit")),
                FieldDecl::new("up", TypeExpr::alias("Boolean")),
                FieldDecl::new(
                    "log",
                    TypeExpr::array(TypeExpr::alias("Digit"), TypeExpr::range(1, 2)),
                ),
            ]),
        ),
        Decl::var("server", TypeExpr::alias("Server"), None),
    ]);
    let server = loaded.value("server").unwrap();
    assert_eq!(
        server.to_string(),
        "Server { id: Digit(0), up: False, log: [1: Digit(0), 2: Digit(0)] }"
    );
    assert_eq!(
        server.inner_to_string(),
        "id: Digit(0), up: False, log: [1: Digit(0), 2: Digit(0)]"
    );
    assert!(matches!(server.lookup_field("up").unwrap(), Value::Either(_)));
}

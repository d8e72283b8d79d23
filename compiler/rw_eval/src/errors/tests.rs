use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_out_of_range_message_names_value_and_type() {
    let err = out_of_range(10, 0, 9, "Digit");
    assert_eq!(
        err.kind.to_string(),
        "value 10 is out of range for Digit (0..9)"
    );
    assert_eq!(err.code(), "E6201");
    assert_eq!(err.span, None);
}

#[test]
fn test_display_includes_code_and_span() {
    let err = unknown_type("Cell").with_span(Span::new(4, 8));
    assert_eq!(err.to_string(), "error[E6001]: unknown type `Cell` at 4..8");
}

#[test]
fn test_with_span_keeps_innermost_location() {
    let err = duplicate_field("x", "Point")
        .with_span(Span::new(10, 11))
        .with_span(Span::new(0, 40));
    assert_eq!(err.span, Some(Span::new(10, 11)));
}

#[test]
fn test_with_span_skips_dummy() {
    let err = unknown_variable("v")
        .with_span(Span::DUMMY)
        .with_span(Span::new(2, 9));
    assert_eq!(err.span, Some(Span::new(2, 9)));
}

#[test]
fn test_with_span_keeps_file_start() {
    let err = missing_default("p")
        .with_span(Span::point(0))
        .with_span(Span::new(0, 12));
    assert_eq!(err.span, Some(Span::point(0)));
}

#[test]
fn test_kinds_match_structurally() {
    let err = index_out_of_range(8, 5, 7, "Array<0..1>[5..7]");
    assert!(matches!(
        err.kind,
        EvalErrorKind::IndexOutOfRange {
            index: 8,
            low: 5,
            high: 7,
            ..
        }
    ));
}

#[test]
fn test_codes_are_unique() {
    let errors = [
        unknown_type("T"),
        unknown_variable("v"),
        duplicate_declaration("v"),
        invalid_range(2, 1),
        duplicate_field("f", "R"),
        duplicate_variant("V", "E"),
        invalid_index_type("R"),
        generic_arity("Array", "one type argument", 0),
        empty_either("E"),
        array_too_large("0..9", 10, 4),
        out_of_range(0, 1, 2, "R"),
        type_mismatch("A", "B"),
        unknown_field("f", "R"),
        index_out_of_range(0, 1, 2, "A"),
        unknown_declaration_kind("import"),
        missing_default("p"),
    ];
    let mut codes: Vec<&str> = errors.iter().map(EvalError::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_type_mismatch_message() {
    let err = type_mismatch("Boolean", "Color");
    assert_eq!(
        err.kind.to_string(),
        "type mismatch: expected Boolean, found Color"
    );
}

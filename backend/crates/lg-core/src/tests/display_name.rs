use crate::{CoreError, validate_display_name};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

#[test]
fn given_empty_name_when_validated_then_error() {
    let result = validate_display_name("", 100);

    assert_that!(result, err(anything()));
    assert!(matches!(result.unwrap_err(), CoreError::Validation { .. }));
}

#[test]
fn given_whitespace_only_name_when_validated_then_error() {
    assert_that!(validate_display_name(" \t ", 100), err(anything()));
}

#[test]
fn given_padded_name_when_validated_then_trimmed() {
    let name = validate_display_name("  Alice ", 100).unwrap();

    assert_that!(name.as_str(), eq("Alice"));
}

#[test]
fn given_name_at_limit_when_validated_then_ok() {
    assert_that!(validate_display_name("abcde", 5), ok(anything()));
}

#[test]
fn given_name_over_limit_when_validated_then_error_names_field() {
    let error = validate_display_name("abcdef", 5).unwrap_err();

    assert_that!(error.field(), eq(Some("display_name")));
}

#[test]
fn given_multibyte_name_when_validated_then_counts_characters() {
    assert_that!(validate_display_name("Zoë", 3), ok(anything()));
}

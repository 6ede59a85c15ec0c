//! 断言失败消息模板
use crate::assertion::value::Value;
use crate::error::CheckError;

pub(crate) fn equals(expected: &Value, actual: &Value) -> CheckError {
    CheckError::failure(format!("expected '{}', got '{}'", expected, actual))
}

pub(crate) fn not_equals(expected: &Value, actual: &Value) -> CheckError {
    CheckError::failure(format!(
        "expected '{}' to not equal '{}'",
        expected, actual
    ))
}

pub(crate) fn contains(collection: &Value, included: &Value) -> CheckError {
    CheckError::failure(format!(
        "expected '{}' to contain '{}'",
        collection, included
    ))
}

pub(crate) fn not_contains(collection: &Value, included: &Value) -> CheckError {
    CheckError::failure(format!(
        "expected '{}' to not contain '{}'",
        collection, included
    ))
}

pub(crate) fn contains_is_null(collection: &Value, included: &Value) -> CheckError {
    CheckError::failure(format!(
        "cannot check if '{}' contains '{}'",
        collection, included
    ))
}

pub(crate) fn not_a_collection(collection: &Value, included: &Value) -> CheckError {
    CheckError::usage(format!(
        "cannot check if '{}' contains '{}' (a {} is not a string or array)",
        collection,
        included,
        collection.type_of()
    ))
}

pub(crate) fn is_type(expected: &str, actual: &Value) -> CheckError {
    CheckError::failure(format!("expected '{}' to be type '{}'", actual, expected))
}

pub(crate) fn is_not_type(expected: &str, actual: &Value) -> CheckError {
    CheckError::failure(format!(
        "expected '{}' to not be type '{}'",
        actual, expected
    ))
}

/// `expected '<actual>' to be <what>` 形式的消息（true、null、truthy ...）
pub(crate) fn to_be(actual: &Value, what: &str) -> CheckError {
    CheckError::failure(format!("expected '{}' to be {}", actual, what))
}

pub(crate) fn to_not_be(actual: &Value, what: &str) -> CheckError {
    CheckError::failure(format!("expected '{}' to not be {}", actual, what))
}

pub(crate) fn expected_error() -> CheckError {
    CheckError::failure("expected to throw an error")
}

pub(crate) fn no_error(raised: &str) -> CheckError {
    CheckError::failure(format!("error '{}' was thrown", raised))
}

pub(crate) fn specific_error(raised: &str, expected: &str) -> CheckError {
    CheckError::failure(format!(
        "error '{}' was thrown, expected '{}'",
        raised, expected
    ))
}

pub(crate) fn invalid_error_type(type_name: &str) -> CheckError {
    CheckError::usage(format!(
        "bad error type '{}' (must be string or Error)",
        type_name
    ))
}

pub(crate) fn callback_must_be_function(error_name: Option<&str>) -> CheckError {
    match error_name {
        Some(name) => CheckError::usage(format!(
            "cannot test for error '{}' in provided callback (it is not a function)",
            name
        )),
        None => CheckError::usage("cannot test for error in provided callback (it is not a function)"),
    }
}

//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.js".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.js".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unsupported_annotation_message() {
    let error = ErrorImpl::UnsupportedAnnotation {
        kind: "string".to_string(),
    };

    assert_eq!(error.to_string(), "Unsupported type annotation: string");
}

#[test]
fn test_rewrite_error_prefix() {
    let error = ErrorImpl::UnsupportedArrayAnnotation.into_rewrite_error();

    assert_eq!(error.to_string(), "[typeguard] Unsupported Array type annotation");
    assert_eq!(error.get_error_name(), "UnsupportedArrayAnnotation");
}

#[test]
fn test_rewrite_error_is_not_wrapped_twice() {
    let error = ErrorImpl::UnsupportedObjectAnnotation
        .into_rewrite_error()
        .into_rewrite_error();

    assert_eq!(error.to_string(), "[typeguard] Unsupported Object type annotation");
    assert_eq!(error.root_cause(), &ErrorImpl::UnsupportedObjectAnnotation);
}

#[test]
fn test_typed_default_value_message() {
    let error = ErrorImpl::TypedDefaultValueUnsupported {
        parameter: "x".to_string(),
    }
    .into_rewrite_error();

    assert_eq!(error.to_string(), "[typeguard] Typed default values are not supported");
}

#[test]
fn test_error_display_uses_internal_error() {
    let error = Error::new(
        ErrorImpl::UnsupportedObjectAnnotation.into_rewrite_error(),
        Position(3, Rc::new("test.js".to_string())),
    );

    assert_eq!(format!("{}", error), "[typeguard] Unsupported Object type annotation");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(0, Rc::new("test.js".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_rewrite_error_tip_follows_reason() {
    let error = Error::new(
        ErrorImpl::TypedDefaultValueUnsupported {
            parameter: "count".to_string(),
        }
        .into_rewrite_error(),
        Position(0, Rc::new("test.js".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`count`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

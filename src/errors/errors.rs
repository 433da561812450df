use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        self.internal_error.get_error_name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number literal: `{}`", token))
            }
            ErrorImpl::UnsupportedAnnotation { .. } => ErrorTip::Suggestion(String::from(
                "Only named, array, nullable, tuple, union, dictionary, intersection and function types can be checked at runtime",
            )),
            ErrorImpl::UnsupportedArrayAnnotation => ErrorTip::Suggestion(String::from(
                "`Array` takes exactly one type argument, e.g. `Array<T>`",
            )),
            ErrorImpl::UnsupportedObjectAnnotation => ErrorTip::Suggestion(String::from(
                "Object types must declare exactly one indexer, e.g. `{ [key: K]: V }`",
            )),
            ErrorImpl::TypedDefaultValueUnsupported { parameter } => ErrorTip::Suggestion(
                format!("Remove either the default value or the type of `{}`", parameter),
            ),
            ErrorImpl::Rewrite { reason } => {
                Error::new((**reason).clone(), self.position.clone()).get_tip()
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("Unsupported type annotation: {kind}")]
    UnsupportedAnnotation { kind: String },
    #[error("Unsupported Array type annotation")]
    UnsupportedArrayAnnotation,
    #[error("Unsupported Object type annotation")]
    UnsupportedObjectAnnotation,
    #[error("Typed default values are not supported")]
    TypedDefaultValueUnsupported { parameter: String },
    #[error("[typeguard] {reason}")]
    Rewrite { reason: Box<ErrorImpl> },
}

impl ErrorImpl {
    pub fn get_error_name(&self) -> &str {
        match self {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnsupportedAnnotation { .. } => "UnsupportedAnnotation",
            ErrorImpl::UnsupportedArrayAnnotation => "UnsupportedArrayAnnotation",
            ErrorImpl::UnsupportedObjectAnnotation => "UnsupportedObjectAnnotation",
            ErrorImpl::TypedDefaultValueUnsupported { .. } => "TypedDefaultValueUnsupported",
            ErrorImpl::Rewrite { reason } => reason.get_error_name(),
        }
    }

    /// Wraps a translation failure with the rewrite prefix. Already wrapped
    /// errors are returned as they are.
    pub fn into_rewrite_error(self) -> ErrorImpl {
        match self {
            ErrorImpl::Rewrite { .. } => self,
            reason => ErrorImpl::Rewrite {
                reason: Box::new(reason),
            },
        }
    }

    /// Returns the innermost error, looking through rewrite wrappers.
    pub fn root_cause(&self) -> &ErrorImpl {
        match self {
            ErrorImpl::Rewrite { reason } => reason.root_cause(),
            other => other,
        }
    }
}

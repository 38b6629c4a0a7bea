//! Failure taxonomy for the generic operations.

use std::fmt;

use serde::Serialize;

use crate::runtime::{
    ops::Operation,
    types::{FuncType, Type},
};

/// Typed failure raised by an operation.
///
/// All of these are contract violations by the caller. Nothing is retried
/// and no partial result is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenericsError {
    /// The sequence argument is not a slice.
    #[error("passed non-slice value to {op}")]
    NotASequence { op: Operation, got: Type },

    /// The callback argument is not a function.
    #[error("passed non-function value to {op}")]
    NotACallable { op: Operation, got: Type },

    /// The callback's signature does not fit the operation.
    #[error("function type and slice type do not match in call to {}", .op.generic_signature())]
    SignatureMismatch {
        op: Operation,
        actual: FuncType,
        mismatch: Mismatch,
    },

    /// A fold callback is well-formed but disagrees with the zero value.
    #[error("zero type and function return type do not match in call to {}", .op.generic_signature())]
    ZeroTypeMismatch {
        op: Operation,
        zero: Type,
        accumulator: Type,
    },

    /// Slice elements cannot be converted to the requested type.
    #[error("{op}: cannot convert type {from} to {to}")]
    NotConvertible { op: Operation, from: Type, to: Type },

    /// The callback itself failed, or returned values it did not declare.
    #[error("{op}: callback error at index {index}: {message}")]
    Callback {
        op: Operation,
        index: usize,
        message: String,
    },

    /// Dynamic dispatch was given the wrong number of arguments.
    #[error("wrong number of arguments to {op}: expected {expected}, got {got}")]
    Arity {
        op: Operation,
        expected: usize,
        got: usize,
    },

    /// Dynamic dispatch was given a name no operation answers to.
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    /// A slice was built from elements of the wrong type.
    #[error("slice element {index} has type {got}, expected {expected}")]
    ElementType {
        index: usize,
        expected: Type,
        got: Type,
    },
}

/// Which part of a callback signature failed verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    ParamCount { expected: usize, got: usize },
    ReturnCount { expected: usize, got: usize },
    Param { index: usize, expected: Type, got: Type },
    Return { index: usize, expected: Type, got: Type },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ParamCount { expected, got } => {
                write!(f, "expected {} parameter(s), got {}", expected, got)
            }
            Mismatch::ReturnCount { expected, got } => {
                write!(f, "expected {} return value(s), got {}", expected, got)
            }
            Mismatch::Param {
                index,
                expected,
                got,
            } => write!(f, "parameter {} must be {}, got {}", index, expected, got),
            Mismatch::Return {
                index,
                expected,
                got,
            } => write!(f, "return value {} must be {}, got {}", index, expected, got),
        }
    }
}

pub(crate) fn format_hint(signature: &str) -> String {
    format!("\n\nHint:\n  {}", signature)
}

impl GenericsError {
    /// Stable diagnostic code, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            GenericsError::NotASequence { .. } => "G0001",
            GenericsError::NotACallable { .. } => "G0002",
            GenericsError::SignatureMismatch { .. } => "G0003",
            GenericsError::ZeroTypeMismatch { .. } => "G0004",
            GenericsError::NotConvertible { .. } => "G0005",
            GenericsError::Callback { .. } => "G0006",
            GenericsError::Arity { .. } => "G0007",
            GenericsError::UnknownOperation { .. } => "G0008",
            GenericsError::ElementType { .. } => "G0009",
        }
    }

    /// Operation that raised the failure, if any.
    pub fn op(&self) -> Option<Operation> {
        match self {
            GenericsError::NotASequence { op, .. }
            | GenericsError::NotACallable { op, .. }
            | GenericsError::SignatureMismatch { op, .. }
            | GenericsError::ZeroTypeMismatch { op, .. }
            | GenericsError::NotConvertible { op, .. }
            | GenericsError::Callback { op, .. }
            | GenericsError::Arity { op, .. } => Some(*op),
            GenericsError::UnknownOperation { .. } | GenericsError::ElementType { .. } => None,
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            GenericsError::NotASequence { got, .. } => {
                vec![("expected", "slice".to_string()), ("got", got.to_string())]
            }
            GenericsError::NotACallable { got, .. } => {
                vec![("expected", "function".to_string()), ("got", got.to_string())]
            }
            GenericsError::SignatureMismatch {
                actual, mismatch, ..
            } => vec![("got", actual.to_string()), ("detail", mismatch.to_string())],
            GenericsError::ZeroTypeMismatch {
                zero, accumulator, ..
            } => vec![
                ("zero", zero.to_string()),
                ("accumulator", accumulator.to_string()),
            ],
            GenericsError::NotConvertible { from, to, .. } => {
                vec![("from", from.to_string()), ("to", to.to_string())]
            }
            GenericsError::Arity { expected, got, .. } => vec![
                ("expected", expected.to_string()),
                ("got", got.to_string()),
            ],
            GenericsError::Callback { .. }
            | GenericsError::UnknownOperation { .. }
            | GenericsError::ElementType { .. } => vec![],
        }
    }

    /// Multi-line rendering with the detail block and a signature hint.
    pub fn render(&self) -> String {
        let mut rendered = format!("error[{}]: {}", self.code(), self);
        let details = self.details();
        if !details.is_empty() {
            rendered.push('\n');
            for (label, value) in details {
                rendered.push_str(&format!("\n  {}: {}", label, value));
            }
        }
        if let Some(op) = self.op() {
            rendered.push_str(&format_hint(op.generic_signature()));
        }
        rendered
    }

    /// Machine-readable report of this failure.
    #[cfg(feature = "report-json")]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
            "operation": self.op().map(|op| op.name()),
            "error": serde_json::to_value(self).unwrap_or(serde_json::Value::Null),
        })
    }
}

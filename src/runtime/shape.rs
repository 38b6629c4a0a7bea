//! Runtime shape discovery for opaque values.
//!
//! Every operation asks this module what it was handed before checking
//! anything else. Inspection never fails: values that are neither sequences
//! nor callables come back as [`Shape::Other`].
use serde::Serialize;

use crate::runtime::{
    function::Function,
    types::{FuncType, Type},
    value::{Slice, Value},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Sequence { element: Type, len: usize },
    Callable(FuncType),
    Other(Type),
}

pub fn inspect(value: &Value) -> Shape {
    if let Some(slice) = sequence(value) {
        return Shape::Sequence {
            element: slice.elem().clone(),
            len: slice.len(),
        };
    }
    if let Some(func) = callable(value) {
        return Shape::Callable(func.sig().clone());
    }
    Shape::Other(value.ty())
}

/// Sequence view of `value`, looking through named slice types.
pub fn sequence(value: &Value) -> Option<&Slice> {
    value.as_slice()
}

/// Callable view of `value`, looking through named function types.
pub fn callable(value: &Value) -> Option<&Function> {
    value.as_func()
}

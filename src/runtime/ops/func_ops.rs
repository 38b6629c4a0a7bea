use crate::runtime::{
    error::GenericsError,
    signature::{ANY_CALLABLE, Bindings, verify},
    value::Value,
};

use super::Operation;

/// Identity(x T) T
pub fn identity(x: Value) -> Value {
    x
}

/// FuncEqual(f1, f2 func) bool
///
/// Reports whether two callables share the same code, whatever their
/// signatures or captured state:
///
/// - closures produced by the same generator are equal;
/// - method values on the same concrete receiver type and method are equal;
/// - method values taken through a trait object compare by trait and method
///   name only, so two different implementors report as equal.
///
/// Fails with `NotACallable` if either argument is not a function.
pub fn func_equal(f1: &Value, f2: &Value) -> Result<bool, GenericsError> {
    let op = Operation::FuncEqual;
    let bindings = Bindings::default();
    let left = verify(op, &ANY_CALLABLE, f1, &bindings)?;
    let right = verify(op, &ANY_CALLABLE, f2, &bindings)?;
    Ok(left.same_code(right))
}

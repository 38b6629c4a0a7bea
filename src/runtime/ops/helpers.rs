use tracing::debug;

use crate::runtime::{
    error::GenericsError,
    shape,
    value::{Slice, Value},
};

use super::Operation;

pub(super) fn check_arity(op: Operation, args: &[Value]) -> Result<(), GenericsError> {
    if args.len() != op.arity() {
        return Err(GenericsError::Arity {
            op,
            expected: op.arity(),
            got: args.len(),
        });
    }
    Ok(())
}

pub(super) fn expect_sequence(op: Operation, value: &Value) -> Result<&Slice, GenericsError> {
    shape::sequence(value).ok_or_else(|| {
        let err = GenericsError::NotASequence {
            op,
            got: value.ty(),
        };
        debug!(op = %op, error = %err, "sequence check failed");
        err
    })
}

/// Gives a same-typed result the named slice type of `seq`, if it has one.
pub(super) fn keep_named_type(seq: &Value, result: Value) -> Value {
    match seq {
        Value::Named(_) => Value::named_unchecked(seq.ty(), result),
        _ => result,
    }
}

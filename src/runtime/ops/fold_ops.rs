use tracing::trace;

use crate::runtime::{
    error::GenericsError,
    invoke::Invoker,
    signature::{Bindings, FOLD_LEFT, FOLD_RIGHT, verify},
    value::Value,
};

use super::{Operation, helpers::expect_sequence};

/// Foldr(slc []T, zero U, pred func(T, U) U) U
///
/// Walks the slice front to back, threading the accumulator through the
/// second argument:
///
/// ```text
/// acc = pred(slc[0], zero)
/// acc = pred(slc[1], acc)
/// ...
/// ```
///
/// Returns `zero` unchanged for an empty slice.
pub fn foldr(seq: &Value, zero: &Value, func: &Value) -> Result<Value, GenericsError> {
    let op = Operation::Foldr;
    let slice = expect_sequence(op, seq)?;
    let zero_ty = zero.ty();
    let f = verify(op, &FOLD_RIGHT, func, &Bindings::fold(slice.elem(), &zero_ty))?;
    trace!(op = %op, len = slice.len(), "running");

    let invoker = Invoker::new(op, f);
    let mut acc = zero.clone();
    for (idx, item) in slice.iter().enumerate() {
        acc = invoker.call_one(idx, &[item.clone(), acc])?;
    }
    Ok(acc)
}

/// Foldl(slc []T, zero U, pred func(U, T) U) U
///
/// Walks the slice back to front, threading the accumulator through the
/// first argument:
///
/// ```text
/// acc = pred(zero, slc[len-1])
/// acc = pred(acc, slc[len-2])
/// ...
/// ```
///
/// Returns `zero` unchanged for an empty slice.
pub fn foldl(seq: &Value, zero: &Value, func: &Value) -> Result<Value, GenericsError> {
    let op = Operation::Foldl;
    let slice = expect_sequence(op, seq)?;
    let zero_ty = zero.ty();
    let f = verify(op, &FOLD_LEFT, func, &Bindings::fold(slice.elem(), &zero_ty))?;
    trace!(op = %op, len = slice.len(), "running");

    let invoker = Invoker::new(op, f);
    let mut acc = zero.clone();
    for (idx, item) in slice.iter().enumerate().rev() {
        acc = invoker.call_one(idx, &[acc, item.clone()])?;
    }
    Ok(acc)
}

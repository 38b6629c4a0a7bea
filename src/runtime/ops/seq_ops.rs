use tracing::trace;

use crate::runtime::{
    error::GenericsError,
    invoke::Invoker,
    signature::{Bindings, MAPPER, PREDICATE, verify},
    value::Value,
};

use super::{
    Operation,
    helpers::{expect_sequence, keep_named_type},
};

/// Map(slc []T, pred func(T) U) []U
///
/// Applies `func` to each element in order and collects the results into a
/// new slice of `U`. An empty input yields an empty `[]U`.
pub fn map(seq: &Value, func: &Value) -> Result<Value, GenericsError> {
    let op = Operation::Map;
    let slice = expect_sequence(op, seq)?;
    let f = verify(op, &MAPPER, func, &Bindings::element(slice.elem()))?;
    trace!(op = %op, len = slice.len(), "running");

    let out_elem = f.sig().returns[0].clone();
    let invoker = Invoker::new(op, f);
    let mut results = Vec::with_capacity(slice.len());
    for (idx, item) in slice.iter().enumerate() {
        results.push(invoker.call_one(idx, std::slice::from_ref(item))?);
    }
    Ok(Value::slice_unchecked(out_elem, results))
}

/// Filter(slc []T, pred func(T) bool) []T
///
/// Keeps the elements for which `pred` returns true, in their original order.
/// The result is only as long as it needs to be and has the same type as
/// `seq`, named slice types included.
pub fn filter(seq: &Value, pred: &Value) -> Result<Value, GenericsError> {
    select(Operation::Filter, seq, pred, true)
}

/// Reject(slc []T, pred func(T) bool) []T
///
/// Complement of [`filter`]: keeps the elements for which `pred` returns false.
pub fn reject(seq: &Value, pred: &Value) -> Result<Value, GenericsError> {
    select(Operation::Reject, seq, pred, false)
}

fn select(op: Operation, seq: &Value, pred: &Value, keep: bool) -> Result<Value, GenericsError> {
    let slice = expect_sequence(op, seq)?;
    let f = verify(op, &PREDICATE, pred, &Bindings::element(slice.elem()))?;
    trace!(op = %op, len = slice.len(), "running");

    let invoker = Invoker::new(op, f);
    let mut results = Vec::new();
    for (idx, item) in slice.iter().enumerate() {
        if invoker.test(idx, std::slice::from_ref(item))? == keep {
            results.push(item.clone());
        }
    }
    let result = Value::slice_unchecked(slice.elem().clone(), results);
    Ok(keep_named_type(seq, result))
}

use tracing::trace;

use crate::runtime::{
    error::GenericsError,
    invoke::Invoker,
    signature::{Bindings, LESS, PREDICATE, verify},
    value::{Slice, Value},
};

use super::{Operation, helpers::expect_sequence};

fn predicate_over<'v>(
    op: Operation,
    seq: &'v Value,
    pred: &'v Value,
) -> Result<(&'v Slice, Invoker<'v>), GenericsError> {
    let slice = expect_sequence(op, seq)?;
    let f = verify(op, &PREDICATE, pred, &Bindings::element(slice.elem()))?;
    trace!(op = %op, len = slice.len(), "running");
    Ok((slice, Invoker::new(op, f)))
}

/// Find(slc []T, pred func(T) bool) T
///
/// First element for which `pred` returns true. `None` when nothing matches,
/// which is distinct from any element value, including a zero one.
pub fn find(seq: &Value, pred: &Value) -> Result<Option<Value>, GenericsError> {
    let (slice, invoker) = predicate_over(Operation::Find, seq, pred)?;
    for (idx, item) in slice.iter().enumerate() {
        if invoker.test(idx, std::slice::from_ref(item))? {
            return Ok(Some(item.clone()));
        }
    }
    Ok(None)
}

/// FindIndex(slc []T, pred func(T) bool) int
///
/// Index of the first match, or -1.
pub fn find_index(seq: &Value, pred: &Value) -> Result<i64, GenericsError> {
    let (slice, invoker) = predicate_over(Operation::FindIndex, seq, pred)?;
    for (idx, item) in slice.iter().enumerate() {
        if invoker.test(idx, std::slice::from_ref(item))? {
            return Ok(idx as i64);
        }
    }
    Ok(-1)
}

/// Some(slc []T, pred func(T) bool) bool
///
/// Stops at the first element that satisfies `pred`.
pub fn some(seq: &Value, pred: &Value) -> Result<bool, GenericsError> {
    let (slice, invoker) = predicate_over(Operation::Some, seq, pred)?;
    for (idx, item) in slice.iter().enumerate() {
        if invoker.test(idx, std::slice::from_ref(item))? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Every(slc []T, pred func(T) bool) bool
///
/// Stops at the first element that fails `pred`.
pub fn every(seq: &Value, pred: &Value) -> Result<bool, GenericsError> {
    let (slice, invoker) = predicate_over(Operation::Every, seq, pred)?;
    for (idx, item) in slice.iter().enumerate() {
        if !invoker.test(idx, std::slice::from_ref(item))? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Count(slc []T, pred func(T) bool) int
pub fn count(seq: &Value, pred: &Value) -> Result<usize, GenericsError> {
    let (slice, invoker) = predicate_over(Operation::Count, seq, pred)?;
    let mut matched = 0;
    for (idx, item) in slice.iter().enumerate() {
        if invoker.test(idx, std::slice::from_ref(item))? {
            matched += 1;
        }
    }
    Ok(matched)
}

/// Max(slc []T, less func(T, T) bool) T
///
/// Largest element according to `less`, where `less(a, b)` means `a < b`.
/// The current best is replaced whenever `less(best, candidate)` holds, so
/// among equal maxima the first one wins. `None` for an empty slice.
pub fn max(seq: &Value, less: &Value) -> Result<Option<Value>, GenericsError> {
    extremum(Operation::Max, seq, less)
}

/// Min(slc []T, less func(T, T) bool) T
///
/// Smallest element according to `less`; the current best is replaced
/// whenever `less(candidate, best)` holds. `None` for an empty slice.
pub fn min(seq: &Value, less: &Value) -> Result<Option<Value>, GenericsError> {
    extremum(Operation::Min, seq, less)
}

fn extremum(op: Operation, seq: &Value, less: &Value) -> Result<Option<Value>, GenericsError> {
    let slice = expect_sequence(op, seq)?;
    let f = verify(op, &LESS, less, &Bindings::element(slice.elem()))?;
    trace!(op = %op, len = slice.len(), "running");
    let invoker = Invoker::new(op, f);

    let mut items = slice.iter().enumerate();
    let Some((_, first)) = items.next() else {
        return Ok(None);
    };
    let mut best = first.clone();
    for (idx, candidate) in items {
        let args = match op {
            Operation::Min => [candidate.clone(), best.clone()],
            _ => [best.clone(), candidate.clone()],
        };
        if invoker.test(idx, &args)? {
            best = candidate.clone();
        }
    }
    Ok(Some(best))
}

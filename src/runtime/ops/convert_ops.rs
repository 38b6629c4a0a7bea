use tracing::{debug, trace};

use crate::runtime::{error::GenericsError, types::Type, value::Value};

use super::{Operation, helpers::expect_sequence};

/// ConvertSlice(slc []T, example U) []U
///
/// Converts each element to the type of `example`. A `Nil` example has no
/// concrete type and is rejected with `NotConvertible`.
pub fn convert_slice(seq: &Value, example: &Value) -> Result<Value, GenericsError> {
    convert_to_example(Operation::ConvertSlice, seq, example)
}

/// Converts to the type of `example` on behalf of `op`.
pub(super) fn convert_to_example(
    op: Operation,
    seq: &Value,
    example: &Value,
) -> Result<Value, GenericsError> {
    if let Value::Nil = example {
        let slice = expect_sequence(op, seq)?;
        let err = GenericsError::NotConvertible {
            op,
            from: slice.elem().clone(),
            to: example.ty(),
        };
        debug!(op = %op, error = %err, "example value has no concrete type");
        return Err(err);
    }
    convert_elements(op, seq, &example.ty())
}

/// ConvertSliceType(slc []T, typ Type) []typ
///
/// Converts each element to `ty`.
pub fn convert_slice_type(seq: &Value, ty: &Type) -> Result<Value, GenericsError> {
    convert_elements(Operation::ConvertSliceType, seq, ty)
}

/// Convertibility is decided from the declared element type before any
/// element is touched, so an empty slice with an inconvertible element type
/// fails just like a populated one.
fn convert_elements(op: Operation, seq: &Value, target: &Type) -> Result<Value, GenericsError> {
    let slice = expect_sequence(op, seq)?;
    let not_convertible = || {
        let err = GenericsError::NotConvertible {
            op,
            from: slice.elem().clone(),
            to: target.clone(),
        };
        debug!(op = %op, error = %err, "conversion rejected");
        err
    };

    if !slice.elem().convertible_to(target) {
        return Err(not_convertible());
    }
    trace!(op = %op, len = slice.len(), to = %target, "converting");

    let converted = slice
        .iter()
        .map(|item| item.convert(target).ok_or_else(not_convertible))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::slice_unchecked(target.clone(), converted))
}

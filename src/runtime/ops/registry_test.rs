use crate::runtime::{error::GenericsError, function::Function, value::Value};

use super::{Operation, call, execute};

fn ints(items: &[i64]) -> Value {
    Value::from_vec(items.to_vec())
}

fn even() -> Value {
    Value::Func(Function::from_fn1(|i: i64| i % 2 == 0))
}

#[test]
fn names_round_trip() {
    for op in Operation::ALL {
        assert_eq!(Operation::from_name(op.name()), Some(op));
        assert_eq!(op.to_string(), op.name());
        assert!(op.generic_signature().starts_with(op.name()));
    }
    assert_eq!(Operation::from_name("map"), None);
}

#[test]
fn callback_ops_have_required_signature() {
    assert!(Operation::Map.required().is_some());
    assert!(Operation::FuncEqual.required().is_some());
    assert!(Operation::Identity.required().is_none());
    assert!(Operation::ConvertSlice.required().is_none());
}

#[test]
fn execute_dispatches_by_operation() {
    assert_eq!(
        execute(Operation::Filter, vec![ints(&[1, 2, 3, 4]), even()]).unwrap(),
        Some(ints(&[2, 4]))
    );
    assert_eq!(
        execute(Operation::Count, vec![ints(&[1, 2, 3, 4]), even()]).unwrap(),
        Some(Value::Int(2))
    );
    assert_eq!(
        execute(Operation::FindIndex, vec![ints(&[1, 3]), even()]).unwrap(),
        Some(Value::Int(-1))
    );
    assert_eq!(
        execute(Operation::Identity, vec![Value::Nil]).unwrap(),
        Some(Value::Nil)
    );
}

#[test]
fn execute_keeps_no_result_sentinel() {
    assert_eq!(execute(Operation::Find, vec![ints(&[1, 3]), even()]).unwrap(), None);
    let less = Value::Func(Function::from_fn2(|a: i64, b: i64| a < b));
    assert_eq!(execute(Operation::Max, vec![ints(&[]), less]).unwrap(), None);
}

#[test]
fn execute_rejects_wrong_argument_count() {
    let err = execute(Operation::Foldr, vec![ints(&[1])]).unwrap_err();
    assert_eq!(
        err,
        GenericsError::Arity {
            op: Operation::Foldr,
            expected: 3,
            got: 1
        }
    );
}

#[test]
fn convert_slice_type_takes_example_through_registry() {
    let result = execute(
        Operation::ConvertSliceType,
        vec![ints(&[1, 2]), Value::Float64(0.0)],
    )
    .unwrap();
    assert_eq!(result, Some(Value::from_vec(vec![1.0f64, 2.0])));
}

#[test]
fn call_by_name() {
    let add = Value::Func(Function::from_fn2(|i: i64, j: i64| i + j));
    assert_eq!(
        call("Foldr", vec![ints(&[1, 2, 3]), Value::Int(1), add]).unwrap(),
        Some(Value::Int(7))
    );
    let err = call("Zip", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "unknown operation: Zip");
}

#[test]
fn convert_through_registry_rejects_nil_example() {
    for op in [Operation::ConvertSlice, Operation::ConvertSliceType] {
        let err = execute(op, vec![ints(&[1]), Value::Nil]).unwrap_err();
        assert!(matches!(err, GenericsError::NotConvertible { op: got, .. } if got == op));
    }
}

use std::fmt;

use serde::Serialize;

use crate::runtime::{
    error::GenericsError,
    signature::{ANY_CALLABLE, FOLD_LEFT, FOLD_RIGHT, LESS, MAPPER, PREDICATE, RequiredSignature},
    value::Value,
};

mod convert_ops;
mod fold_ops;
mod func_ops;
mod helpers;
mod search_ops;
mod seq_ops;

pub use convert_ops::{convert_slice, convert_slice_type};
pub use fold_ops::{foldl, foldr};
pub use func_ops::{func_equal, identity};
pub use search_ops::{count, every, find, find_index, max, min, some};
pub use seq_ops::{filter, map, reject};

/// The exported generic operations.
///
/// Names are user-visible in diagnostics and are expected to remain stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    Identity,
    Map,
    Filter,
    Reject,
    Foldr,
    Foldl,
    Find,
    FindIndex,
    Some,
    Every,
    Count,
    Max,
    Min,
    FuncEqual,
    ConvertSlice,
    ConvertSliceType,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::Identity,
        Operation::Map,
        Operation::Filter,
        Operation::Reject,
        Operation::Foldr,
        Operation::Foldl,
        Operation::Find,
        Operation::FindIndex,
        Operation::Some,
        Operation::Every,
        Operation::Count,
        Operation::Max,
        Operation::Min,
        Operation::FuncEqual,
        Operation::ConvertSlice,
        Operation::ConvertSliceType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Identity => "Identity",
            Operation::Map => "Map",
            Operation::Filter => "Filter",
            Operation::Reject => "Reject",
            Operation::Foldr => "Foldr",
            Operation::Foldl => "Foldl",
            Operation::Find => "Find",
            Operation::FindIndex => "FindIndex",
            Operation::Some => "Some",
            Operation::Every => "Every",
            Operation::Count => "Count",
            Operation::Max => "Max",
            Operation::Min => "Min",
            Operation::FuncEqual => "FuncEqual",
            Operation::ConvertSlice => "ConvertSlice",
            Operation::ConvertSliceType => "ConvertSliceType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Number of arguments the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Operation::Identity => 1,
            Operation::Foldr | Operation::Foldl => 3,
            _ => 2,
        }
    }

    /// The operation written as if the host language had generics.
    pub fn generic_signature(self) -> &'static str {
        match self {
            Operation::Identity => "Identity(x T) T",
            Operation::Map => "Map(slc []T, pred func(T) U) []U",
            Operation::Filter => "Filter(slc []T, pred func(T) bool) []T",
            Operation::Reject => "Reject(slc []T, pred func(T) bool) []T",
            Operation::Foldr => "Foldr(slc []T, zero U, pred func(T, U) U) U",
            Operation::Foldl => "Foldl(slc []T, zero U, pred func(U, T) U) U",
            Operation::Find => "Find(slc []T, pred func(T) bool) T",
            Operation::FindIndex => "FindIndex(slc []T, pred func(T) bool) int",
            Operation::Some => "Some(slc []T, pred func(T) bool) bool",
            Operation::Every => "Every(slc []T, pred func(T) bool) bool",
            Operation::Count => "Count(slc []T, pred func(T) bool) int",
            Operation::Max => "Max(slc []T, less func(T, T) bool) T",
            Operation::Min => "Min(slc []T, less func(T, T) bool) T",
            Operation::FuncEqual => "FuncEqual(f1, f2 func) bool",
            Operation::ConvertSlice => "ConvertSlice(slc []T, example U) []U",
            Operation::ConvertSliceType => "ConvertSliceType(slc []T, typ Type) []typ",
        }
    }

    /// Callback contract, for operations that take a callback.
    pub fn required(self) -> Option<&'static RequiredSignature> {
        match self {
            Operation::Map => Some(&MAPPER),
            Operation::Filter
            | Operation::Reject
            | Operation::Find
            | Operation::FindIndex
            | Operation::Some
            | Operation::Every
            | Operation::Count => Some(&PREDICATE),
            Operation::Foldr => Some(&FOLD_RIGHT),
            Operation::Foldl => Some(&FOLD_LEFT),
            Operation::Max | Operation::Min => Some(&LESS),
            Operation::FuncEqual => Some(&ANY_CALLABLE),
            Operation::Identity | Operation::ConvertSlice | Operation::ConvertSliceType => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `op` on a dynamic argument list.
///
/// `Ok(None)` is the "no result" sentinel returned by `Find`, `Max` and `Min`;
/// every other operation always produces a value. Through this path
/// `ConvertSliceType` names its target type with an example value, exactly
/// like `ConvertSlice`.
pub fn execute(op: Operation, args: Vec<Value>) -> Result<Option<Value>, GenericsError> {
    helpers::check_arity(op, &args)?;
    let result = match (op, args.as_slice()) {
        (Operation::Identity, [x]) => identity(x.clone()),
        (Operation::Map, [slc, f]) => map(slc, f)?,
        (Operation::Filter, [slc, f]) => filter(slc, f)?,
        (Operation::Reject, [slc, f]) => reject(slc, f)?,
        (Operation::Foldr, [slc, zero, f]) => foldr(slc, zero, f)?,
        (Operation::Foldl, [slc, zero, f]) => foldl(slc, zero, f)?,
        (Operation::Find, [slc, f]) => return find(slc, f),
        (Operation::FindIndex, [slc, f]) => Value::Int(find_index(slc, f)?),
        (Operation::Some, [slc, f]) => Value::Bool(some(slc, f)?),
        (Operation::Every, [slc, f]) => Value::Bool(every(slc, f)?),
        (Operation::Count, [slc, f]) => Value::Int(count(slc, f)? as i64),
        (Operation::Max, [slc, less]) => return max(slc, less),
        (Operation::Min, [slc, less]) => return min(slc, less),
        (Operation::FuncEqual, [f1, f2]) => Value::Bool(func_equal(f1, f2)?),
        (Operation::ConvertSlice | Operation::ConvertSliceType, [slc, example]) => {
            convert_ops::convert_to_example(op, slc, example)?
        }
        (op, args) => {
            return Err(GenericsError::Arity {
                op,
                expected: op.arity(),
                got: args.len(),
            });
        }
    };
    Ok(Some(result))
}

/// Looks an operation up by name and runs it.
pub fn call(name: &str, args: Vec<Value>) -> Result<Option<Value>, GenericsError> {
    let op = Operation::from_name(name).ok_or_else(|| GenericsError::UnknownOperation {
        name: name.to_string(),
    })?;
    execute(op, args)
}

#[cfg(test)]
mod registry_test;

pub mod runtime;

pub use runtime::{
    error::{GenericsError, Mismatch},
    function::{CodeId, Function},
    ops::{
        Operation, call, convert_slice, convert_slice_type, count, every, execute, filter, find,
        find_index, foldl, foldr, func_equal, identity, map, max, min, reject, some,
    },
    reflect::Reflect,
    shape::{Shape, inspect},
    types::{BOOL_TYPE, FuncType, INTERFACE_TYPE, Type},
    value::Value,
};

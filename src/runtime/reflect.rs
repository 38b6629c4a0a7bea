//! Bridge between native Rust types and runtime [`Type`]/[`Value`] pairs.
//!
//! A type that implements [`Reflect`] can describe itself, be wrapped as an
//! opaque value, and be read back out of one. Callbacks built with
//! [`Function::from_fn1`](crate::runtime::function::Function::from_fn1) and
//! friends derive their signatures from these impls.
use std::rc::Rc;

use crate::runtime::{types::Type, value::Value};

pub trait Reflect: Sized + 'static {
    fn reflect_type() -> Type;
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! reflect_scalar {
    ($rust:ty, $variant:ident, $ty:expr) => {
        impl Reflect for $rust {
            fn reflect_type() -> Type {
                $ty
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

reflect_scalar!(bool, Bool, Type::Bool);
reflect_scalar!(i64, Int, Type::Int);
reflect_scalar!(i32, Int32, Type::Int32);
reflect_scalar!(u8, UInt8, Type::UInt8);
reflect_scalar!(f32, Float32, Type::Float32);
reflect_scalar!(f64, Float64, Type::Float64);

impl Reflect for String {
    fn reflect_type() -> Type {
        Type::String
    }

    fn into_value(self) -> Value {
        Value::String(self.into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.to_string()),
            _ => None,
        }
    }
}

impl Reflect for () {
    fn reflect_type() -> Type {
        Type::Unit
    }

    fn into_value(self) -> Value {
        Value::Unit
    }

    fn from_value(value: &Value) -> Option<Self> {
        matches!(value, Value::Unit).then_some(())
    }
}

/// `Value` itself stands for `interface {}`.
impl Reflect for Value {
    fn reflect_type() -> Type {
        Type::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_type() -> Type {
        Type::slice_of(T::reflect_type())
    }

    fn into_value(self) -> Value {
        let items = self.into_iter().map(Reflect::into_value).collect();
        Value::slice_unchecked(T::reflect_type(), items)
    }

    fn from_value(value: &Value) -> Option<Self> {
        let slice = value.as_slice()?;
        if *slice.elem() != T::reflect_type() {
            return None;
        }
        slice.iter().map(T::from_value).collect()
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

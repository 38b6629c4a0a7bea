use std::{fmt, rc::Rc};

use crate::runtime::{error::GenericsError, function::Function, reflect::Reflect, types::Type};

/// Opaque runtime value handed to the generic operations.
///
/// ## Memory Management Model
///
/// Scalars are stored unboxed. Slices, named values and function bodies sit
/// behind `Rc`, so cloning a value is O(1) and never copies elements.
///
/// Values are immutable after creation. Operations read their inputs and
/// build fresh result slices; a caller-supplied slice is never written to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Zero value of `interface {}`.
    Nil,
    Bool(bool),
    Int(i64),
    Int32(i32),
    UInt8(u8),
    Float32(f32),
    Float64(f64),
    String(Rc<str>),
    /// The only value of `struct {}`.
    Unit,
    /// Homogeneous ordered sequence.
    Slice(Rc<Slice>),
    /// Callable with a declared signature.
    Func(Function),
    /// Value of a named type, wrapping a value of its underlying type.
    Named(Rc<NamedValue>),
}

/// Backing storage of [`Value::Slice`].
///
/// Every element has exactly the declared element type, except in
/// `[]interface {}` slices where elements may be of any type.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    elem: Type,
    items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    ty: Type,
    value: Value,
}

impl Slice {
    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }
}

impl Value {
    /// Builds a slice value, checking that every element has type `elem`.
    pub fn slice(elem: Type, items: Vec<Value>) -> Result<Value, GenericsError> {
        if elem != Type::Any {
            for (index, item) in items.iter().enumerate() {
                let got = item.ty();
                if got != elem {
                    return Err(GenericsError::ElementType {
                        index,
                        expected: elem,
                        got,
                    });
                }
            }
        }
        Ok(Value::slice_unchecked(elem, items))
    }

    /// Builds a slice value whose homogeneity the caller already guarantees.
    pub(crate) fn slice_unchecked(elem: Type, items: Vec<Value>) -> Value {
        Value::Slice(Rc::new(Slice { elem, items }))
    }

    pub fn from_vec<T: Reflect>(items: Vec<T>) -> Value {
        items.into_value()
    }

    /// Reads a slice back as native elements; `None` on any type disagreement.
    pub fn to_vec<T: Reflect>(&self) -> Option<Vec<T>> {
        Vec::<T>::from_value(self)
    }

    /// Wraps `value` as a value of the named type `ty`.
    ///
    /// Returns `None` if `ty` is not a named type or `value` does not have its
    /// underlying type.
    pub fn named(ty: Type, value: Value) -> Option<Value> {
        if !matches!(ty, Type::Named(_)) || value.ty() != *ty.underlying() {
            return None;
        }
        Some(Value::named_unchecked(ty, value))
    }

    /// Wraps `value` as `ty` when the caller already guarantees that `value`
    /// has the underlying type of `ty`.
    pub(crate) fn named_unchecked(ty: Type, value: Value) -> Value {
        Value::Named(Rc::new(NamedValue { ty, value }))
    }

    /// Returns the dynamic type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Nil => Type::Any,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Int32(_) => Type::Int32,
            Value::UInt8(_) => Type::UInt8,
            Value::Float32(_) => Type::Float32,
            Value::Float64(_) => Type::Float64,
            Value::String(_) => Type::String,
            Value::Unit => Type::Unit,
            Value::Slice(slice) => Type::slice_of(slice.elem.clone()),
            Value::Func(func) => Type::Func(func.sig().clone()),
            Value::Named(named) => named.ty.clone(),
        }
    }

    /// Strips a named-type wrapper, exposing the underlying representation.
    pub fn unnamed(&self) -> &Value {
        match self {
            Value::Named(named) => &named.value,
            other => other,
        }
    }

    pub fn as_slice(&self) -> Option<&Slice> {
        match self.unnamed() {
            Value::Slice(slice) => Some(slice),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Function> {
        match self.unnamed() {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unnamed() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts this value to `target`, following [`Type::convertible_to`].
    ///
    /// Numeric conversions behave like an `as` cast: float to integer
    /// truncates toward zero, integer narrowing wraps.
    pub fn convert(&self, target: &Type) -> Option<Value> {
        if !self.ty().convertible_to(target) {
            return None;
        }
        if *target == Type::Any {
            return Some(self.clone());
        }

        let base = self.unnamed();
        let converted = if target.is_numeric() {
            cast_numeric(base, target.underlying())?
        } else {
            base.clone()
        };

        match target {
            Type::Named(_) => Value::named(target.clone(), converted),
            _ => Some(converted),
        }
    }
}

fn cast_numeric(value: &Value, target: &Type) -> Option<Value> {
    let (int, float) = match value {
        Value::Int(v) => (*v, *v as f64),
        Value::Int32(v) => (*v as i64, *v as f64),
        Value::UInt8(v) => (*v as i64, *v as f64),
        Value::Float32(v) => (*v as i64, *v as f64),
        Value::Float64(v) => (*v as i64, *v),
        _ => return None,
    };
    Some(match target {
        Type::Int => Value::Int(int),
        Type::Int32 => Value::Int32(int as i32),
        Type::UInt8 => Value::UInt8(int as u8),
        Type::Float32 => Value::Float32(float as f32),
        Type::Float64 => Value::Float64(float),
        _ => return None,
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Unit => write!(f, "{{}}"),
            Value::Slice(slice) => {
                let items: Vec<String> = slice.items.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Func(func) => write!(f, "<{}>", func.sig()),
            Value::Named(named) => write!(f, "{}({})", named.ty, named.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(items: &[i64]) -> Value {
        Value::from_vec(items.to_vec())
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float64(3.5).to_string(), "3.5");
        assert_eq!(Value::Nil.to_string(), "<nil>");
        assert_eq!(ints(&[1, 2]).to_string(), "[1, 2]");
        let alias = Type::named("IntAlias", Type::Int);
        assert_eq!(
            Value::Int(1).convert(&alias).map(|v| v.to_string()),
            Some("IntAlias(1)".to_string())
        );
    }

    #[test]
    fn test_ty() {
        assert_eq!(Value::Nil.ty(), Type::Any);
        assert_eq!(Value::UInt8(1).ty(), Type::UInt8);
        assert_eq!(Value::Unit.ty(), Type::Unit);
        assert_eq!(ints(&[]).ty(), Type::slice_of(Type::Int));
    }

    #[test]
    fn test_slice_rejects_mixed_elements() {
        let err = Value::slice(Type::Int, vec![Value::Int(1), Value::Bool(true)]).unwrap_err();
        assert_eq!(
            err,
            GenericsError::ElementType {
                index: 1,
                expected: Type::Int,
                got: Type::Bool,
            }
        );
    }

    #[test]
    fn test_interface_slice_accepts_anything() {
        let value = Value::slice(Type::Any, vec![Value::Int(1), Value::from("x"), Value::Nil]);
        assert!(value.is_ok());
    }

    #[test]
    fn test_named_requires_underlying_type() {
        let alias = Type::named("IntAlias", Type::Int);
        assert!(Value::named(alias.clone(), Value::Int(1)).is_some());
        assert!(Value::named(alias, Value::Bool(true)).is_none());
        assert!(Value::named(Type::Int, Value::Int(1)).is_none());
    }

    #[test]
    fn test_convert_numeric() {
        assert_eq!(Value::Int(3).convert(&Type::Float64), Some(Value::Float64(3.0)));
        assert_eq!(Value::Float64(2.9).convert(&Type::Int), Some(Value::Int(2)));
        assert_eq!(Value::Int(300).convert(&Type::UInt8), Some(Value::UInt8(44)));
        assert_eq!(Value::Int(1).convert(&Type::String), None);
    }

    #[test]
    fn test_convert_between_named_types() {
        let alias = Type::named("IntAlias", Type::Int);
        let alias2 = Type::named("IntAlias2", Type::Int);
        let a = Value::Int(5).convert(&alias).unwrap();
        let b = a.convert(&alias2).unwrap();
        assert_eq!(b.ty(), alias2);
        assert_eq!(b.unnamed(), &Value::Int(5));
        assert_eq!(b.convert(&Type::Int), Some(Value::Int(5)));
    }

    #[test]
    fn test_convert_to_interface_keeps_value() {
        let v = Value::from("hi");
        assert_eq!(v.convert(&Type::Any), Some(v.clone()));
    }

    #[test]
    fn test_clone_shares_rc_for_slice() {
        let value = ints(&[1, 2, 3]);
        let cloned = value.clone();
        match (value, cloned) {
            (Value::Slice(left), Value::Slice(right)) => {
                assert!(Rc::ptr_eq(&left, &right));
                assert_eq!(Rc::strong_count(&left), 2);
            }
            _ => panic!("expected slice values"),
        }
    }
}

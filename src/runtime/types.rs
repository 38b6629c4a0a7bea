use std::fmt;

use serde::Serialize;

/// Runtime type descriptor reported by [`Value::ty`](crate::runtime::value::Value::ty).
///
/// Types compare structurally, except named types which compare by name and
/// underlying type together. `int` and a named `IntAlias` over `int` are
/// different types, but they are mutually convertible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Type {
    /// `bool`
    Bool,
    /// `int` (64-bit)
    Int,
    /// `int32`
    Int32,
    /// `uint8`
    UInt8,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `string`
    String,
    /// `struct {}`
    Unit,
    /// `interface {}`, the universal type every value converts to.
    Any,
    /// `[]T`
    Slice(Box<Type>),
    /// `func(P...) (R...)`
    Func(FuncType),
    /// `type Name underlying`
    Named(NamedType),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NamedType {
    pub name: String,
    pub underlying: Box<Type>,
}

/// Declared parameter and return types of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub returns: Vec<Type>,
}

/// The boolean type every predicate must return.
pub const BOOL_TYPE: Type = Type::Bool;

/// The universal type, written `interface {}`.
pub const INTERFACE_TYPE: Type = Type::Any;

impl Type {
    pub fn slice_of(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn func(params: Vec<Type>, returns: Vec<Type>) -> Self {
        Type::Func(FuncType::new(params, returns))
    }

    /// Declares a named type. Named types never nest: naming a named type
    /// takes over its underlying type.
    pub fn named(name: impl Into<String>, underlying: Type) -> Self {
        Type::Named(NamedType {
            name: name.into(),
            underlying: Box::new(underlying.underlying().clone()),
        })
    }

    /// Strips one level of naming; every other type is its own underlying type.
    pub fn underlying(&self) -> &Type {
        match self {
            Type::Named(named) => &named.underlying,
            other => other,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.underlying(),
            Type::Int | Type::Int32 | Type::UInt8 | Type::Float32 | Type::Float64
        )
    }

    /// Element type of a slice type, looking through names.
    pub fn elem(&self) -> Option<&Type> {
        match self.underlying() {
            Type::Slice(elem) => Some(elem.as_ref()),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&FuncType> {
        match self.underlying() {
            Type::Func(sig) => Some(sig),
            _ => None,
        }
    }

    /// Reports whether a value of this type can be converted to `target`.
    ///
    /// Allowed conversions:
    /// - identical types
    /// - anything to `interface {}`
    /// - types sharing an underlying type
    /// - numeric to numeric
    pub fn convertible_to(&self, target: &Type) -> bool {
        if self == target || *target == Type::Any {
            return true;
        }
        if self.underlying() == target.underlying() {
            return true;
        }
        self.is_numeric() && target.is_numeric()
    }
}

impl FuncType {
    pub fn new(params: Vec<Type>, returns: Vec<Type>) -> Self {
        Self { params, returns }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Int32 => write!(f, "int32"),
            Type::UInt8 => write!(f, "uint8"),
            Type::Float32 => write!(f, "float32"),
            Type::Float64 => write!(f, "float64"),
            Type::String => write!(f, "string"),
            Type::Unit => write!(f, "struct {{}}"),
            Type::Any => write!(f, "interface {{}}"),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Func(sig) => write!(f, "{}", sig),
            Type::Named(named) => write!(f, "{}", named.name),
        }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        write!(f, "func({})", params.join(", "))?;
        match self.returns.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            many => {
                let items: Vec<String> = many.iter().map(|r| r.to_string()).collect();
                write!(f, " ({})", items.join(", "))
            }
        }
    }
}

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    rc::Rc,
};

use crate::runtime::{reflect::Reflect, types::FuncType, value::Value};

/// Native body of a callable: ordered arguments in, ordered results out.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Vec<Value>, String>;

/// Identity of the code behind a [`Function`].
///
/// Two functions are identity-equal when their `CodeId`s match, regardless
/// of captured state. Method values taken through a trait object resolve to
/// the trait's dispatch entry, so every implementor of the same trait method
/// shares one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeId {
    /// Rust type of the closure or fn item implementing the body.
    Code(TypeId),
    /// Address of a body passed as a plain `fn` pointer.
    Address(usize),
    /// A body passed behind `Box<dyn Fn>`, `Rc<dyn Fn>` or `&dyn Fn`. Its
    /// code is hidden, so each constructed function is its own identity,
    /// shared only by its clones.
    Instance(usize),
    /// Method `name` on a concrete receiver type.
    Method { receiver: TypeId, name: &'static str },
    /// Method `name` reached through the capability `interface`.
    Dispatch {
        interface: TypeId,
        name: &'static str,
    },
}

#[derive(Clone)]
pub struct Function {
    sig: FuncType,
    code: CodeId,
    label: &'static str,
    body: Rc<NativeFn>,
}

impl Function {
    /// Wraps a raw body with an explicit signature.
    ///
    /// The engine checks every result against `sig` after each call, so a body
    /// that returns values of other types is reported rather than trusted.
    pub fn new<F>(sig: FuncType, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, String> + 'static,
    {
        let erasure = erasure::<F, fn(&[Value]) -> Result<Vec<Value>, String>, NativeFn>(
            &body,
            |ptr| ptr as usize,
        );
        Self::assemble::<F>(sig, erasure, Rc::new(body))
    }

    /// Method value bound to a concrete receiver type `R`.
    pub fn method<R, F>(name: &'static str, sig: FuncType, body: F) -> Self
    where
        R: ?Sized + 'static,
        F: Fn(&[Value]) -> Result<Vec<Value>, String> + 'static,
    {
        Self {
            sig,
            code: CodeId::Method {
                receiver: TypeId::of::<R>(),
                name,
            },
            label: name,
            body: Rc::new(body),
        }
    }

    /// Method value obtained through a trait object `I` (e.g. `dyn Shape`).
    pub fn dispatch<I, F>(name: &'static str, sig: FuncType, body: F) -> Self
    where
        I: ?Sized + 'static,
        F: Fn(&[Value]) -> Result<Vec<Value>, String> + 'static,
    {
        Self {
            sig,
            code: CodeId::Dispatch {
                interface: TypeId::of::<I>(),
                name,
            },
            label: name,
            body: Rc::new(body),
        }
    }

    pub fn from_fn0<R, F>(f: F) -> Self
    where
        R: Reflect,
        F: Fn() -> R + 'static,
    {
        let erasure = erasure::<F, fn() -> R, dyn Fn() -> R>(&f, |ptr| ptr as usize);
        let sig = FuncType::new(vec![], vec![R::reflect_type()]);
        Self::assemble::<F>(
            sig,
            erasure,
            Rc::new(move |args: &[Value]| {
                if !args.is_empty() {
                    return Err(format!("expected 0 arguments, got {}", args.len()));
                }
                Ok(vec![f().into_value()])
            }),
        )
    }

    pub fn from_fn1<A, R, F>(f: F) -> Self
    where
        A: Reflect,
        R: Reflect,
        F: Fn(A) -> R + 'static,
    {
        let erasure = erasure::<F, fn(A) -> R, dyn Fn(A) -> R>(&f, |ptr| ptr as usize);
        let sig = FuncType::new(vec![A::reflect_type()], vec![R::reflect_type()]);
        Self::assemble::<F>(
            sig,
            erasure,
            Rc::new(move |args: &[Value]| {
                let [a] = args else {
                    return Err(format!("expected 1 argument, got {}", args.len()));
                };
                Ok(vec![f(extract(a, 0)?).into_value()])
            }),
        )
    }

    pub fn from_fn2<A, B, R, F>(f: F) -> Self
    where
        A: Reflect,
        B: Reflect,
        R: Reflect,
        F: Fn(A, B) -> R + 'static,
    {
        let erasure = erasure::<F, fn(A, B) -> R, dyn Fn(A, B) -> R>(&f, |ptr| ptr as usize);
        let sig = FuncType::new(
            vec![A::reflect_type(), B::reflect_type()],
            vec![R::reflect_type()],
        );
        Self::assemble::<F>(
            sig,
            erasure,
            Rc::new(move |args: &[Value]| {
                let [a, b] = args else {
                    return Err(format!("expected 2 arguments, got {}", args.len()));
                };
                Ok(vec![f(extract(a, 0)?, extract(b, 1)?).into_value()])
            }),
        )
    }

    fn assemble<F: 'static>(sig: FuncType, erasure: Erasure, body: Rc<NativeFn>) -> Self {
        let code = match erasure {
            Erasure::Unique => CodeId::Code(TypeId::of::<F>()),
            Erasure::Pointer(addr) => CodeId::Address(addr),
            Erasure::Hidden => CodeId::Instance(Rc::as_ptr(&body) as *const () as usize),
        };
        Self {
            sig,
            code,
            label: type_name::<F>(),
            body,
        }
    }

    pub fn sig(&self) -> &FuncType {
        &self.sig
    }

    pub fn code(&self) -> CodeId {
        self.code
    }

    /// Best-effort name of the implementing code, for diagnostics only.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Runs the body without any signature checks.
    pub fn call(&self, args: &[Value]) -> Result<Vec<Value>, String> {
        (self.body)(args)
    }

    pub fn same_code(&self, other: &Function) -> bool {
        self.code == other.code
    }
}

/// How much of a body's code its Rust type reveals.
enum Erasure {
    /// Closure or fn item: the type names exactly one piece of code.
    Unique,
    /// Plain `fn` pointer with this address.
    Pointer(usize),
    /// Trait object: every body of this signature shares the type.
    Hidden,
}

/// Classifies a body of type `F`, where `P` is the `fn` pointer type and `D`
/// the `dyn Fn` type for the same signature.
fn erasure<F, P, D>(body: &F, address: fn(P) -> usize) -> Erasure
where
    F: 'static,
    P: Copy + 'static,
    D: ?Sized + 'static,
{
    if let Some(ptr) = (body as &dyn Any).downcast_ref::<P>() {
        return Erasure::Pointer(address(*ptr));
    }
    let ty = TypeId::of::<F>();
    if ty == TypeId::of::<Box<D>>()
        || ty == TypeId::of::<Rc<D>>()
        || ty == TypeId::of::<&'static D>()
    {
        return Erasure::Hidden;
    }
    Erasure::Unique
}

fn extract<T: Reflect>(value: &Value, position: usize) -> Result<T, String> {
    T::from_value(value).ok_or_else(|| {
        format!(
            "argument {} has type {}, expected {}",
            position,
            value.ty(),
            T::reflect_type()
        )
    })
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}: {})", self.label, self.sig)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.sig == other.sig
    }
}

//! Declarative callback contracts and the verifier that enforces them.
//!
//! Each operation that takes a callback names one [`RequiredSignature`].
//! [`verify`] checks an actual callable against it in a fixed order:
//! callable kind, parameter count, return count, parameter types, return
//! types, then the fold zero-value cross-check. The first failing step
//! decides the reported error.
use tracing::debug;

use crate::runtime::{
    error::{GenericsError, Mismatch},
    function::Function,
    ops::Operation,
    shape,
    types::{BOOL_TYPE, FuncType, Type},
    value::Value,
};

/// Constraint on one callback parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// Must equal the sequence's element type.
    Element,
    /// Must equal the bound accumulator type.
    Accumulator,
    /// Must equal the type of parameter `k`.
    SameAs(usize),
    /// Anything goes.
    Free,
}

/// Constraint on one callback return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnRule {
    Bool,
    Element,
    Accumulator,
    /// Unconstrained on its own, but must equal the type of parameter `k`.
    SameAsParam(usize),
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredSignature {
    /// Any callable, of any arity.
    AnyCallable,
    Exact {
        params: &'static [ParamRule],
        returns: &'static [ReturnRule],
        /// The caller's zero value must have the type of return value `k`.
        zero_matches_return: Option<usize>,
    },
}

/// `func(T) bool`
pub const PREDICATE: RequiredSignature = RequiredSignature::Exact {
    params: &[ParamRule::Element],
    returns: &[ReturnRule::Bool],
    zero_matches_return: None,
};

/// `func(T) U`
pub const MAPPER: RequiredSignature = RequiredSignature::Exact {
    params: &[ParamRule::Element],
    returns: &[ReturnRule::Free],
    zero_matches_return: None,
};

/// `func(T, U) U` with `zero U`
pub const FOLD_RIGHT: RequiredSignature = RequiredSignature::Exact {
    params: &[ParamRule::Element, ParamRule::Free],
    returns: &[ReturnRule::SameAsParam(1)],
    zero_matches_return: Some(0),
};

/// `func(U, T) U` with `zero U`
pub const FOLD_LEFT: RequiredSignature = RequiredSignature::Exact {
    params: &[ParamRule::Free, ParamRule::Element],
    returns: &[ReturnRule::SameAsParam(0)],
    zero_matches_return: Some(0),
};

/// `func(T, T) bool`
pub const LESS: RequiredSignature = RequiredSignature::Exact {
    params: &[ParamRule::Element, ParamRule::Element],
    returns: &[ReturnRule::Bool],
    zero_matches_return: None,
};

pub const ANY_CALLABLE: RequiredSignature = RequiredSignature::AnyCallable;

/// Types the rules are resolved against. An unbound slot leaves the
/// corresponding rule unconstrained.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bindings<'a> {
    pub element: Option<&'a Type>,
    pub accumulator: Option<&'a Type>,
    pub zero: Option<&'a Type>,
}

impl<'a> Bindings<'a> {
    pub fn element(element: &'a Type) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }

    pub fn fold(element: &'a Type, zero: &'a Type) -> Self {
        Self {
            element: Some(element),
            accumulator: None,
            zero: Some(zero),
        }
    }
}

/// Checks `value` against `required` and hands back the verified callable.
pub fn verify<'v>(
    op: Operation,
    required: &RequiredSignature,
    value: &'v Value,
    bindings: &Bindings<'_>,
) -> Result<&'v Function, GenericsError> {
    let result = check(op, required, value, bindings);
    if let Err(err) = &result {
        debug!(op = %op, code = err.code(), error = %err, "callback verification failed");
    }
    result
}

fn check<'v>(
    op: Operation,
    required: &RequiredSignature,
    value: &'v Value,
    bindings: &Bindings<'_>,
) -> Result<&'v Function, GenericsError> {
    let Some(func) = shape::callable(value) else {
        return Err(GenericsError::NotACallable {
            op,
            got: value.ty(),
        });
    };

    let RequiredSignature::Exact {
        params,
        returns,
        zero_matches_return,
    } = *required
    else {
        return Ok(func);
    };

    let sig = func.sig();
    let mismatch = |mismatch: Mismatch| GenericsError::SignatureMismatch {
        op,
        actual: sig.clone(),
        mismatch,
    };

    if sig.params.len() != params.len() {
        return Err(mismatch(Mismatch::ParamCount {
            expected: params.len(),
            got: sig.params.len(),
        }));
    }
    if sig.returns.len() != returns.len() {
        return Err(mismatch(Mismatch::ReturnCount {
            expected: returns.len(),
            got: sig.returns.len(),
        }));
    }

    for (index, (rule, got)) in params.iter().zip(&sig.params).enumerate() {
        if let Some(expected) = param_expectation(*rule, sig, bindings)
            && expected != got
        {
            return Err(mismatch(Mismatch::Param {
                index,
                expected: expected.clone(),
                got: got.clone(),
            }));
        }
    }

    for (index, (rule, got)) in returns.iter().zip(&sig.returns).enumerate() {
        if let Some(expected) = return_expectation(*rule, sig, bindings)
            && expected != got
        {
            return Err(mismatch(Mismatch::Return {
                index,
                expected: expected.clone(),
                got: got.clone(),
            }));
        }
    }

    // A callback can be structurally valid (func(A, B) B) while still
    // disagreeing with the zero value supplied at the call site.
    if let (Some(k), Some(zero)) = (zero_matches_return, bindings.zero)
        && let Some(accumulator) = sig.returns.get(k)
        && accumulator != zero
    {
        return Err(GenericsError::ZeroTypeMismatch {
            op,
            zero: zero.clone(),
            accumulator: accumulator.clone(),
        });
    }

    Ok(func)
}

fn param_expectation<'a>(
    rule: ParamRule,
    sig: &'a FuncType,
    bindings: &Bindings<'a>,
) -> Option<&'a Type> {
    match rule {
        ParamRule::Element => bindings.element,
        ParamRule::Accumulator => bindings.accumulator,
        ParamRule::SameAs(k) => sig.params.get(k),
        ParamRule::Free => None,
    }
}

fn return_expectation<'a>(
    rule: ReturnRule,
    sig: &'a FuncType,
    bindings: &Bindings<'a>,
) -> Option<&'a Type> {
    match rule {
        ReturnRule::Bool => Some(&BOOL_TYPE),
        ReturnRule::Element => bindings.element,
        ReturnRule::Accumulator => bindings.accumulator,
        ReturnRule::SameAsParam(k) => sig.params.get(k),
        ReturnRule::Free => None,
    }
}

use tracing::trace;

use crate::runtime::{
    error::GenericsError,
    function::Function,
    ops::Operation,
    types::{FuncType, Type},
    value::Value,
};

/// Drives a verified callback on behalf of one operation.
///
/// One call per element, in the order the operation asks for. Each call's
/// results are checked against the callback's declared return types before
/// they reach the operation, so result slices always honor their element
/// type.
pub struct Invoker<'f> {
    op: Operation,
    func: &'f Function,
}

impl<'f> Invoker<'f> {
    pub fn new(op: Operation, func: &'f Function) -> Self {
        Self { op, func }
    }

    /// Calls the callback with `args`; `index` is the element position used
    /// in diagnostics.
    pub fn call(&self, index: usize, args: &[Value]) -> Result<Vec<Value>, GenericsError> {
        trace!(op = %self.op, index, "invoking callback");
        let returns = self.func.call(args).map_err(|message| self.failure(index, message))?;
        check_returns(self.func.sig(), &returns).map_err(|message| self.failure(index, message))?;
        Ok(returns)
    }

    /// Calls a single-result callback.
    pub fn call_one(&self, index: usize, args: &[Value]) -> Result<Value, GenericsError> {
        self.call(index, args)?
            .into_iter()
            .next()
            .ok_or_else(|| self.failure(index, "callback returned no value".to_string()))
    }

    /// Calls a predicate.
    pub fn test(&self, index: usize, args: &[Value]) -> Result<bool, GenericsError> {
        let result = self.call_one(index, args)?;
        result
            .as_bool()
            .ok_or_else(|| self.failure(index, format!("predicate returned {}", result.ty())))
    }

    fn failure(&self, index: usize, message: String) -> GenericsError {
        GenericsError::Callback {
            op: self.op,
            index,
            message,
        }
    }
}

fn check_returns(sig: &FuncType, returns: &[Value]) -> Result<(), String> {
    if returns.len() != sig.returns.len() {
        return Err(format!(
            "returned {} value(s), declared {}",
            returns.len(),
            sig.returns.len()
        ));
    }
    for (index, (value, declared)) in returns.iter().zip(&sig.returns).enumerate() {
        if *declared != Type::Any && value.ty() != *declared {
            return Err(format!(
                "return value {} has type {}, declared {}",
                index,
                value.ty(),
                declared
            ));
        }
    }
    Ok(())
}

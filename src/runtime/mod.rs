//! Runtime type-checking engine behind the generic operations.
//!
//! # Layers
//! - [`shape`] discovers what an opaque [`value::Value`] is.
//! - [`signature`] checks a callback against an operation's contract.
//! - [`invoke`] drives a verified callback element by element.
//! - [`ops`] composes the three into the exported operations.
//!
//! # Sharing Model
//! Values are immutable and `Rc`-shared, so they stay on the thread that
//! built them. Operations keep no state between calls; the only globals are
//! constant type descriptors such as [`types::BOOL_TYPE`].
pub mod error;
pub mod function;
pub mod invoke;
pub mod ops;
pub mod reflect;
pub mod shape;
pub mod signature;
pub mod types;
pub mod value;

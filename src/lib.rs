#![forbid(unsafe_code)]
//! Karst compile-time constant evaluation.
//!
//! This crate implements the two cooperating halves of the compiler's
//! constant pipeline:
//!
//! - [`consteval`] — the constant folder: reduces literal-shaped expressions
//!   (literals, const property reads, unary/binary operator calls, string
//!   templates) to typed [`FoldedConstant`]s without executing the program.
//! - [`annotations`] — the annotation value resolver: converts annotation
//!   arguments (arrays, varargs, nested annotations, enum entries, class
//!   literals) into the structured [`AnnotationValue`] model consumed by
//!   checkers, metadata emission, and IDE tooling.
//!
//! Both halves are pure tree walkers over the resolved program representation
//! in [`karst_tree`]; they borrow the tree and session for the duration of a
//! call and never retain references past it.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **"Not a constant" is not an error.** The folder returns `Option`, the
//!   resolver returns [`AnnotationValue::Unsupported`]. Callers treat both as
//!   "no compile-time value available".
//!
//! - **True invariants**: a malformed resolved tree (an error-kinded literal,
//!   a dangling symbol id) is a compiler bug in an earlier phase. These paths
//!   go through [`diagnostics::EvalError`] and panic with an `INVARIANT:`
//!   message rather than silently degrading.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod annotations;
pub mod consteval;
pub mod diagnostics;
pub mod numeric;

pub use annotations::{
    AnnotationApplication, AnnotationValue, KClassValue, NamedAnnotationValue, resolve_argument,
    resolve_named_arguments,
};
pub use consteval::{CompileTimeType, ConstantFolder, EvaluationMode, FoldedConstant, adjust_type};

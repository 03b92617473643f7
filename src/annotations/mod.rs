//! Annotation argument resolution.
//!
//! Annotation arguments are restricted to a structural subset of the
//! expression language: constants, arrays, nested annotations, enum entries,
//! and class literals. The resolver walks that structure directly and only
//! falls back to the constant folder (under
//! [`EvaluationMode::ConstOnly`](crate::consteval::EvaluationMode)) for the
//! leaf constants.
//!
//! ## Notes
//!
//! - **Totality**: [`resolve_argument`] always produces a value;
//!   [`AnnotationValue::Unsupported`] marks arguments with no compile-time
//!   representation.
//! - **Vararg flattening is lossy**: contributors that fail to resolve are
//!   dropped from the array instead of failing it.

mod resolver;
mod values;
#[cfg(test)]
mod tests;

pub use resolver::{resolve_argument, resolve_named_arguments};
pub use values::{AnnotationApplication, AnnotationValue, KClassValue, NamedAnnotationValue};

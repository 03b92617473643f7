//! Compile-time constant folding.
//!
//! The folder reduces literal-shaped expressions to typed constants without
//! executing the program. It handles direct literals, reads of foldable
//! properties and fields, string-template concatenation, the `String.length`
//! intrinsic, and operator-convention calls dispatched through the tables in
//! [`ops`].
//!
//! ## Notes
//!
//! - **Two modes**: [`EvaluationMode::ConstOnly`] folds only declarations
//!   explicitly marked `const` (or `static final` fields);
//!   [`EvaluationMode::Full`] additionally folds plain `val` initializers.
//! - **Failure is a value**: anything unfoldable yields `None`. Exceptions
//!   never cross this module's boundary for ordinary non-constants.
//! - **Purity**: the folder borrows the session and tree read-only; a
//!   [`FoldedConstant`] owns its data and can outlive the resolution pass.

mod folder;
mod kinds;
mod ops;

use karst_tree::{ConstValue, ConstantKind, Span, TypeRef};

pub use folder::{ConstantFolder, adjust_type};
pub use kinds::constant_kind_of;
pub use ops::CompileTimeType;

/// Evaluation policy for property and field folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Fold `val` initializers even when not marked `const`.
    Full,
    /// Restrict folding to `const` properties and `static final` fields.
    ConstOnly,
}

/// A successfully folded compile-time constant.
///
/// Immutable once produced; re-kinding via [`adjust_type`] builds a new value
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedConstant {
    pub value: ConstValue,
    pub span: Span,
    pub ty: TypeRef,
}

impl FoldedConstant {
    pub fn kind(&self) -> ConstantKind {
        self.value.kind()
    }
}

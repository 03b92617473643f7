//! Internal-error diagnostics for the constant pipeline.
//!
//! Ordinary non-foldability never surfaces here. The only error this module
//! knows about is a resolved tree that violates the contracts the pipeline
//! assumes, which indicates a bug in an earlier resolution phase.

use karst_tree::Span;
use miette::Diagnostic;
use thiserror::Error;

/// Contract violations in the resolved tree handed to the constant pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    /// The tree or session broke an invariant resolution is supposed to
    /// guarantee (error-kinded literal, dangling symbol id, cyclic alias).
    #[error("malformed resolved tree at {}..{}: {detail}", .span.start, .span.end)]
    #[diagnostic(
        code(karst::consteval::malformed_tree),
        help("this is a compiler bug in an earlier resolution phase, not a source error")
    )]
    MalformedTree { detail: String, span: Span },
}

/// Fail loudly on a malformed tree with a rendered diagnostic.
///
/// Per the crate's panic policy this is reserved for invariant violations;
/// anything a caller could plausibly hand us on purpose must return
/// `None`/`Unsupported` instead.
pub(crate) fn malformed_tree(detail: impl Into<String>, span: Span) -> ! {
    let error = EvalError::MalformedTree {
        detail: detail.into(),
        span,
    };
    panic!("INVARIANT: {:?}", miette::Report::new(error));
}

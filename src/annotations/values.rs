//! The resolved annotation argument model.

use karst_tree::{CallableId, ClassId, ConstValue, Span, SymbolId, UseSiteTarget};

/// A fully resolved annotation argument.
///
/// The model is total: every expression maps to some variant, with
/// [`AnnotationValue::Unsupported`] standing in for arguments that have no
/// compile-time value. Consumers can therefore walk annotation arguments
/// without an error channel.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// A folded constant (literal, const property read, operator fold).
    Constant { value: ConstValue, span: Span },
    /// A flattened array argument (vararg pack, collection literal, or
    /// `arrayOf`-family call).
    Array {
        elements: Vec<AnnotationValue>,
        span: Span,
    },
    /// A nested annotation application.
    Annotation(AnnotationApplication),
    /// A reference to an enum entry.
    EnumEntry { entry: CallableId, span: Span },
    /// A `X::class` literal.
    KClass(KClassValue),
    /// The argument has no representable compile-time value.
    Unsupported,
}

impl AnnotationValue {
    pub fn is_supported(&self) -> bool {
        !matches!(self, AnnotationValue::Unsupported)
    }
}

/// A resolved annotation application, as it appears either at an annotation
/// use site or nested inside another annotation's arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationApplication {
    pub class: ClassId,
    pub call_span: Span,
    /// Use-site target (`@field:`, `@get:`, ...); `None` when nested inside
    /// another annotation's arguments.
    pub use_site_target: Option<UseSiteTarget>,
    pub arguments: Vec<NamedAnnotationValue>,
    /// Position among the sibling annotations at a use site; `None` when
    /// nested.
    pub index: Option<u32>,
}

/// The class a `::class` literal names.
#[derive(Debug, Clone, PartialEq)]
pub enum KClassValue {
    /// A class addressable by its stable id.
    NonLocal { class: ClassId },
    /// A local class, addressable only through its declaration symbol.
    Local { declaration: SymbolId },
    /// The literal did not resolve; `qualifier` carries the best-effort
    /// dotted source name recovered from the unresolved qualifier chain.
    Error {
        span: Span,
        qualifier: Option<String>,
    },
}

/// One `name = value` pair of a resolved annotation call.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedAnnotationValue {
    pub name: String,
    pub value: AnnotationValue,
}

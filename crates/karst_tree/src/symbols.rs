//! Resolved symbols and the session that owns them.
//!
//! The [`Session`] is the read-only view of resolution output the constant
//! pipeline borrows for the duration of a call. It is a flat arena: resolved
//! references in the tree carry [`SymbolId`]s that index into it. An id that
//! does not resolve inside the session means the tree and session were built
//! by different phases, which is a contract violation, not an input error.

use std::collections::HashMap;

use crate::expr::Expr;
use crate::span::Spanned;
use crate::types::{CallableId, ClassId, TypeRef};

/// Index of a symbol inside a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// A resolved declaration the tree can reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Property(PropertySymbol),
    Field(FieldSymbol),
    Function(FunctionSymbol),
    Class(ClassSymbol),
    EnumEntry(EnumEntrySymbol),
}

/// A resolved property declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySymbol {
    pub callable_id: CallableId,
    pub ty: TypeRef,
    /// Declared `const` (module-level compile-time constant).
    pub is_const: bool,
    /// Read-only binding (`val`); `false` means `var`, which never folds.
    pub is_val: bool,
    /// Initializer expression.
    ///
    /// Contract: callers must have driven body resolution to completion
    /// before handing the session to the constant pipeline. This accessor is
    /// deliberately a plain field rather than a lazy cell so the precondition
    /// stays visible at the phase boundary.
    pub initializer: Option<Spanned<Expr>>,
}

/// A resolved field declaration (platform-interop semantics).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSymbol {
    pub callable_id: CallableId,
    pub ty: TypeRef,
    pub is_static: bool,
    pub is_final: bool,
    pub initializer: Option<Spanned<Expr>>,
}

/// A resolved function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub callable_id: CallableId,
    pub kind: FunctionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    /// Operator-convention function dispatched by name through the constant
    /// operator tables (`plus`, `unaryMinus`, `toLong`, ...).
    Operator {
        /// Declared receiver type; the folder coerces the receiver's value to
        /// this type before consulting the tables.
        receiver_ty: TypeRef,
    },
    Constructor {
        /// The class the constructor belongs to.
        owner: SymbolId,
    },
    /// The `arrayOf`-family intrinsic that packages its vararg into an array.
    ArrayFactory,
    Regular,
}

/// A resolved class-like declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSymbol {
    pub class_id: ClassId,
    pub is_local: bool,
    pub is_annotation: bool,
    /// When this class-like symbol is a type alias, the symbol it expands to.
    pub alias_of: Option<SymbolId>,
}

/// A resolved enum entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntrySymbol {
    pub callable_id: CallableId,
}

/// Annotation use-site target, carried through to the annotation value model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSiteTarget {
    Field,
    Property,
    Param,
    Get,
    Set,
}

/// Read-only resolution output for one module.
#[derive(Debug, Default, Clone)]
pub struct Session {
    symbols: HashMap<SymbolId, Symbol>,
    next_id: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.next_id);
        self.next_id += 1;
        self.symbols.insert(id, symbol);
        id
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    pub fn class(&self, id: SymbolId) -> Option<&ClassSymbol> {
        match self.symbols.get(&id) {
            Some(Symbol::Class(class)) => Some(class),
            _ => None,
        }
    }
}

//! Resolved type references and stable ids.

use std::fmt;

/// Package prefix of the builtin types (`karst.Int`, `karst.String`, ...).
pub const BUILTIN_PACKAGE: &str = "karst";

/// Stable identity of a resolved class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId {
    pub package: Vec<String>,
    pub name: String,
}

impl ClassId {
    pub fn new(package: &[&str], name: &str) -> Self {
        Self {
            package: package.iter().map(|s| s.to_string()).collect(),
            name: name.to_string(),
        }
    }

    pub fn builtin(name: &str) -> Self {
        Self::new(&[BUILTIN_PACKAGE], name)
    }

    pub fn is_builtin(&self) -> bool {
        self.package.len() == 1 && self.package[0] == BUILTIN_PACKAGE
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.package {
            write!(f, "{segment}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Stable identity of a callable declaration (property, function, enum entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallableId {
    pub owner: Option<ClassId>,
    pub name: String,
}

impl CallableId {
    pub fn new(owner: Option<ClassId>, name: &str) -> Self {
        Self {
            owner,
            name: name.to_string(),
        }
    }

    pub fn member(owner: ClassId, name: &str) -> Self {
        Self::new(Some(owner), name)
    }

    pub fn top_level(name: &str) -> Self {
        Self::new(None, name)
    }
}

impl fmt::Display for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "{owner}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// A resolved static type, as produced by the upstream type checker.
///
/// The wrapper variants (`Alias`, `Flexible`, `Captured`, ...) mirror the
/// shapes inference can leave behind; constant-kind lookup strips them before
/// consulting the builtin table.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// Fully resolved class-like type.
    Class(ClassId),
    /// Type alias application carrying its fully expanded form.
    Alias { name: String, expanded: Box<TypeRef> },
    /// Platform/flexible type with lower and upper bounds.
    Flexible { lower: Box<TypeRef>, upper: Box<TypeRef> },
    Intersection(Vec<TypeRef>),
    Captured(Box<TypeRef>),
    DefinitelyNonNull(Box<TypeRef>),
    /// Integer literal type not yet approximated to a concrete width.
    IntegerLiteral,
    /// Inference placeholder; carries no constant kind.
    Stub,
    Error,
}

impl TypeRef {
    pub fn builtin(name: &str) -> Self {
        TypeRef::Class(ClassId::builtin(name))
    }

    pub fn int() -> Self {
        Self::builtin("Int")
    }

    pub fn long() -> Self {
        Self::builtin("Long")
    }

    pub fn boolean() -> Self {
        Self::builtin("Boolean")
    }

    pub fn string() -> Self {
        Self::builtin("String")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_detection() {
        assert!(ClassId::builtin("Int").is_builtin());
        assert!(!ClassId::new(&["com", "example"], "Foo").is_builtin());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(ClassId::builtin("Int").to_string(), "karst.Int");
        let id = CallableId::member(ClassId::new(&["com", "example"], "Color"), "RED");
        assert_eq!(id.to_string(), "com.example.Color.RED");
    }
}

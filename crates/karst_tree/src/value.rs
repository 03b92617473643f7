//! Typed constant values.
//!
//! [`ConstantKind`] is the closed tag set of representable literal kinds, and
//! [`ConstValue`] pairs each kind with its native payload. Pairing the two in
//! one enum makes the "kind and value are internally consistent" invariant a
//! construction-time guarantee: there is no way to build an `Int`-kinded value
//! that does not fit 32 bits, and no value can carry the `Error` kind at all.

use std::fmt;

/// Tag identifying which native literal type a constant represents.
///
/// `IntegerLiteral` and `UnsignedIntegerLiteral` are untyped integers still
/// awaiting a target-type fit; `Error` only ever appears on malformed literal
/// nodes produced by a broken upstream phase, never on a folded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
    String,
    Null,
    IntegerLiteral,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    UnsignedIntegerLiteral,
    Error,
}

impl ConstantKind {
    /// Whether the kind has a numeric representation the coercion table accepts.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            ConstantKind::Boolean
                | ConstantKind::Char
                | ConstantKind::String
                | ConstantKind::Null
                | ConstantKind::Error
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            ConstantKind::UnsignedByte
                | ConstantKind::UnsignedShort
                | ConstantKind::UnsignedInt
                | ConstantKind::UnsignedLong
                | ConstantKind::UnsignedIntegerLiteral
        )
    }
}

/// A constant value with its native payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Null,
    /// Untyped integer literal awaiting a target-type fit.
    IntegerLiteral(i64),
    UByte(u8),
    UShort(u16),
    UInt(u32),
    ULong(u64),
    UnsignedIntegerLiteral(u64),
}

impl ConstValue {
    pub fn kind(&self) -> ConstantKind {
        match self {
            ConstValue::Byte(_) => ConstantKind::Byte,
            ConstValue::Short(_) => ConstantKind::Short,
            ConstValue::Int(_) => ConstantKind::Int,
            ConstValue::Long(_) => ConstantKind::Long,
            ConstValue::Float(_) => ConstantKind::Float,
            ConstValue::Double(_) => ConstantKind::Double,
            ConstValue::Boolean(_) => ConstantKind::Boolean,
            ConstValue::Char(_) => ConstantKind::Char,
            ConstValue::String(_) => ConstantKind::String,
            ConstValue::Null => ConstantKind::Null,
            ConstValue::IntegerLiteral(_) => ConstantKind::IntegerLiteral,
            ConstValue::UByte(_) => ConstantKind::UnsignedByte,
            ConstValue::UShort(_) => ConstantKind::UnsignedShort,
            ConstValue::UInt(_) => ConstantKind::UnsignedInt,
            ConstValue::ULong(_) => ConstantKind::UnsignedLong,
            ConstValue::UnsignedIntegerLiteral(_) => ConstantKind::UnsignedIntegerLiteral,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ConstValue::String(text) => Some(text),
            _ => None,
        }
    }
}

/// Render a float the way Karst's `toString` does: integral values keep a
/// trailing `.0` so `1.0` does not print as `1`.
fn write_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e16 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Byte(v) => write!(f, "{v}"),
            ConstValue::Short(v) => write!(f, "{v}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Long(v) => write!(f, "{v}"),
            ConstValue::Float(v) => write_double(f, f64::from(*v)),
            ConstValue::Double(v) => write_double(f, *v),
            ConstValue::Boolean(v) => write!(f, "{v}"),
            ConstValue::Char(v) => write!(f, "{v}"),
            ConstValue::String(v) => write!(f, "{v}"),
            ConstValue::Null => write!(f, "null"),
            ConstValue::IntegerLiteral(v) => write!(f, "{v}"),
            ConstValue::UByte(v) => write!(f, "{v}"),
            ConstValue::UShort(v) => write!(f, "{v}"),
            ConstValue::UInt(v) => write!(f, "{v}"),
            ConstValue::ULong(v) => write!(f, "{v}"),
            ConstValue::UnsignedIntegerLiteral(v) => write!(f, "{v}"),
        }
    }
}

/// Raw literal payload as written in source, before kind normalization.
///
/// A literal node pairs one of these with the [`ConstantKind`] the resolver
/// assigned; the folder re-normalizes the payload to that kind defensively
/// (e.g. an integer literal typed as `Char` becomes a `Char` value).
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Boolean(bool),
    Char(char),
    String(String),
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_pairing() {
        assert_eq!(ConstValue::Int(1).kind(), ConstantKind::Int);
        assert_eq!(ConstValue::ULong(1).kind(), ConstantKind::UnsignedLong);
        assert_eq!(ConstValue::Null.kind(), ConstantKind::Null);
    }

    #[test]
    fn test_float_rendering_keeps_decimal_point() {
        assert_eq!(ConstValue::Double(1.0).to_string(), "1.0");
        assert_eq!(ConstValue::Double(2.5).to_string(), "2.5");
        assert_eq!(ConstValue::Float(8.0).to_string(), "8.0");
    }

    #[test]
    fn test_null_and_boolean_rendering() {
        assert_eq!(ConstValue::Null.to_string(), "null");
        assert_eq!(ConstValue::Boolean(true).to_string(), "true");
    }
}

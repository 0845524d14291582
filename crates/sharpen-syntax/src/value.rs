use std::fmt;
use std::hash::{Hash, Hasher};

/// Decoded value of a literal token.
#[derive(Clone, Debug)]
pub enum TokenValue {
    Bool(bool),
    Char(char),
    String(Box<str>),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    /// Decimal literals keep their normalized digits.
    Decimal(Box<str>),
}

impl PartialEq for TokenValue {
    fn eq(&self, other: &Self) -> bool {
        use TokenValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (String(a), String(b)) | (Decimal(a), Decimal(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (UInt32(a), UInt32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (UInt64(a), UInt64(b)) => a == b,
            (Single(a), Single(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for TokenValue {}

impl Hash for TokenValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(value) => value.hash(state),
            Self::Char(value) => value.hash(state),
            Self::String(value) | Self::Decimal(value) => value.hash(state),
            Self::Int32(value) => value.hash(state),
            Self::UInt32(value) => value.hash(state),
            Self::Int64(value) => value.hash(state),
            Self::UInt64(value) => value.hash(state),
            Self::Single(value) => value.to_bits().hash(state),
            Self::Double(value) => value.to_bits().hash(state),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Char(value) => write!(f, "{value}"),
            Self::String(value) | Self::Decimal(value) => f.write_str(value),
            Self::Int32(value) => write!(f, "{value}"),
            Self::UInt32(value) => write!(f, "{value}"),
            Self::Int64(value) => write!(f, "{value}"),
            Self::UInt64(value) => write!(f, "{value}"),
            Self::Single(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_compare_bitwise() {
        assert_eq!(TokenValue::Double(f64::NAN), TokenValue::Double(f64::NAN));
        assert_ne!(TokenValue::Double(0.0), TokenValue::Double(-0.0));
        assert_ne!(TokenValue::Int32(1), TokenValue::Int64(1));
        assert_eq!(TokenValue::UInt64(42).to_string(), "42");
    }
}

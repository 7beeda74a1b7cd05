//! Compile-time constants and their canonical literal form.

use serde::{Deserialize, Serialize};

use crate::TypeRef;

/// A compile-time constant, as found in parameter defaults and attribute
/// arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    String(String),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    NInt(i64),
    NUInt(u64),
    Single(f32),
    Double(f64),
    /// Decimal values keep their invariant textual form.
    Decimal(String),
}

impl ConstantValue {
    /// Render the constant as a C# literal.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Char(value) => format!("'{}'", escape(&value.to_string(), '\'')),
            Self::String(value) => format!("\"{}\"", escape(value, '"')),
            Self::SByte(value) => value.to_string(),
            Self::Byte(value) => value.to_string(),
            Self::Int16(value) => value.to_string(),
            Self::UInt16(value) => value.to_string(),
            Self::Int32(value) => value.to_string(),
            Self::UInt32(value) => format!("{}u", value),
            Self::Int64(value) => format!("{}L", value),
            Self::UInt64(value) => format!("{}UL", value),
            Self::NInt(value) => value.to_string(),
            Self::NUInt(value) => value.to_string(),
            Self::Single(value) => float_literal(*value, "float", "f"),
            Self::Double(value) => float_literal(*value, "double", "d"),
            Self::Decimal(value) => format!("{}m", value.trim()),
        }
    }

    /// Returns true if this is the `null` constant.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value as a signed integer, for integral constants.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::SByte(v) => Some(i128::from(*v)),
            Self::Byte(v) => Some(i128::from(*v)),
            Self::Int16(v) => Some(i128::from(*v)),
            Self::UInt16(v) => Some(i128::from(*v)),
            Self::Int32(v) => Some(i128::from(*v)),
            Self::UInt32(v) => Some(i128::from(*v)),
            Self::Int64(v) | Self::NInt(v) => Some(i128::from(*v)),
            Self::UInt64(v) | Self::NUInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

fn float_literal<T>(value: T, keyword: &str, suffix: &str) -> String
where
    T: Copy + std::fmt::Display + Into<f64>,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        format!("{}.NaN", keyword)
    } else if wide.is_infinite() && wide > 0.0 {
        format!("{}.PositiveInfinity", keyword)
    } else if wide.is_infinite() {
        format!("{}.NegativeInfinity", keyword)
    } else {
        format!("{}{}", value, suffix)
    }
}

/// Escape text for a C# string (`quote = '"'`) or character (`quote = '\''`)
/// literal.
pub fn escape(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A decoded attribute argument.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedConstant {
    Value(ConstantValue),
    Type(TypeRef),
    Array(Vec<TypedConstant>),
}

impl TypedConstant {
    /// The string payload, if this is a string constant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(ConstantValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean constant.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Value(ConstantValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// The type payload, if this is a type-valued constant.
    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// The elements, if this is an array constant.
    pub fn as_array(&self) -> Option<&[TypedConstant]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

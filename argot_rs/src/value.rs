//! Typed conversion of option values.
//!
//! A keyed option declares the Rust type of its value. The type implements
//! [`ConvertibleValue`], which parses a raw token and moves the result in and
//! out of the closed [`Value`] enum stored in
//! [`BoundOptions`](crate::options::BoundOptions).
//!
//! Restricted-choice types (enumerations whose legal values are a fixed set)
//! implement [`RestrictedChoice`] on top of a convertible raw representation and
//! get their [`ConvertibleValue`] impl from [`restricted_choice!`](crate::restricted_choice).

use std::path::PathBuf;

/// A converted option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

/// Parse a value of `Self` from a single command-line token.
pub trait ConvertibleValue: Sized {
    /// Placeholder shown after the option names in usage output.
    fn signature() -> String;

    /// Parse a raw token. `None` means the token is not a legal value.
    fn convert(raw: &str) -> Option<Self>;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl ConvertibleValue for String {
    fn signature() -> String {
        "<string>".to_string()
    }

    fn convert(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl ConvertibleValue for PathBuf {
    fn signature() -> String {
        "<path>".to_string()
    }

    fn convert(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(PathBuf::from(raw))
    }

    fn into_value(self) -> Value {
        Value::Text(self.to_string_lossy().into_owned())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(PathBuf::from(text)),
            _ => None,
        }
    }
}

impl ConvertibleValue for char {
    fn signature() -> String {
        "<char>".to_string()
    }

    fn convert(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Self::convert(text),
            _ => None,
        }
    }
}

/// Accepts `y`, `yes`, `t`, `true` and `n`, `no`, `f`, `false`, case-insensitively.
impl ConvertibleValue for bool {
    fn signature() -> String {
        "<bool>".to_string()
    }

    fn convert(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "y" | "yes" | "t" | "true" => Some(true),
            "n" | "no" | "f" | "false" => Some(false),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

macro_rules! convertible_signed {
    ($($ty:ty),*) => {$(
        impl ConvertibleValue for $ty {
            fn signature() -> String {
                "<int>".to_string()
            }

            fn convert(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }

            fn into_value(self) -> Value {
                Value::Int(self as i64)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Int(n) => <$ty>::try_from(*n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! convertible_unsigned {
    ($($ty:ty),*) => {$(
        impl ConvertibleValue for $ty {
            fn signature() -> String {
                "<int>".to_string()
            }

            fn convert(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }

            fn into_value(self) -> Value {
                Value::UInt(self as u64)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::UInt(n) => <$ty>::try_from(*n).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! convertible_float {
    ($($ty:ty),*) => {$(
        impl ConvertibleValue for $ty {
            fn signature() -> String {
                "<number>".to_string()
            }

            fn convert(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }

            fn into_value(self) -> Value {
                Value::Float(self as f64)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Float(n) => Some(*n as $ty),
                    _ => None,
                }
            }
        }
    )*};
}

convertible_signed!(i8, i16, i32, i64, isize);
convertible_unsigned!(u8, u16, u32, u64, usize);
convertible_float!(f32, f64);

/// A type whose legal values are an enumerated set of raw values.
///
/// Implement this and invoke [`restricted_choice!`](crate::restricted_choice)
/// to derive [`ConvertibleValue`].
pub trait RestrictedChoice: Sized + Clone + 'static {
    type Raw: ConvertibleValue + PartialEq + ToString;

    /// Every legal variant, in the order usage lists them.
    fn variants() -> &'static [Self];

    fn raw(&self) -> Self::Raw;
}

/// Generic conversion for restricted-choice types: convert the raw
/// representation, then require it to be one of the variants.
pub fn convert_choice<T: RestrictedChoice>(raw: &str) -> Option<T> {
    let raw = T::Raw::convert(raw)?;
    T::variants().iter().find(|variant| variant.raw() == raw).cloned()
}

/// Usage placeholder listing every legal raw value, e.g. `<circle|square>`.
pub fn choice_signature<T: RestrictedChoice>() -> String {
    let names: Vec<String> = T::variants().iter().map(|v| v.raw().to_string()).collect();
    format!("<{}>", names.join("|"))
}

pub fn choice_from_value<T: RestrictedChoice>(value: &Value) -> Option<T> {
    let raw = T::Raw::from_value(value)?;
    T::variants().iter().find(|variant| variant.raw() == raw).cloned()
}

/// Implement [`ConvertibleValue`] for a [`RestrictedChoice`] type.
///
/// ```
/// use argot::{restricted_choice, RestrictedChoice};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Shape { Circle, Square }
///
/// impl RestrictedChoice for Shape {
///     type Raw = String;
///     fn variants() -> &'static [Self] { &[Shape::Circle, Shape::Square] }
///     fn raw(&self) -> String {
///         match self { Shape::Circle => "circle".into(), Shape::Square => "square".into() }
///     }
/// }
///
/// restricted_choice!(Shape);
/// ```
#[macro_export]
macro_rules! restricted_choice {
    ($ty:ty) => {
        impl $crate::ConvertibleValue for $ty {
            fn signature() -> String {
                $crate::value::choice_signature::<$ty>()
            }

            fn convert(raw: &str) -> Option<Self> {
                $crate::value::convert_choice::<$ty>(raw)
            }

            fn into_value(self) -> $crate::Value {
                $crate::ConvertibleValue::into_value(
                    <$ty as $crate::RestrictedChoice>::raw(&self),
                )
            }

            fn from_value(value: &$crate::Value) -> Option<Self> {
                $crate::value::choice_from_value::<$ty>(value)
            }
        }
    };
}

// ============================================================================
// Tests
// ============================================================================

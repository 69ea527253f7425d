//! Literal coercion: turning literal text into scalar values.
//!
//! [`FromLiteral`] is implemented for every scalar the binder understands.
//! The accepted grammar is deliberately relaxed since KSON is mostly written
//! by hand:
//!
//! - booleans: `1 t T TRUE true True` and `0 f F FALSE false False`
//! - integers: optional sign (signed types only), base prefixes `0x`, `0o`,
//!   `0b`, a bare leading `0` for octal, `_` separators after a prefix
//! - floats: the standard Rust float grammar, including `inf` and `NaN`
//!
//! ```rust
//! use kson::FromLiteral;
//!
//! assert_eq!(i32::from_literal("-0x1F").unwrap(), -31);
//! assert_eq!(u8::from_literal("0b1010_1010").unwrap(), 170);
//! assert_eq!(i64::from_literal("017").unwrap(), 15);
//! assert!(bool::from_literal("T").unwrap());
//! assert!(u8::from_literal("256").is_err());
//! ```

use crate::{Error, Result};

/// A scalar that can be parsed from literal text.
pub trait FromLiteral: Sized {
    /// Name of the kind, used in error messages.
    const KIND: &'static str;

    fn from_literal(text: &str) -> Result<Self>;
}

impl FromLiteral for bool {
    const KIND: &'static str = "bool";

    fn from_literal(text: &str) -> Result<Self> {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(Error::coercion(text, Self::KIND)),
        }
    }
}

impl FromLiteral for String {
    const KIND: &'static str = "string";

    fn from_literal(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl FromLiteral for char {
    const KIND: &'static str = "char";

    fn from_literal(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::coercion(text, Self::KIND)),
        }
    }
}

/// Splits `digits` into a radix and the digits proper, removing `_`
/// separators when a base prefix is present.
fn split_radix(digits: &str) -> Option<(u32, String)> {
    let bytes = digits.as_bytes();
    let (radix, rest, prefixed) = match bytes {
        [b'0', b'x' | b'X', ..] => (16, &digits[2..], true),
        [b'0', b'o' | b'O', ..] => (8, &digits[2..], true),
        [b'0', b'b' | b'B', ..] => (2, &digits[2..], true),
        [b'0', _, ..] => (8, &digits[1..], true),
        _ => (10, digits, false),
    };
    if rest.is_empty() {
        return None;
    }
    let cleaned = if prefixed {
        rest.replace('_', "")
    } else {
        rest.to_string()
    };
    // `from_str_radix` would accept a second sign
    if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
        return None;
    }
    Some((radix, cleaned))
}

fn parse_signed(text: &str) -> Option<i128> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, cleaned) = split_radix(digits)?;
    let magnitude = u128::from_str_radix(&cleaned, radix).ok()?;
    if negative {
        if magnitude == i128::MIN.unsigned_abs() {
            Some(i128::MIN)
        } else {
            i128::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i128::try_from(magnitude).ok()
    }
}

fn parse_unsigned(text: &str) -> Option<u128> {
    let (radix, cleaned) = split_radix(text)?;
    u128::from_str_radix(&cleaned, radix).ok()
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl FromLiteral for $ty {
                const KIND: &'static str = stringify!($ty);

                fn from_literal(text: &str) -> Result<Self> {
                    parse_signed(text)
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| Error::coercion(text, Self::KIND))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromLiteral for $ty {
                const KIND: &'static str = stringify!($ty);

                fn from_literal(text: &str) -> Result<Self> {
                    parse_unsigned(text)
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| Error::coercion(text, Self::KIND))
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl FromLiteral for $ty {
                const KIND: &'static str = stringify!($ty);

                fn from_literal(text: &str) -> Result<Self> {
                    text.parse::<$ty>()
                        .map_err(|_| Error::coercion(text, Self::KIND))
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

//! Bare primitive targets: integers, floats, booleans, text and UUIDs.

use uuid::Uuid;

use crate::binding::text::parse_bool;
use crate::handler::PrimitiveKind;

/// A scalar that can be parsed from a single route or query value.
pub trait Primitive: Sized {
    const KIND: PrimitiveKind;

    /// Parse the textual form. Never falls back to a default.
    fn parse_text(text: &str) -> Result<Self, String>;
}

macro_rules! from_str_primitive {
    ($kind:ident: $($ty:ty),*) => {
        $(
            impl Primitive for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;

                fn parse_text(text: &str) -> Result<Self, String> {
                    text.parse::<$ty>()
                        .map_err(|err| format!("`{}` is not a valid {}: {}", text, stringify!($ty), err))
                }
            }
        )*
    };
}

from_str_primitive!(Integer: i8, i16, i32, i64, u8, u16, u32, u64);
from_str_primitive!(Float: f32, f64);

impl Primitive for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Boolean;

    fn parse_text(text: &str) -> Result<Self, String> {
        parse_bool(text).ok_or_else(|| format!("`{text}` is not a boolean"))
    }
}

impl Primitive for String {
    const KIND: PrimitiveKind = PrimitiveKind::Text;

    fn parse_text(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

/// Only the canonical hyphenated form (`8-4-4-4-12` hex digits) is accepted.
impl Primitive for Uuid {
    const KIND: PrimitiveKind = PrimitiveKind::Uuid;

    fn parse_text(text: &str) -> Result<Self, String> {
        if text.len() != uuid::fmt::Hyphenated::LENGTH {
            return Err(format!("`{text}` is not a canonical UUID"));
        }
        Uuid::try_parse(text).map_err(|err| format!("`{text}` is not a canonical UUID: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_parsing_is_strict() {
        assert_eq!(i32::parse_text("7"), Ok(7));
        assert_eq!(i64::parse_text("-12"), Ok(-12));
        assert!(i32::parse_text("abc").is_err());
        assert!(i32::parse_text("7.5").is_err());
        assert!(u32::parse_text("-1").is_err());
        assert!(u8::parse_text("256").is_err());
        assert!(i32::parse_text("").is_err());
    }

    #[test]
    fn test_uuid_requires_canonical_form() {
        let canonical = "6d27e69f-e0b9-49d1-82c7-c177a410a0f9";
        assert_eq!(
            Uuid::parse_text(canonical).unwrap().to_string(),
            canonical
        );
        assert!(Uuid::parse_text("6d27e69fe0b949d182c7c177a410a0f9").is_err());
        assert!(Uuid::parse_text("{6d27e69f-e0b9-49d1-82c7-c177a410a0f9}").is_err());
        assert!(Uuid::parse_text("6d27e69f-e0b9-49d1-82c7-c177a410a0fz").is_err());
    }

    #[test]
    fn test_bool_and_text() {
        assert_eq!(bool::parse_text("TRUE"), Ok(true));
        assert!(bool::parse_text("yes").is_err());
        assert_eq!(String::parse_text("Ann"), Ok("Ann".to_string()));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(<u64 as Primitive>::KIND, PrimitiveKind::Integer);
        assert_eq!(<f64 as Primitive>::KIND, PrimitiveKind::Float);
        assert_eq!(<Uuid as Primitive>::KIND, PrimitiveKind::Uuid);
    }
}

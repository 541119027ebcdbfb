//! Attribute values and coercion between raw and typed forms.

use std::borrow::Cow;
use std::cmp::Ordering;

use semver::Version;

use crate::AttributeType;

/// A typed value bound to an attribute.
///
/// Values of the same type are totally ordered. Values of different types
/// never compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Integer(i64),
    Version(Version),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::Version(_) => AttributeType::Version,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert this value to `kind`.
    ///
    /// A value already of `kind` is borrowed. Only strings convert to other
    /// types: `"true"`/`"false"` to [`Bool`](AttributeValue::Bool), decimal
    /// integers to [`Integer`](AttributeValue::Integer) and semver strings to
    /// [`Version`](AttributeValue::Version). Anything else yields `None`.
    pub fn coerce(&self, kind: AttributeType) -> Option<Cow<'_, AttributeValue>> {
        if self.kind() == kind {
            return Some(Cow::Borrowed(self));
        }

        let AttributeValue::String(raw) = self else {
            return None;
        };
        let raw = raw.trim();

        let value = match kind {
            AttributeType::String => unreachable!("string values are never coerced to string"),
            AttributeType::Bool => AttributeValue::Bool(raw.parse().ok()?),
            AttributeType::Integer => AttributeValue::Integer(raw.parse().ok()?),
            AttributeType::Version => AttributeValue::Version(Version::parse(raw).ok()?),
        };
        Some(Cow::Owned(value))
    }
}

impl PartialOrd for AttributeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (AttributeValue::String(a), AttributeValue::String(b)) => Some(a.cmp(b)),
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => Some(a.cmp(b)),
            (AttributeValue::Integer(a), AttributeValue::Integer(b)) => Some(a.cmp(b)),
            (AttributeValue::Version(a), AttributeValue::Version(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(v) => f.write_str(v),
            AttributeValue::Bool(v) => write!(f, "{}", v),
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Version(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self { AttributeValue::String(value.to_string()) }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self { AttributeValue::String(value) }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self { AttributeValue::Bool(value) }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self { AttributeValue::Integer(value) }
}

impl From<Version> for AttributeValue {
    fn from(value: Version) -> Self { AttributeValue::Version(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_same_kind_borrows() {
        let value = AttributeValue::Integer(11);
        assert!(matches!(
            value.coerce(AttributeType::Integer),
            Some(Cow::Borrowed(_))
        ));
    }

    #[test]
    fn test_coerce_raw_strings() {
        let raw = AttributeValue::from("17");
        assert_eq!(
            raw.coerce(AttributeType::Integer).map(Cow::into_owned),
            Some(AttributeValue::Integer(17))
        );

        let raw = AttributeValue::from(" true ");
        assert_eq!(
            raw.coerce(AttributeType::Bool).map(Cow::into_owned),
            Some(AttributeValue::Bool(true))
        );

        let raw = AttributeValue::from("1.2.3");
        assert_eq!(
            raw.coerce(AttributeType::Version).map(Cow::into_owned),
            Some(AttributeValue::Version(Version::new(1, 2, 3)))
        );
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert!(AttributeValue::from("yes").coerce(AttributeType::Bool).is_none());
        assert!(AttributeValue::from("1.2").coerce(AttributeType::Version).is_none());
        assert!(AttributeValue::Integer(1).coerce(AttributeType::String).is_none());
        assert!(AttributeValue::Bool(true).coerce(AttributeType::Integer).is_none());
    }

    #[test]
    fn test_ordering_within_type_only() {
        assert!(AttributeValue::Integer(8) < AttributeValue::Integer(11));
        assert!(AttributeValue::from("1.10.0").coerce(AttributeType::Version)
            > AttributeValue::from("1.9.0").coerce(AttributeType::Version));
        assert_eq!(
            AttributeValue::Integer(1).partial_cmp(&AttributeValue::from("1")),
            None
        );
    }
}

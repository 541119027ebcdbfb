//! Attribute identity.

use serde::Deserialize;

/// Declared type of an attribute's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    #[default]
    String,
    Bool,
    Integer,
    Version,
}

impl AttributeType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
            AttributeType::Integer => "integer",
            AttributeType::Version => "version",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// A named, typed dimension along which variants differ.
///
/// Two attributes are equal only if both name and type agree. Containers and
/// the registry look attributes up by name, so a raw `String` attribute and
/// its typed registration still refer to the same dimension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attribute {
    name: String,
    kind: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// An attribute known only by name, as read from raw metadata.
    pub fn raw(name: impl Into<String>) -> Self { Self::new(name, AttributeType::String) }

    pub fn name(&self) -> &str { &self.name }

    pub fn kind(&self) -> AttributeType { self.kind }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

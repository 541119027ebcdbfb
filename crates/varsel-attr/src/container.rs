//! Immutable, insertion-ordered attribute containers.

use indexmap::IndexMap;

use crate::{Attribute, AttributeError, AttributeValue, Result};

/// An immutable mapping from attribute to value.
///
/// Entries are keyed by attribute name and enumerate in insertion order. Every
/// value has the declared type of its attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeContainer {
    entries: IndexMap<String, (Attribute, AttributeValue)>,
}

impl AttributeContainer {
    pub fn empty() -> Self { Self::default() }

    pub fn builder() -> ContainerBuilder { ContainerBuilder::default() }

    /// Build a container of raw string attributes, as read from metadata.
    pub fn raw<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, value)| {
                let attribute = Attribute::raw(name);
                (
                    attribute.name().to_string(),
                    (attribute, AttributeValue::String(value.into())),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn contains(&self, name: &str) -> bool { self.entries.contains_key(name) }

    pub fn get(&self, name: &str) -> Option<(&Attribute, &AttributeValue)> {
        self.entries.get(name).map(|(attr, value)| (attr, value))
    }

    pub fn value(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name).map(|(_, value)| value)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values().map(|(attr, _)| attr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attribute, &AttributeValue)> {
        self.entries.values().map(|(attr, value)| (attr, value))
    }
}

/// Builder for [`AttributeContainer`].
///
/// Setting an attribute twice replaces the value but keeps the first
/// position.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    entries: IndexMap<String, (Attribute, AttributeValue)>,
}

impl ContainerBuilder {
    pub fn with(mut self, attribute: Attribute, value: impl Into<AttributeValue>) -> Result<Self> {
        let value = value.into();
        if value.kind() != attribute.kind() {
            return Err(AttributeError::TypeMismatch {
                name:     attribute.name().to_string(),
                expected: attribute.kind(),
                actual:   value.kind(),
            });
        }

        self.entries
            .insert(attribute.name().to_string(), (attribute, value));
        Ok(self)
    }

    pub fn build(self) -> AttributeContainer {
        AttributeContainer {
            entries: self.entries,
        }
    }
}

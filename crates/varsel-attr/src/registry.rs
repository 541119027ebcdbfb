//! Canonical name → attribute mapping.

use indexmap::IndexMap;

use crate::{Attribute, AttributeError, AttributeType, Result};

#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    attributes: IndexMap<String, Attribute>,
}

impl AttributeRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register `attribute`. Registering the same attribute again is a no-op;
    /// registering its name with another type is a conflict.
    pub fn register(&mut self, attribute: Attribute) -> Result<()> {
        match self.attributes.get(attribute.name()) {
            Some(existing) if existing.kind() == attribute.kind() => Ok(()),
            Some(existing) => Err(AttributeError::Conflict {
                name:       attribute.name().to_string(),
                registered: existing.kind(),
                requested:  attribute.kind(),
            }),
            None => {
                self.attributes
                    .insert(attribute.name().to_string(), attribute);
                Ok(())
            }
        }
    }

    /// True if `attribute`'s name is registered with the same type, or
    /// `attribute` is a raw string attribute that can be coerced to it.
    pub fn has_attribute(&self, attribute: &Attribute) -> bool {
        self.attributes.get(attribute.name()).is_some_and(|registered| {
            registered.kind() == attribute.kind() || attribute.kind() == AttributeType::String
        })
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> { self.attributes.get(name) }

    /// Resolve `attribute` to its registration by name, failing if it is
    /// unknown. The declared type is not checked; values carried under a
    /// different type are rejected when they fail to coerce.
    pub fn resolve(&self, attribute: &Attribute) -> Result<&Attribute> {
        self.attributes
            .get(attribute.name())
            .ok_or_else(|| AttributeError::Unregistered(attribute.name().to_string()))
    }

    pub fn len(&self) -> usize { self.attributes.len() }

    pub fn is_empty(&self) -> bool { self.attributes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> { self.attributes.values() }
}

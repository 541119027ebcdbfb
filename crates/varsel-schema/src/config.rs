//! Declarative schema configuration.
//!
//! ```toml
//! precedence = ["os", "arch"]
//!
//! [[attribute]]
//! name = "tier"
//! disambiguation = { prefer = { default = "free" } }
//!
//! [[attribute]]
//! name = "jvm"
//! type = "integer"
//! compatibility = "at-most"
//! disambiguation = "closest"
//! ```
//!
//! Values are written as strings and coerced to the attribute's type. Custom
//! rules can only be installed in code, on the returned [`SchemaBuilder`].

use serde::Deserialize;
use varsel_attr::{Attribute, AttributeType, AttributeValue};

use crate::{CompatibilityRule, DisambiguationRule, Result, Schema, SchemaBuilder, SchemaError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub precedence: Vec<String>,
    #[serde(default, rename = "attribute")]
    pub attributes: Vec<AttributeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
    pub name:           String,
    #[serde(rename = "type", default)]
    pub kind:           AttributeType,
    #[serde(default)]
    pub compatibility:  CompatibilityConfig,
    #[serde(default)]
    pub disambiguation: DisambiguationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompatibilityConfig {
    #[default]
    Equality,
    Pairs(Vec<(String, String)>),
    AtMost,
    AtLeast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisambiguationConfig {
    #[default]
    KeepAll,
    Prefer {
        #[serde(default)]
        default: Option<String>,
    },
    Ordered(Vec<String>),
    Highest,
    Lowest,
    Closest,
}

impl SchemaConfig {
    pub fn from_toml(source: &str) -> Result<Self> { Ok(toml::from_str(source)?) }

    /// Translate into a builder so code-only rules can be layered on top.
    pub fn into_builder(self) -> Result<SchemaBuilder> {
        let mut builder = Schema::builder().precedence(self.precedence);

        for config in self.attributes {
            let attribute = Attribute::new(config.name, config.kind);
            let value = |raw: String| typed(&attribute, raw);

            let compatibility = match config.compatibility {
                CompatibilityConfig::Equality => CompatibilityRule::Equality,
                CompatibilityConfig::Pairs(pairs) => CompatibilityRule::Pairs(
                    pairs
                        .into_iter()
                        .map(|(requested, candidate)| -> Result<_> {
                            Ok((value(requested)?, value(candidate)?))
                        })
                        .collect::<Result<_>>()?,
                ),
                CompatibilityConfig::AtMost => CompatibilityRule::AtMost,
                CompatibilityConfig::AtLeast => CompatibilityRule::AtLeast,
            };

            let disambiguation = match config.disambiguation {
                DisambiguationConfig::KeepAll => DisambiguationRule::KeepAll,
                DisambiguationConfig::Prefer { default } => DisambiguationRule::Prefer {
                    default: default.map(value).transpose()?,
                },
                DisambiguationConfig::Ordered(order) => DisambiguationRule::Ordered(
                    order.into_iter().map(value).collect::<Result<_>>()?,
                ),
                DisambiguationConfig::Highest => DisambiguationRule::Highest,
                DisambiguationConfig::Lowest => DisambiguationRule::Lowest,
                DisambiguationConfig::Closest => DisambiguationRule::Closest,
            };

            let name = attribute.name().to_string();
            builder = builder
                .attribute(attribute)
                .compatibility(name.clone(), compatibility)
                .disambiguation(name, disambiguation);
        }

        Ok(builder)
    }
}

impl Schema {
    pub fn from_config(config: SchemaConfig) -> Result<Schema> { config.into_builder()?.build() }

    pub fn from_toml(source: &str) -> Result<Schema> {
        Self::from_config(SchemaConfig::from_toml(source)?)
    }
}

fn typed(attribute: &Attribute, raw: String) -> Result<AttributeValue> {
    match AttributeValue::from(raw.as_str()).coerce(attribute.kind()) {
        Some(value) => Ok(value.into_owned()),
        None => Err(SchemaError::InvalidValue {
            attribute: attribute.name().to_string(),
            value:     raw,
            kind:      attribute.kind(),
        }),
    }
}

//! Attribute schema for variant selection.
//!
//! A [`Schema`] knows which attributes exist, how values of each attribute
//! are matched ([`CompatibilityRule`]) and narrowed ([`DisambiguationRule`]),
//! and in which order attributes are consulted ([`PrecedenceSorter`]).
//!
//! Schemas are built once, either in code or from a TOML
//! [`SchemaConfig`], and are read-only afterwards.
//!
//! # Example
//!
//! ```
//! use varsel_attr::{Attribute, AttributeType, AttributeValue};
//! use varsel_schema::{DisambiguationRule, Schema};
//!
//! let schema = Schema::builder()
//!     .attribute(Attribute::new("tier", AttributeType::String))
//!     .disambiguation("tier", DisambiguationRule::prefer("free"))
//!     .build()?;
//!
//! let offered = [AttributeValue::from("pro"), AttributeValue::from("free")];
//! let best = schema.disambiguate(&Attribute::raw("tier"), None, &offered)?;
//! assert_eq!(best, [AttributeValue::from("free")]);
//! # Ok::<(), varsel_schema::SchemaError>(())
//! ```

pub use self::config::{AttributeConfig, CompatibilityConfig, DisambiguationConfig, SchemaConfig};
pub use self::error::{BoxError, Result, SchemaError};
pub use self::precedence::{PrecedenceResult, PrecedenceSorter};
pub use self::rules::{CompatibilityFn, CompatibilityRule, DisambiguationFn, DisambiguationRule};
pub use self::schema::{AttributeRules, Schema, SchemaBuilder};

mod config;
mod error;
mod precedence;
mod rules;
mod schema;

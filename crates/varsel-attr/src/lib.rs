//! Typed attributes for variant selection.
//!
//! An [`Attribute`] is a named dimension along which variants of a dependency
//! differ (`os`, `arch`, `flavor`, ...). Each attribute declares the
//! [`AttributeType`] of its values. An [`AttributeContainer`] binds attributes
//! to [`AttributeValue`]s and describes either a consumer's request or one
//! candidate variant.
//!
//! # Raw attributes
//!
//! Metadata read from disk or the network only knows names and strings. Such
//! attributes are declared [`AttributeType::String`] and are called *raw*.
//! The [`AttributeRegistry`] re-attaches the registered type by name, and
//! [`AttributeValue::coerce`] converts the raw string on use.
//!
//! # Example
//!
//! ```
//! use varsel_attr::{Attribute, AttributeContainer, AttributeType, AttributeValue};
//!
//! let os = Attribute::new("os", AttributeType::String);
//! let debug = Attribute::new("debug", AttributeType::Bool);
//!
//! let requested = AttributeContainer::builder()
//!     .with(os, "linux")?
//!     .with(debug, true)?
//!     .build();
//!
//! assert_eq!(requested.value("debug"), Some(&AttributeValue::Bool(true)));
//! # Ok::<(), varsel_attr::AttributeError>(())
//! ```

pub use self::attribute::{Attribute, AttributeType};
pub use self::container::{AttributeContainer, ContainerBuilder};
pub use self::error::{AttributeError, Result};
pub use self::registry::AttributeRegistry;
pub use self::value::AttributeValue;

mod attribute;
mod container;
mod error;
mod registry;
mod value;

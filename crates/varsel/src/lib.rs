//! Attribute-based variant selection.
//!
//! A dependency may be published as several variants, each described by an
//! [`AttributeContainer`]. Given the consumer's requested attributes,
//! [`Selector::select`] picks the variant that satisfies the request best.
//!
//! # Flow
//!
//! ```text
//! request ─► MatchEngine ─┬─ none ──────────────────────► NoMatch
//!                         ├─ one ───────────────────────► Resolved
//!                         └─ several ─► Disambiguation ─┬► Resolved
//!                                                       └► Ambiguous
//! ```
//!
//! - [`MatchEngine`] drops candidates with an incompatible value for any
//!   attribute they share with the request.
//! - [`DisambiguationEngine`] applies each attribute's disambiguation rule in
//!   precedence order, including attributes only candidates carry.
//!
//! Selection is a pure function of the [`Schema`] and its inputs: it performs
//! no I/O and keeps no state between calls.
//!
//! # Example
//!
//! ```
//! use varsel::{Selection, Selector};
//! use varsel_attr::{Attribute, AttributeContainer};
//! use varsel_schema::Schema;
//!
//! let schema = Schema::builder()
//!     .attribute(Attribute::raw("os"))
//!     .attribute(Attribute::raw("arch"))
//!     .build()?;
//!
//! let requested = AttributeContainer::raw([("os", "linux"), ("arch", "x64")]);
//! let candidates = [
//!     AttributeContainer::raw([("os", "linux"), ("arch", "x64")]),
//!     AttributeContainer::raw([("os", "linux"), ("arch", "arm64")]),
//!     AttributeContainer::raw([("os", "windows")]),
//! ];
//!
//! let selection = Selector::new(&schema).select(&requested, &candidates)?;
//! assert_eq!(selection, Selection::Resolved(0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use varsel_attr::{Attribute, AttributeContainer, AttributeType, AttributeValue};
pub use varsel_schema::Schema;

pub use self::disambiguation::{Disambiguated, DisambiguationEngine};
pub use self::error::{Result, SelectError};
pub use self::matcher::MatchEngine;
pub use self::selector::{Selection, Selector, select};

mod disambiguation;
mod error;
mod matcher;
mod selector;

//! Per-attribute compatibility and disambiguation rules.
//!
//! Rules are tagged values so the common cases are a plain `match` on the
//! selection path. Only [`CompatibilityRule::Custom`] and
//! [`DisambiguationRule::Custom`] dispatch dynamically.
//!
//! Rules receive values already coerced to the attribute's registered type.

use std::cmp::Ordering;
use std::sync::Arc;

use varsel_attr::AttributeValue;

use crate::BoxError;

pub type CompatibilityFn =
    dyn Fn(&AttributeValue, &AttributeValue) -> Result<bool, BoxError> + Send + Sync;

pub type DisambiguationFn = dyn Fn(Option<&AttributeValue>, &[AttributeValue]) -> Result<Vec<AttributeValue>, BoxError>
    + Send
    + Sync;

/// Decides whether a candidate value may satisfy a requested value.
#[derive(Clone, Default)]
pub enum CompatibilityRule {
    /// Values must be equal.
    #[default]
    Equality,
    /// Equal values, plus the listed `(requested, candidate)` pairs.
    Pairs(Vec<(AttributeValue, AttributeValue)>),
    /// The candidate must not exceed the requested value.
    AtMost,
    /// The candidate must be at least the requested value.
    AtLeast,
    Custom(Arc<CompatibilityFn>),
}

impl CompatibilityRule {
    pub fn custom<F>(rule: F) -> Self
    where
        F: Fn(&AttributeValue, &AttributeValue) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        CompatibilityRule::Custom(Arc::new(rule))
    }

    pub fn is_compatible(
        &self,
        requested: &AttributeValue,
        candidate: &AttributeValue,
    ) -> Result<bool, BoxError> {
        let compatible = match self {
            CompatibilityRule::Equality => requested == candidate,
            CompatibilityRule::Pairs(pairs) => {
                requested == candidate
                    || pairs
                        .iter()
                        .any(|(r, c)| r == requested && c == candidate)
            }
            CompatibilityRule::AtMost => matches!(
                candidate.partial_cmp(requested),
                Some(Ordering::Less | Ordering::Equal)
            ),
            CompatibilityRule::AtLeast => matches!(
                candidate.partial_cmp(requested),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompatibilityRule::Custom(rule) => return rule(requested, candidate),
        };
        Ok(compatible)
    }
}

impl std::fmt::Debug for CompatibilityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompatibilityRule::Equality => f.write_str("Equality"),
            CompatibilityRule::Pairs(pairs) => f.debug_tuple("Pairs").field(pairs).finish(),
            CompatibilityRule::AtMost => f.write_str("AtMost"),
            CompatibilityRule::AtLeast => f.write_str("AtLeast"),
            CompatibilityRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Narrows the distinct values of still-live candidates to the preferred ones.
///
/// A rule must return a non-empty subset for a non-empty input.
#[derive(Clone, Default)]
pub enum DisambiguationRule {
    #[default]
    KeepAll,
    /// Keep the requested value if offered. With nothing requested, keep
    /// `default` if offered.
    Prefer { default: Option<AttributeValue> },
    /// Keep the first offered value of the list.
    Ordered(Vec<AttributeValue>),
    Highest,
    Lowest,
    /// Keep the requested value if offered, else the highest value below it,
    /// else the lowest value above it.
    Closest,
    Custom(Arc<DisambiguationFn>),
}

impl DisambiguationRule {
    pub fn custom<F>(rule: F) -> Self
    where
        F: Fn(Option<&AttributeValue>, &[AttributeValue]) -> Result<Vec<AttributeValue>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        DisambiguationRule::Custom(Arc::new(rule))
    }

    pub fn prefer(default: impl Into<AttributeValue>) -> Self {
        DisambiguationRule::Prefer {
            default: Some(default.into()),
        }
    }

    pub fn best(
        &self,
        requested: Option<&AttributeValue>,
        candidates: &[AttributeValue],
    ) -> Result<Vec<AttributeValue>, BoxError> {
        let best = match self {
            DisambiguationRule::KeepAll => None,
            DisambiguationRule::Prefer { default } => match requested {
                Some(requested) => offered(candidates, requested),
                None => default
                    .as_ref()
                    .and_then(|default| offered(candidates, default)),
            },
            DisambiguationRule::Ordered(order) => order
                .iter()
                .find_map(|preferred| offered(candidates, preferred)),
            DisambiguationRule::Highest => extreme(candidates.iter(), Ordering::Greater),
            DisambiguationRule::Lowest => extreme(candidates.iter(), Ordering::Less),
            DisambiguationRule::Closest => requested.and_then(|requested| {
                offered(candidates, requested)
                    .or_else(|| {
                        let below = candidates
                            .iter()
                            .filter(|v| v.partial_cmp(&requested) == Some(Ordering::Less));
                        extreme(below, Ordering::Greater)
                    })
                    .or_else(|| {
                        let above = candidates
                            .iter()
                            .filter(|v| v.partial_cmp(&requested) == Some(Ordering::Greater));
                        extreme(above, Ordering::Less)
                    })
            }),
            DisambiguationRule::Custom(rule) => return rule(requested, candidates),
        };

        Ok(best.unwrap_or_else(|| candidates.to_vec()))
    }
}

impl std::fmt::Debug for DisambiguationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisambiguationRule::KeepAll => f.write_str("KeepAll"),
            DisambiguationRule::Prefer { default } => {
                f.debug_struct("Prefer").field("default", default).finish()
            }
            DisambiguationRule::Ordered(order) => f.debug_tuple("Ordered").field(order).finish(),
            DisambiguationRule::Highest => f.write_str("Highest"),
            DisambiguationRule::Lowest => f.write_str("Lowest"),
            DisambiguationRule::Closest => f.write_str("Closest"),
            DisambiguationRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn offered(candidates: &[AttributeValue], value: &AttributeValue) -> Option<Vec<AttributeValue>> {
    candidates.contains(value).then(|| vec![value.clone()])
}

/// The single value that compares as `want` against every other value.
/// `None` for an empty input or values that do not compare.
fn extreme<'a>(
    mut values: impl Iterator<Item = &'a AttributeValue>,
    want: Ordering,
) -> Option<Vec<AttributeValue>> {
    let mut best = values.next()?;
    for value in values {
        match value.partial_cmp(best)? {
            ord if ord == want => best = value,
            _ => {}
        }
    }
    Some(vec![best.clone()])
}

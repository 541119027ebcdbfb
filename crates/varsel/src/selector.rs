//! Selection entry point.

use tracing::debug;
use varsel_attr::{Attribute, AttributeContainer};
use varsel_schema::Schema;

use crate::{DisambiguationEngine, MatchEngine, Result};

/// Classified outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No candidate is compatible with the request.
    NoMatch,
    /// Exactly one candidate remains.
    Resolved(usize),
    /// Several candidates remain after every rule was applied.
    Ambiguous {
        candidates: Vec<usize>,
        /// Attributes whose values still differ between `candidates`.
        attributes: Vec<Attribute>,
    },
}

impl Selection {
    pub fn is_resolved(&self) -> bool { matches!(self, Selection::Resolved(_)) }

    pub fn resolved(&self) -> Option<usize> {
        match self {
            Selection::Resolved(index) => Some(*index),
            _ => None,
        }
    }

    /// Candidate indices this selection refers to.
    pub fn candidates(&self) -> &[usize] {
        match self {
            Selection::NoMatch => &[],
            Selection::Resolved(index) => std::slice::from_ref(index),
            Selection::Ambiguous { candidates, .. } => candidates,
        }
    }
}

/// Selects the best variant among candidates for a request.
///
/// A selector only borrows its schema; it holds no other state and can be
/// shared across threads and reused for any number of requests.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'s> {
    schema: &'s Schema,
}

impl<'s> Selector<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    pub fn schema(&self) -> &'s Schema { self.schema }

    pub fn select(
        &self,
        requested: &AttributeContainer,
        candidates: &[AttributeContainer],
    ) -> Result<Selection> {
        let compatible = MatchEngine::new(self.schema).compatible(requested, candidates)?;
        debug!(
            candidates = candidates.len(),
            compatible = compatible.len(),
            "matched"
        );

        let selection = match compatible.as_slice() {
            [] => Selection::NoMatch,
            [index] => Selection::Resolved(*index),
            _ => {
                let mut result = DisambiguationEngine::new(self.schema).disambiguate(
                    requested,
                    candidates,
                    &compatible,
                )?;
                match result.survivors.as_slice() {
                    [index] => Selection::Resolved(*index),
                    _ => Selection::Ambiguous {
                        candidates: std::mem::take(&mut result.survivors),
                        attributes: result.undecided,
                    },
                }
            }
        };

        debug!(?selection, "selected");
        Ok(selection)
    }
}

/// Shorthand for [`Selector::select`].
pub fn select(
    schema: &Schema,
    requested: &AttributeContainer,
    candidates: &[AttributeContainer],
) -> Result<Selection> {
    Selector::new(schema).select(requested, candidates)
}

//! Narrowing compatible candidates by preference.

use tracing::{debug, trace};
use varsel_attr::{Attribute, AttributeContainer, AttributeValue};
use varsel_schema::Schema;

use crate::{Result, SelectError};

/// Outcome of [`DisambiguationEngine::disambiguate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disambiguated {
    /// Surviving candidate indices, in input order.
    pub survivors: Vec<usize>,
    /// Attributes whose values still differ between survivors. Empty when a
    /// single candidate survives.
    pub undecided: Vec<Attribute>,
}

/// Applies disambiguation rules in precedence order until one candidate is
/// left or every attribute has been consulted.
///
/// The attributes consulted are the requested ones followed by any extra
/// attribute a survivor carries. Ranked attributes go first, one at a time.
/// Unranked attributes are then applied together: each one narrows the same
/// survivor set and the results are intersected.
///
/// Candidates that do not carry an attribute are never dropped by it, and an
/// attribute that would drop every survivor is skipped.
#[derive(Debug, Clone, Copy)]
pub struct DisambiguationEngine<'s> {
    schema: &'s Schema,
}

impl<'s> DisambiguationEngine<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    pub fn disambiguate(
        &self,
        requested: &AttributeContainer,
        candidates: &[AttributeContainer],
        compatible: &[usize],
    ) -> Result<Disambiguated> {
        if let Some(&index) = compatible.iter().find(|&&index| index >= candidates.len()) {
            return Err(SelectError::CandidateOutOfRange {
                index,
                len: candidates.len(),
            });
        }

        let mut survivors = compatible.to_vec();
        if survivors.len() <= 1 {
            return Ok(Disambiguated {
                survivors,
                undecided: Vec::new(),
            });
        }

        let extras = self
            .schema
            .collect_extra_attributes(survivors.iter().map(|&i| &candidates[i]), requested);
        let universe: Vec<Attribute> = requested.attributes().cloned().chain(extras).collect();
        let order = self.schema.order_by_precedence(&universe);

        for &position in order.sorted() {
            if survivors.len() == 1 {
                break;
            }
            if let Some(kept) = self.narrow(&universe[position], requested, candidates, &survivors)? {
                survivors = kept;
            }
        }

        if survivors.len() > 1 && !order.unsorted().is_empty() {
            let mut remaining = survivors.clone();
            for &position in order.unsorted() {
                if let Some(kept) = self.narrow(&universe[position], requested, candidates, &survivors)? {
                    remaining.retain(|index| kept.contains(index));
                }
            }

            if remaining.is_empty() {
                debug!(
                    survivors = survivors.len(),
                    "unranked attributes disagree, keeping survivors"
                );
            } else {
                survivors = remaining;
            }
        }

        let undecided = if survivors.len() > 1 {
            universe
                .iter()
                .filter(|attribute| self.differs(attribute, candidates, &survivors))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Ok(Disambiguated {
            survivors,
            undecided,
        })
    }

    /// Apply one attribute to `survivors`.
    ///
    /// `None` means the attribute does not narrow anything: it is unknown to
    /// the schema, no survivor carries it, or it would drop every survivor.
    fn narrow(
        &self,
        attribute: &Attribute,
        requested: &AttributeContainer,
        candidates: &[AttributeContainer],
        survivors: &[usize],
    ) -> Result<Option<Vec<usize>>> {
        if !self.schema.has_attribute(attribute) {
            trace!(attribute = attribute.name(), "no rules for unregistered attribute");
            return Ok(None);
        }

        let carried: Vec<(usize, Option<AttributeValue>)> = survivors
            .iter()
            .map(|&index| (index, self.value(attribute, &candidates[index])))
            .collect();

        let mut offered: Vec<AttributeValue> = Vec::new();
        for value in carried.iter().filter_map(|(_, value)| value.as_ref()) {
            if !offered.contains(value) {
                offered.push(value.clone());
            }
        }
        if offered.is_empty() {
            return Ok(None);
        }

        let best = self
            .schema
            .disambiguate(attribute, requested.value(attribute.name()), &offered)?;
        trace!(
            attribute = attribute.name(),
            offered = offered.len(),
            best = best.len(),
            "disambiguated"
        );

        let kept: Vec<usize> = carried
            .iter()
            .filter(|(_, value)| value.as_ref().is_none_or(|value| best.contains(value)))
            .map(|&(index, _)| index)
            .collect();

        if kept.is_empty() {
            debug!(
                attribute = attribute.name(),
                "attribute would eliminate every candidate, skipped"
            );
            return Ok(None);
        }
        Ok(Some(kept))
    }

    /// The candidate's value for `attribute` in its registered type. A value
    /// that cannot be coerced counts as not carried.
    fn value(&self, attribute: &Attribute, candidate: &AttributeContainer) -> Option<AttributeValue> {
        let raw = candidate.value(attribute.name())?;
        let value = self.schema.normalize(attribute, raw);
        if value.is_none() {
            trace!(attribute = attribute.name(), value = %raw, "value does not fit the registered type");
        }
        value.map(|value| value.into_owned())
    }

    fn differs(&self, attribute: &Attribute, candidates: &[AttributeContainer], survivors: &[usize]) -> bool {
        let mut values = survivors
            .iter()
            .map(|&index| self.value(attribute, &candidates[index]));
        match values.next() {
            Some(first) => values.any(|value| value != first),
            None => false,
        }
    }
}

//! Compatibility filtering.

use tracing::debug;
use varsel_attr::AttributeContainer;
use varsel_schema::Schema;

use crate::Result;

/// Keeps the candidates compatible with a request.
///
/// Only attributes present on both sides are compared. A requested attribute
/// the candidate does not carry acts as a wildcard.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'s> {
    schema: &'s Schema,
}

impl<'s> MatchEngine<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    pub fn is_compatible(
        &self,
        requested: &AttributeContainer,
        candidate: &AttributeContainer,
    ) -> Result<bool> {
        for (attribute, requested_value) in requested.iter() {
            let Some(candidate_value) = candidate.value(attribute.name()) else {
                continue;
            };
            if !self
                .schema
                .match_value(attribute, requested_value, candidate_value)?
            {
                debug!(
                    attribute = attribute.name(),
                    requested = %requested_value,
                    candidate = %candidate_value,
                    "candidate rejected"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Indices of the compatible candidates, in input order.
    pub fn compatible(
        &self,
        requested: &AttributeContainer,
        candidates: &[AttributeContainer],
    ) -> Result<Vec<usize>> {
        let mut compatible = Vec::with_capacity(candidates.len());
        for (index, candidate) in candidates.iter().enumerate() {
            if self.is_compatible(requested, candidate)? {
                compatible.push(index);
            }
        }
        Ok(compatible)
    }
}

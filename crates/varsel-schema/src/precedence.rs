//! Attribute precedence.

use std::collections::HashMap;

use varsel_attr::Attribute;

/// Partition of attribute positions by configured precedence.
///
/// `sorted` holds the positions of ranked attributes in rank order,
/// `unsorted` the remaining positions in input order. Together they cover
/// every input position exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceResult {
    sorted:   Vec<usize>,
    unsorted: Vec<usize>,
}

impl PrecedenceResult {
    pub fn new(sorted: Vec<usize>, unsorted: Vec<usize>) -> Self { Self { sorted, unsorted } }

    pub fn unordered(unsorted: Vec<usize>) -> Self { Self::new(Vec::new(), unsorted) }

    pub fn sorted(&self) -> &[usize] { &self.sorted }

    pub fn unsorted(&self) -> &[usize] { &self.unsorted }

    pub fn len(&self) -> usize { self.sorted.len() + self.unsorted.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Ranks attributes by name according to the schema's precedence list.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceSorter {
    ranks: HashMap<String, usize>,
}

impl PrecedenceSorter {
    /// `order` must not repeat names; the schema builder checks this.
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ranks = order
            .into_iter()
            .enumerate()
            .map(|(rank, name)| (name.into(), rank))
            .collect();
        Self { ranks }
    }

    pub fn rank(&self, name: &str) -> Option<usize> { self.ranks.get(name).copied() }

    pub fn order_by_precedence(&self, attributes: &[Attribute]) -> PrecedenceResult {
        if self.ranks.is_empty() {
            return PrecedenceResult::unordered((0..attributes.len()).collect());
        }

        let mut ranked = Vec::new();
        let mut unsorted = Vec::new();
        for (index, attribute) in attributes.iter().enumerate() {
            match self.rank(attribute.name()) {
                Some(rank) => ranked.push((rank, index)),
                None => unsorted.push(index),
            }
        }

        // stable: equal ranks keep input order
        ranked.sort_by_key(|&(rank, _)| rank);
        let sorted = ranked.into_iter().map(|(_, index)| index).collect();

        PrecedenceResult::new(sorted, unsorted)
    }
}

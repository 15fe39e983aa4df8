use indexmap::IndexMap;
use std::fmt;

use crate::error::{MalformedFormulaError, Result};
use crate::parser::Contribution;

/// Element symbol to total count, kept in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTally {
    counts: IndexMap<String, u32>,
}

impl ElementTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contribution, summing into an existing entry or appending a new one.
    pub(crate) fn add(&mut self, contribution: Contribution) -> Result<()> {
        let Contribution { symbol, count } = contribution;
        let total = self.counts.entry(symbol).or_insert(0);
        *total = total
            .checked_add(count)
            .ok_or(MalformedFormulaError::Overflow)?;
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<u32> {
        self.counts.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(symbol, count)| (symbol.as_str(), *count))
    }
}

impl IntoIterator for ElementTally {
    type Item = (String, u32);
    type IntoIter = indexmap::map::IntoIter<String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl fmt::Display for ElementTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{symbol}:{count}")?;
        }
        Ok(())
    }
}

/// Renders `K1:V1,K2:V2,...` in insertion order; empty tally gives `""`.
pub fn format(tally: &ElementTally) -> String {
    tally.to_string()
}

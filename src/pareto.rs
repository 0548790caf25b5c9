//! Dominance-pruned frontiers of packed criteria.

use std::fmt;

use crate::criteria;
use crate::types::Mtime;

/// An immutable set of mutually non-dominating criteria, sorted by their
/// packed word value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParetoFront {
    labels: Vec<u64>,
}

impl ParetoFront {
    /// The frontier of an unreachable station.
    pub const EMPTY: ParetoFront = ParetoFront { labels: Vec::new() };

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The unique label with the given arrival time and change count,
    /// whatever its departure time and payload. Panics if the frontier
    /// holds no such label.
    pub fn get(&self, arr_mins: Mtime, changes: u32) -> u64 {
        self.iter()
            .find(|&l| criteria::arr_mins(l) == arr_mins && criteria::changes(l) == changes)
            .unwrap_or_else(|| {
                panic!("no label arriving at {} with {} changes", arr_mins, changes)
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.labels.iter().copied()
    }
}

impl fmt::Display for ParetoFront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.iter().enumerate() {
            write!(f, "{})", i)?;
            if criteria::has_dep_mins(label) {
                write!(f, " departure: {} |", criteria::dep_mins(label))?;
            }
            writeln!(
                f,
                " arrival: {} | changes: {}",
                criteria::arr_mins(label),
                criteria::changes(label)
            )?;
        }
        Ok(())
    }
}

/// Growable frontier used while a profile is under construction.
#[derive(Debug, Clone, Default)]
pub struct FrontBuilder {
    labels: Vec<u64>,
}

impl FrontBuilder {
    pub fn new() -> FrontBuilder {
        FrontBuilder { labels: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.labels.clear();
        self
    }

    /// Inserts a label unless a present one dominates it, evicting every
    /// label the new one dominates. The set stays sorted and remains an
    /// antichain under the dominance relation.
    pub fn add(&mut self, label: u64) -> &mut Self {
        if self.labels.iter().any(|&l| criteria::dominates_or_is_equal(l, label)) {
            return self;
        }
        self.labels.retain(|&l| !criteria::dominates_or_is_equal(label, l));
        let at = self.labels.partition_point(|&l| l < label);
        self.labels.insert(at, label);
        self
    }

    pub fn add_packed(&mut self, arr_mins: Mtime, changes: u32, payload: u32) -> &mut Self {
        self.add(criteria::pack(arr_mins, changes, payload))
    }

    /// Merges every label of `that` into this frontier. The surviving set
    /// does not depend on which of the two was the receiver.
    pub fn add_all(&mut self, that: &FrontBuilder) -> &mut Self {
        for &label in &that.labels {
            self.add(label);
        }
        self
    }

    /// True iff every label of `that`, once its departure time is set to
    /// `dep_mins`, is dominated or equaled by one of this frontier's labels
    /// considered at the same departure time. Vacuously true for an empty
    /// `that`.
    pub fn fully_dominates(&self, that: &FrontBuilder, dep_mins: Mtime) -> bool {
        that.labels.iter().all(|&t| {
            let stamped = criteria::with_dep_mins(t, dep_mins);
            self.labels.iter().any(|&l| {
                criteria::dominates_or_is_equal(criteria::with_dep_mins(l, dep_mins), stamped)
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.labels.iter().copied()
    }

    pub fn build(&self) -> ParetoFront {
        ParetoFront { labels: self.labels.clone() }
    }
}

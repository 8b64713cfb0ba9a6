//! Bound sentinels and bound-type classification.
//!
//! Solvers specialize their algorithms on how each constraint and each
//! variable is bounded: an equality constraint enters the KKT system
//! differently from a range constraint, and a fixed variable can be
//! eliminated outright. This module provides the shared classification
//! machinery. Finiteness is a strict comparison against the `1e20`
//! sentinel; [`BoundType::classify`] maps one bound pair to one of five
//! types and [`BoundPartition`] collects the resulting index lists in a
//! single ascending scan.

use std::fmt;

/// Sentinel standing in for +∞ in bound vectors.
///
/// A bound at or beyond this magnitude is treated as absent. The sentinel
/// (rather than `f64::INFINITY`) is part of the public contract: model back
/// ends and solvers compare bounds against it by value.
pub const INFINITY: f64 = 1.0e20;

/// Sentinel standing in for −∞ in bound vectors.
pub const NEG_INFINITY: f64 = -INFINITY;

/// True iff `lower` is an actual (finite) lower bound.
///
/// The test is strict: exactly `NEG_INFINITY` does not count as finite.
#[inline]
pub fn lower_is_finite(lower: f64) -> bool {
    lower > NEG_INFINITY
}

/// True iff `upper` is an actual (finite) upper bound.
///
/// The test is strict: exactly `INFINITY` does not count as finite.
#[inline]
pub fn upper_is_finite(upper: f64) -> bool {
    upper < INFINITY
}

/// How a single constraint or variable is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundType {
    /// Neither bound is finite.
    Free,
    /// Only the lower bound is finite.
    Lower,
    /// Only the upper bound is finite.
    Upper,
    /// Both bounds are finite and distinct.
    Range,
    /// Both bounds are finite and exactly equal: an equality constraint,
    /// or a variable fixed at one value.
    Fixed,
}

impl BoundType {
    /// Classify one `(lower, upper)` pair.
    ///
    /// The fixed-vs-range tie break uses exact float equality of the two
    /// bounds; no tolerance is applied.
    pub fn classify(lower: f64, upper: f64) -> Self {
        match (lower_is_finite(lower), upper_is_finite(upper)) {
            (true, true) => {
                if lower == upper {
                    BoundType::Fixed
                } else {
                    BoundType::Range
                }
            }
            (true, false) => BoundType::Lower,
            (false, true) => BoundType::Upper,
            (false, false) => BoundType::Free,
        }
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            BoundType::Free => "free",
            BoundType::Lower => "lower",
            BoundType::Upper => "upper",
            BoundType::Range => "range",
            BoundType::Fixed => "fixed",
        }
    }
}

impl fmt::Display for BoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ascending index lists, one per [`BoundType`].
///
/// Built by a single scan over parallel `lower`/`upper` slices. Every index
/// lands in exactly one list, so the five list lengths always sum to the
/// input length. Ascending order is part of the contract: solvers iterate
/// these lists in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundPartition {
    free: Vec<usize>,
    lower: Vec<usize>,
    upper: Vec<usize>,
    range: Vec<usize>,
    fixed: Vec<usize>,
}

impl BoundPartition {
    /// Classify every `(lower[i], upper[i])` pair, in ascending index order.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length.
    pub fn from_bounds(lower: &[f64], upper: &[f64]) -> Self {
        assert_eq!(
            lower.len(),
            upper.len(),
            "bound slices must have equal length"
        );
        let mut part = Self::default();
        for (i, (&lo, &up)) in lower.iter().zip(upper.iter()).enumerate() {
            match BoundType::classify(lo, up) {
                BoundType::Free => part.free.push(i),
                BoundType::Lower => part.lower.push(i),
                BoundType::Upper => part.upper.push(i),
                BoundType::Range => part.range.push(i),
                BoundType::Fixed => part.fixed.push(i),
            }
        }
        part
    }

    /// Indices with no finite bound.
    pub fn free(&self) -> &[usize] {
        &self.free
    }

    /// Indices with only a finite lower bound.
    pub fn lower(&self) -> &[usize] {
        &self.lower
    }

    /// Indices with only a finite upper bound.
    pub fn upper(&self) -> &[usize] {
        &self.upper
    }

    /// Indices bounded on both sides with distinct bounds.
    pub fn range(&self) -> &[usize] {
        &self.range
    }

    /// Indices with both bounds finite and exactly equal.
    pub fn fixed(&self) -> &[usize] {
        &self.fixed
    }

    /// Number of free indices.
    pub fn nfree(&self) -> usize {
        self.free.len()
    }

    /// Number of lower-only indices.
    pub fn nlower(&self) -> usize {
        self.lower.len()
    }

    /// Number of upper-only indices.
    pub fn nupper(&self) -> usize {
        self.upper.len()
    }

    /// Number of range indices.
    pub fn nrange(&self) -> usize {
        self.range.len()
    }

    /// Number of fixed indices.
    pub fn nfixed(&self) -> usize {
        self.fixed.len()
    }

    /// Total number of classified indices (the five counts summed).
    pub fn len(&self) -> usize {
        self.free.len() + self.lower.len() + self.upper.len() + self.range.len() + self.fixed.len()
    }

    /// True iff nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

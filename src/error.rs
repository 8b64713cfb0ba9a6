//! Error types for the modeling core.

use thiserror::Error;

/// Errors raised at model construction or by evaluation calls.
///
/// Construction errors are reported fail-fast: an invalid
/// [`ProblemSpec`](crate::ProblemSpec) never produces a partially
/// classified model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// An evaluation method this model does not provide was called.
    #[error("model does not implement `{op}`")]
    Unsupported {
        /// Name of the missing evaluation method.
        op: &'static str,
    },

    /// A supplied vector does not match the problem dimensions.
    #[error("`{field}` has length {got}, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Length of the supplied vector.
        got: usize,
        /// Length required by `n` or `m`.
        expected: usize,
    },

    /// A variable has crossing bounds.
    #[error("variable {index} has lower bound {lower} > upper bound {upper}")]
    InvalidVariableBounds {
        /// Variable index.
        index: usize,
        /// Supplied lower bound.
        lower: f64,
        /// Supplied upper bound.
        upper: f64,
    },

    /// A general constraint has crossing bounds.
    #[error("constraint {index} has lower bound {lower} > upper bound {upper}")]
    InvalidConstraintBounds {
        /// Constraint index.
        index: usize,
        /// Supplied lower bound.
        lower: f64,
        /// Supplied upper bound.
        upper: f64,
    },

    /// A constraint-kind tag points outside `0..m`.
    #[error("`{field}` tags constraint {index}, but the problem has {m} constraints")]
    KindTagOutOfRange {
        /// Which tag list held the bad index (`"lin"` or `"net"`).
        field: &'static str,
        /// The out-of-range constraint index.
        index: usize,
        /// Number of general constraints.
        m: usize,
    },

    /// A constraint is tagged with more than one kind.
    #[error("constraint {index} is tagged both linear and network")]
    OverlappingKindTags {
        /// The doubly tagged constraint index.
        index: usize,
    },
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_operation() {
        let err = ModelError::Unsupported { op: "hprod" };
        assert!(err.to_string().contains("hprod"));
    }

    #[test]
    fn construction_errors_report_context() {
        let err = ModelError::DimensionMismatch {
            field: "x0",
            got: 2,
            expected: 3,
        };
        assert!(err.to_string().contains("x0"));
        assert!(err.to_string().contains("expected 3"));

        let err = ModelError::InvalidConstraintBounds {
            index: 1,
            lower: 4.0,
            upper: 2.0,
        };
        assert!(err.to_string().contains("constraint 1"));
    }
}

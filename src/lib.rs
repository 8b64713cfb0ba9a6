//! Optmodel: core data structures and traits for modeling constrained
//! nonlinear optimization problems
//!
//! This library is the modeling layer a solver sits on top of. It knows
//! nothing about algorithms; it describes problems and the callbacks used
//! to evaluate them:
//!
//! - **[`ProblemSpec`]**: plain-data problem description with defaults
//! - **[`ProblemMeta`]**: validated, immutable metadata carrying both
//!   bound-type partitions and constraint-kind lists
//! - **[`NlpModel`]**: the abstract evaluation interface (objective,
//!   constraints, derivatives), every callback optional
//! - **[`Counters`]**: evaluation tallies kept by implementations
//!
//! A problem instance has the form
//!
//! ```text
//! minimize    f(x)              x in R^n
//! subject to  lcon <= c(x) <= ucon
//!             lvar <=  x   <= uvar
//! ```
//!
//! Bounds at or beyond `1.0e20` in magnitude are treated as infinite.
//!
//! # Example
//!
//! ```
//! use optmodel::ProblemSpec;
//!
//! let meta = ProblemSpec {
//!     n: 3,
//!     m: 2,
//!     name: "fence".into(),
//!     lvar: Some(vec![0.0, 0.0, 0.0]),
//!     lcon: Some(vec![4.0, 0.0]),
//!     ucon: Some(vec![4.0, 10.0]),
//!     lin: vec![0],
//!     ..Default::default()
//! }
//! .build()?;
//!
//! assert_eq!(meta.variable_types().lower(), [0, 1, 2]);
//! assert_eq!(meta.constraint_types().fixed(), [0]);
//! assert_eq!(meta.constraint_types().range(), [1]);
//! assert_eq!(meta.nonlinear(), [1]);
//! assert_eq!(meta.nbounds(), 3);
//! # Ok::<(), optmodel::ModelError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bounds;
pub mod counters;
pub mod error;
pub mod model;
pub mod problem;

// Re-export main types
pub use bounds::{BoundPartition, BoundType, INFINITY, NEG_INFINITY};
pub use counters::Counters;
pub use error::{ModelError, ModelResult};
pub use model::{NlpModel, OptimalityResiduals, SparseCsc, SparseSymmetricCsc, SparseVec};
pub use problem::{ProblemMeta, ProblemSpec, Tolerances};

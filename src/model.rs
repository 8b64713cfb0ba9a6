//! The abstract evaluation interface.
//!
//! [`NlpModel`] is the trait solvers program against: problem metadata,
//! evaluation counters, and a set of evaluation callbacks. Every callback
//! has a default body returning [`ModelError::Unsupported`], so a concrete
//! model implements only what its solver actually calls. Derivative
//! exchange uses the [`sprs`] aliases defined here.

use crate::counters::Counters;
use crate::error::{ModelError, ModelResult};
use crate::problem::ProblemMeta;

/// Sparse matrix in CSC format with `f64` values and `usize` indices.
pub type SparseCsc = sprs::CsMatI<f64, usize>;

/// Symmetric sparse matrix in CSC format; only the upper triangle is stored.
pub type SparseSymmetricCsc = sprs::CsMatI<f64, usize>;

/// Sparse vector with `f64` values and `usize` indices.
pub type SparseVec = sprs::CsVecI<f64, usize>;

/// Residuals of the first-order optimality conditions at a primal-dual
/// point, as computed by [`NlpModel::optimality_residuals`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalityResiduals {
    /// Dual feasibility residual.
    pub dual: f64,
    /// Complementarity residual.
    pub complementarity: f64,
    /// Primal feasibility residual.
    pub primal: f64,
}

/// A continuous optimization problem seen through its evaluation callbacks.
///
/// The trait couples three things: the validated [`ProblemMeta`], the
/// [`Counters`] tallying evaluations, and the callbacks themselves. All
/// callbacks default to [`ModelError::Unsupported`] naming the missing
/// operation, so a model exposing only an objective is a valid model.
///
/// Implementations take `&mut self` so they may cache factorizations or
/// intermediate values between calls, and they alone are responsible for
/// bumping the matching counter on every successful evaluation. Exclusive
/// access also serializes evaluations; to share a model across threads,
/// lock it, or give each thread its own instance and merge the counters.
///
/// ```
/// use optmodel::{Counters, ModelResult, NlpModel, ProblemMeta, ProblemSpec};
///
/// // min x[0]^2 + x[1]^2  subject to  x[0] + x[1] = 1.
/// struct Sphere {
///     meta: ProblemMeta,
///     counters: Counters,
/// }
///
/// impl NlpModel for Sphere {
///     fn meta(&self) -> &ProblemMeta {
///         &self.meta
///     }
///
///     fn counters(&self) -> &Counters {
///         &self.counters
///     }
///
///     fn counters_mut(&mut self) -> &mut Counters {
///         &mut self.counters
///     }
///
///     fn obj(&mut self, x: &[f64]) -> ModelResult<f64> {
///         self.counters.obj += 1;
///         Ok(x.iter().map(|xi| xi * xi).sum())
///     }
/// }
///
/// let meta = ProblemSpec {
///     n: 2,
///     m: 1,
///     name: "sphere".into(),
///     lcon: Some(vec![1.0]),
///     ucon: Some(vec![1.0]),
///     ..Default::default()
/// }
/// .build()?;
/// let mut model = Sphere { meta, counters: Counters::new() };
///
/// assert_eq!(model.obj(&[3.0, 4.0])?, 25.0);
/// assert_eq!(model.counters().obj, 1);
/// assert!(model.cons(&[3.0, 4.0]).is_err());
/// # Ok::<(), optmodel::ModelError>(())
/// ```
pub trait NlpModel {
    /// Validated metadata of the problem being modeled.
    fn meta(&self) -> &ProblemMeta;

    /// Evaluation counters, read-only.
    fn counters(&self) -> &Counters;

    /// Evaluation counters, for implementations to bump.
    fn counters_mut(&mut self) -> &mut Counters;

    /// Reset every evaluation counter to zero.
    fn reset_counters(&mut self) {
        self.counters_mut().reset();
    }

    /// Evaluate the objective `f(x)`.
    fn obj(&mut self, _x: &[f64]) -> ModelResult<f64> {
        Err(ModelError::Unsupported { op: "obj" })
    }

    /// Evaluate the objective gradient at `x`, dense, length `n`.
    fn grad(&mut self, _x: &[f64]) -> ModelResult<Vec<f64>> {
        Err(ModelError::Unsupported { op: "grad" })
    }

    /// Evaluate the constraint body `c(x)`, dense, length `m`.
    fn cons(&mut self, _x: &[f64]) -> ModelResult<Vec<f64>> {
        Err(ModelError::Unsupported { op: "cons" })
    }

    /// Evaluate the single constraint `c_i(x)`.
    fn icons(&mut self, _i: usize, _x: &[f64]) -> ModelResult<f64> {
        Err(ModelError::Unsupported { op: "icons" })
    }

    /// Evaluate the gradient of constraint `i` at `x`, dense, length `n`.
    fn igrad(&mut self, _i: usize, _x: &[f64]) -> ModelResult<Vec<f64>> {
        Err(ModelError::Unsupported { op: "igrad" })
    }

    /// Evaluate the gradient of constraint `i` at `x` as a sparse vector.
    fn sigrad(&mut self, _i: usize, _x: &[f64]) -> ModelResult<SparseVec> {
        Err(ModelError::Unsupported { op: "sigrad" })
    }

    /// Evaluate the constraint Jacobian at `x`, `m x n`.
    fn jac(&mut self, _x: &[f64]) -> ModelResult<SparseCsc> {
        Err(ModelError::Unsupported { op: "jac" })
    }

    /// Evaluate the Hessian of the Lagrangian at `(x, z)`, `n x n`.
    ///
    /// The Lagrangian is `L(x, z) = f(x) + sum_j z[j] c_j(x)`; only the
    /// upper triangle is stored.
    fn hess(&mut self, _x: &[f64], _z: &[f64]) -> ModelResult<SparseSymmetricCsc> {
        Err(ModelError::Unsupported { op: "hess" })
    }

    /// Evaluate the Lagrangian Hessian-vector product `H(x, z) v`.
    ///
    /// Matrix-free counterpart of [`hess`](NlpModel::hess); returns a dense
    /// vector of length `n`.
    fn hprod(&mut self, _x: &[f64], _z: &[f64], _v: &[f64]) -> ModelResult<Vec<f64>> {
        Err(ModelError::Unsupported { op: "hprod" })
    }

    /// Residuals of the first-order optimality conditions at `(x, z)`.
    fn optimality_residuals(
        &mut self,
        _x: &[f64],
        _z: &[f64],
    ) -> ModelResult<OptimalityResiduals> {
        Err(ModelError::Unsupported {
            op: "optimality_residuals",
        })
    }

    /// True iff every optimality residual at `(x, z)` is within its
    /// tolerance from [`ProblemMeta::tolerances`].
    ///
    /// Degrades honestly: a model without
    /// [`optimality_residuals`](NlpModel::optimality_residuals), or one
    /// returning a NaN residual, is never reported optimal.
    fn at_optimality(&mut self, x: &[f64], z: &[f64]) -> bool {
        let tols = self.meta().tolerances();
        match self.optimality_residuals(x, z) {
            Ok(r) => {
                r.dual <= tols.dual
                    && r.complementarity <= tols.complementarity
                    && r.primal <= tols.primal
            }
            Err(_) => false,
        }
    }
}

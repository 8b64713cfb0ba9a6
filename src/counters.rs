//! Evaluation counters for profiling.

/// Counts of evaluation calls made against a model.
///
/// The modeling core never increments these itself: a concrete
/// [`NlpModel`](crate::NlpModel) bumps the matching field each time it
/// performs an evaluation, so the counts reflect real work done by the
/// back end. All counts start at zero and only grow, except through
/// [`Counters::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Objective evaluations.
    pub obj: u64,
    /// Objective gradient evaluations.
    pub grad: u64,
    /// Lagrangian Hessian evaluations.
    pub hess: u64,
    /// Hessian-vector products.
    pub hprod: u64,
    /// Constraint function evaluations.
    pub cons: u64,
    /// Constraint gradient and Jacobian evaluations.
    pub jac: u64,
    /// Jacobian-vector products.
    pub jprod: u64,
}

impl Counters {
    /// Fresh counters, all zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sum of all seven counters.
    pub fn total(&self) -> u64 {
        self.obj + self.grad + self.hess + self.hprod + self.cons + self.jac + self.jprod
    }
}

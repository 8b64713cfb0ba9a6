//! Problem description and derived metadata.
//!
//! [`ProblemSpec`] is the plain-data description of a problem instance:
//! dimensions, optional initial values, optional bound vectors, optional
//! constraint-kind tags. [`ProblemSpec::build`] validates it fail-fast and
//! produces a [`ProblemMeta`], the canonical immutable form every solver
//! reads: normalized vectors, both bound-type partitions, and stopping
//! tolerances. Classification runs exactly once, at construction.

use log::{debug, warn};

use crate::bounds::{BoundPartition, INFINITY, NEG_INFINITY};
use crate::error::{ModelError, ModelResult};

/// Stopping tolerances for the generic optimality check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Dual feasibility tolerance.
    pub dual: f64,
    /// Complementarity tolerance.
    pub complementarity: f64,
    /// Primal feasibility tolerance.
    pub primal: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            dual: 1e-6,
            complementarity: 1e-6,
            primal: 1e-6,
        }
    }
}

/// Plain-data description of a problem instance.
///
/// Every field beyond the dimensions is optional; missing fields take the
/// documented defaults. Build one with struct-update syntax and turn it
/// into validated metadata with [`ProblemSpec::build`]:
///
/// ```
/// use optmodel::ProblemSpec;
///
/// let meta = ProblemSpec {
///     n: 2,
///     m: 1,
///     name: "toy".into(),
///     lvar: Some(vec![0.0, 0.0]),
///     lcon: Some(vec![1.0]),
///     ucon: Some(vec![1.0]),
///     ..Default::default()
/// }
/// .build()?;
///
/// assert_eq!(meta.variable_types().lower(), [0, 1]);
/// assert_eq!(meta.constraint_types().fixed(), [0]);
/// # Ok::<(), optmodel::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProblemSpec {
    /// Number of decision variables.
    pub n: usize,
    /// Number of general (non-bound) constraints.
    pub m: usize,
    /// Human-readable problem name (default `"Generic"`).
    pub name: String,
    /// Initial point, length `n` (default all zero).
    pub x0: Option<Vec<f64>>,
    /// Initial multiplier estimates, length `m` (default all zero).
    pub pi0: Option<Vec<f64>>,
    /// Variable lower bounds, length `n` (default all [`NEG_INFINITY`]).
    pub lvar: Option<Vec<f64>>,
    /// Variable upper bounds, length `n` (default all [`INFINITY`]).
    pub uvar: Option<Vec<f64>>,
    /// Constraint lower bounds, length `m` (default all [`NEG_INFINITY`]).
    pub lcon: Option<Vec<f64>>,
    /// Constraint upper bounds, length `m` (default all [`INFINITY`]).
    pub ucon: Option<Vec<f64>>,
    /// Indices of linear constraints (default none).
    pub lin: Vec<usize>,
    /// Indices of network constraints (default none).
    pub net: Vec<usize>,
    /// Stopping tolerances (default `1e-6` each).
    pub tolerances: Tolerances,
}

impl Default for ProblemSpec {
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            name: "Generic".to_string(),
            x0: None,
            pi0: None,
            lvar: None,
            uvar: None,
            lcon: None,
            ucon: None,
            lin: Vec::new(),
            net: Vec::new(),
            tolerances: Tolerances::default(),
        }
    }
}

/// Take a supplied vector of the expected length, or fill in the default.
fn resolve(
    field: &'static str,
    supplied: Option<Vec<f64>>,
    expected: usize,
    fill: f64,
) -> ModelResult<Vec<f64>> {
    match supplied {
        Some(v) if v.len() == expected => Ok(v),
        Some(v) => Err(ModelError::DimensionMismatch {
            field,
            got: v.len(),
            expected,
        }),
        None => Ok(vec![fill; expected]),
    }
}

impl ProblemSpec {
    /// Validate the description and derive the full problem metadata.
    ///
    /// Runs both classification passes over the resolved bound vectors, in
    /// ascending index order, exactly once. The kind tags `lin` and `net`
    /// are sorted and deduplicated; `nln` is derived as their complement so
    /// the three lists always partition `0..m`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::DimensionMismatch`] if a supplied vector does not
    ///   match `n` (variable-indexed) or `m` (constraint-indexed);
    /// - [`ModelError::InvalidVariableBounds`] / -
    ///   [`ModelError::InvalidConstraintBounds`] if any lower bound exceeds
    ///   the matching upper bound;
    /// - [`ModelError::KindTagOutOfRange`] / -
    ///   [`ModelError::OverlappingKindTags`] for bad kind tags.
    pub fn build(self) -> ModelResult<ProblemMeta> {
        let ProblemSpec {
            n,
            m,
            name,
            x0,
            pi0,
            lvar,
            uvar,
            lcon,
            ucon,
            mut lin,
            mut net,
            tolerances,
        } = self;

        let x0 = resolve("x0", x0, n, 0.0)?;
        let pi0 = resolve("pi0", pi0, m, 0.0)?;
        let lvar = resolve("lvar", lvar, n, NEG_INFINITY)?;
        let uvar = resolve("uvar", uvar, n, INFINITY)?;
        let lcon = resolve("lcon", lcon, m, NEG_INFINITY)?;
        let ucon = resolve("ucon", ucon, m, INFINITY)?;

        for (i, (&lo, &up)) in lvar.iter().zip(uvar.iter()).enumerate() {
            if lo > up {
                return Err(ModelError::InvalidVariableBounds {
                    index: i,
                    lower: lo,
                    upper: up,
                });
            }
        }
        for (i, (&lo, &up)) in lcon.iter().zip(ucon.iter()).enumerate() {
            if lo > up {
                return Err(ModelError::InvalidConstraintBounds {
                    index: i,
                    lower: lo,
                    upper: up,
                });
            }
        }

        lin.sort_unstable();
        lin.dedup();
        net.sort_unstable();
        net.dedup();
        for &i in &lin {
            if i >= m {
                return Err(ModelError::KindTagOutOfRange {
                    field: "lin",
                    index: i,
                    m,
                });
            }
        }
        for &i in &net {
            if i >= m {
                return Err(ModelError::KindTagOutOfRange {
                    field: "net",
                    index: i,
                    m,
                });
            }
        }
        let mut tagged = vec![false; m];
        for &i in &lin {
            tagged[i] = true;
        }
        for &i in &net {
            if tagged[i] {
                return Err(ModelError::OverlappingKindTags { index: i });
            }
            tagged[i] = true;
        }
        let nln: Vec<usize> = (0..m).filter(|&i| !tagged[i]).collect();

        let constraint_types = BoundPartition::from_bounds(&lcon, &ucon);
        let variable_types = BoundPartition::from_bounds(&lvar, &uvar);

        // A free general constraint restricts nothing; almost always a
        // modeling mistake, but not ours to reject.
        if constraint_types.nfree() > 0 {
            warn!(
                "problem `{}`: {} of {} general constraints have no finite bound",
                name,
                constraint_types.nfree(),
                m
            );
        }
        debug!(
            "problem `{}`: n = {}, m = {}, variables {} fixed / {} range / {} lower / {} upper / {} free",
            name,
            n,
            m,
            variable_types.nfixed(),
            variable_types.nrange(),
            variable_types.nlower(),
            variable_types.nupper(),
            variable_types.nfree(),
        );

        Ok(ProblemMeta {
            n,
            m,
            name,
            x0,
            pi0,
            lvar,
            uvar,
            lcon,
            ucon,
            lin,
            nln,
            net,
            constraint_types,
            variable_types,
            tolerances,
        })
    }
}

/// Validated, immutable problem metadata.
///
/// The canonical form of a problem instance:
///
/// ```text
/// minimize    f(x)            x ∈ ℝⁿ
/// subject to  lcon ≤ c(x) ≤ ucon     (m general constraints)
///             lvar ≤  x   ≤ uvar     (variable bounds)
/// ```
///
/// Construction through [`ProblemSpec::build`] normalizes every vector and
/// classifies every constraint and variable once; afterwards the value is
/// read-only. All index lists are ascending.
///
/// # Invariants
///
/// - `x0.len() == n`, `pi0.len() == m`; bound vectors match likewise.
/// - `lvar[i] ≤ uvar[i]` and `lcon[i] ≤ ucon[i]` for all `i`.
/// - [`constraint_types`](ProblemMeta::constraint_types) partitions `0..m`;
///   [`variable_types`](ProblemMeta::variable_types) partitions `0..n`.
/// - `lin`, `nln` and `net` partition `0..m`.
#[derive(Debug, Clone)]
pub struct ProblemMeta {
    n: usize,
    m: usize,
    name: String,
    x0: Vec<f64>,
    pi0: Vec<f64>,
    lvar: Vec<f64>,
    uvar: Vec<f64>,
    lcon: Vec<f64>,
    ucon: Vec<f64>,
    lin: Vec<usize>,
    nln: Vec<usize>,
    net: Vec<usize>,
    constraint_types: BoundPartition,
    variable_types: BoundPartition,
    tolerances: Tolerances,
}

impl ProblemMeta {
    /// Number of decision variables.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of general (non-bound) constraints.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Human-readable problem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial point, length `n`.
    pub fn x0(&self) -> &[f64] {
        &self.x0
    }

    /// Initial multiplier estimates, length `m`.
    pub fn pi0(&self) -> &[f64] {
        &self.pi0
    }

    /// Variable lower bounds, length `n`.
    pub fn lvar(&self) -> &[f64] {
        &self.lvar
    }

    /// Variable upper bounds, length `n`.
    pub fn uvar(&self) -> &[f64] {
        &self.uvar
    }

    /// Constraint lower bounds, length `m`.
    pub fn lcon(&self) -> &[f64] {
        &self.lcon
    }

    /// Constraint upper bounds, length `m`.
    pub fn ucon(&self) -> &[f64] {
        &self.ucon
    }

    /// Indices of constraints tagged linear, ascending.
    pub fn linear(&self) -> &[usize] {
        &self.lin
    }

    /// Indices of constraints tagged nonlinear, ascending.
    ///
    /// Derived as the complement of the linear and network tags, so every
    /// constraint carries exactly one kind.
    pub fn nonlinear(&self) -> &[usize] {
        &self.nln
    }

    /// Indices of constraints tagged network, ascending.
    pub fn network(&self) -> &[usize] {
        &self.net
    }

    /// Number of linear constraints.
    pub fn nlin(&self) -> usize {
        self.lin.len()
    }

    /// Number of nonlinear constraints.
    pub fn nnln(&self) -> usize {
        self.nln.len()
    }

    /// Number of network constraints.
    pub fn nnet(&self) -> usize {
        self.net.len()
    }

    /// Bound-type partition of the general constraints.
    ///
    /// `fixed` here means an equality constraint: `lcon[i] == ucon[i]`.
    pub fn constraint_types(&self) -> &BoundPartition {
        &self.constraint_types
    }

    /// Bound-type partition of the variables.
    pub fn variable_types(&self) -> &BoundPartition {
        &self.variable_types
    }

    /// Number of variables subject to at least one finite bound.
    pub fn nbounds(&self) -> usize {
        self.n - self.variable_types.nfree()
    }

    /// Stopping tolerances for the optimality check.
    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// True iff `x` lies inside the variable bounds, within `tol`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is shorter than `n`.
    pub fn satisfies_bounds(&self, x: &[f64], tol: f64) -> bool {
        for i in 0..self.n {
            if x[i] < self.lvar[i] - tol || x[i] > self.uvar[i] + tol {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;

    fn plain_3_2() -> ProblemSpec {
        ProblemSpec {
            n: 3,
            m: 2,
            ..Default::default()
        }
    }

    struct CaptureLogger {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    #[test]
    fn free_constraints_build_with_a_warning() {
        log::set_logger(&CAPTURE).expect("no other logger installed");
        log::set_max_level(LevelFilter::Debug);

        // No bounds at all: both general constraints are free. The build
        // succeeds and warns instead of failing.
        let meta = plain_3_2().build().unwrap();
        assert_eq!(meta.constraint_types().nfree(), 2);

        let records = CAPTURE.records.lock().unwrap();
        let warning = records
            .iter()
            .find(|(level, _)| *level == Level::Warn)
            .expect("a free-constraint warning was logged");
        assert!(
            warning
                .1
                .contains("2 of 2 general constraints have no finite bound")
        );
        assert!(warning.1.contains("`Generic`"));
    }

    #[test]
    fn default_construction_matches_contract() {
        let meta = plain_3_2().build().unwrap();

        assert_eq!(meta.n(), 3);
        assert_eq!(meta.m(), 2);
        assert_eq!(meta.name(), "Generic");
        assert_eq!(meta.x0(), [0.0, 0.0, 0.0]);
        assert_eq!(meta.pi0(), [0.0, 0.0]);
        assert_eq!(meta.lvar(), [NEG_INFINITY; 3]);
        assert_eq!(meta.uvar(), [INFINITY; 3]);
        assert_eq!(meta.lcon(), [NEG_INFINITY; 2]);
        assert_eq!(meta.ucon(), [INFINITY; 2]);

        // Without bounds everything is free.
        assert_eq!(meta.constraint_types().free(), [0, 1]);
        assert_eq!(meta.variable_types().free(), [0, 1, 2]);
        assert_eq!(meta.nbounds(), 0);

        // Default kinds: every constraint is nonlinear.
        assert_eq!(meta.nonlinear(), [0, 1]);
        assert!(meta.linear().is_empty());
        assert!(meta.network().is_empty());
        assert_eq!(meta.nnln(), 2);
        assert_eq!(meta.nlin(), 0);
        assert_eq!(meta.nnet(), 0);
    }

    #[test]
    fn supplied_vectors_are_kept_verbatim() {
        let meta = ProblemSpec {
            n: 2,
            m: 1,
            x0: Some(vec![1.5, -2.0]),
            pi0: Some(vec![0.5]),
            lvar: Some(vec![0.0, NEG_INFINITY]),
            uvar: Some(vec![4.0, 8.0]),
            lcon: Some(vec![-1.0]),
            ucon: Some(vec![1.0]),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(meta.x0(), [1.5, -2.0]);
        assert_eq!(meta.pi0(), [0.5]);
        assert_eq!(meta.variable_types().range(), [0]);
        assert_eq!(meta.variable_types().upper(), [1]);
        assert_eq!(meta.constraint_types().range(), [0]);
        assert_eq!(meta.nbounds(), 2);
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        let err = ProblemSpec {
            x0: Some(vec![0.0; 2]),
            ..plain_3_2()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                field: "x0",
                got: 2,
                expected: 3
            }
        );

        let err = ProblemSpec {
            ucon: Some(vec![0.0; 3]),
            ..plain_3_2()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                field: "ucon",
                got: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn crossing_bounds_are_rejected() {
        let err = ProblemSpec {
            lvar: Some(vec![0.0, 2.0, 0.0]),
            uvar: Some(vec![1.0, 1.0, 1.0]),
            ..plain_3_2()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidVariableBounds {
                index: 1,
                lower: 2.0,
                upper: 1.0
            }
        );

        let err = ProblemSpec {
            lcon: Some(vec![0.0, 3.0]),
            ucon: Some(vec![0.0, -3.0]),
            ..plain_3_2()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidConstraintBounds {
                index: 1,
                lower: 3.0,
                upper: -3.0
            }
        );
    }

    #[test]
    fn kind_tags_partition_the_constraints() {
        let meta = ProblemSpec {
            n: 1,
            m: 4,
            lin: vec![2, 0],
            net: vec![3],
            ..Default::default()
        }
        .build()
        .unwrap();

        // Tags come back sorted; nln is the complement.
        assert_eq!(meta.linear(), [0, 2]);
        assert_eq!(meta.network(), [3]);
        assert_eq!(meta.nonlinear(), [1]);
        assert_eq!(meta.nlin() + meta.nnln() + meta.nnet(), 4);
    }

    #[test]
    fn bad_kind_tags_are_rejected() {
        let err = ProblemSpec {
            n: 1,
            m: 2,
            lin: vec![2],
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::KindTagOutOfRange {
                field: "lin",
                index: 2,
                m: 2
            }
        );

        let err = ProblemSpec {
            n: 1,
            m: 2,
            lin: vec![1],
            net: vec![1],
            ..Default::default()
        }
        .build()
        .unwrap_err();
        assert_eq!(err, ModelError::OverlappingKindTags { index: 1 });
    }

    #[test]
    fn tolerances_can_be_overridden() {
        let meta = ProblemSpec {
            tolerances: Tolerances {
                dual: 1e-8,
                ..Default::default()
            },
            ..plain_3_2()
        }
        .build()
        .unwrap();
        assert_eq!(meta.tolerances().dual, 1e-8);
        assert_eq!(meta.tolerances().primal, 1e-6);
    }

    #[test]
    fn satisfies_bounds_respects_tolerance() {
        let meta = ProblemSpec {
            n: 2,
            m: 0,
            lvar: Some(vec![0.0, 0.0]),
            uvar: Some(vec![1.0, 1.0]),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert!(meta.satisfies_bounds(&[0.5, 0.5], 0.0));
        assert!(!meta.satisfies_bounds(&[-0.01, 0.5], 1e-6));
        assert!(meta.satisfies_bounds(&[-0.01, 0.5], 0.1));
        assert!(!meta.satisfies_bounds(&[0.5, 1.2], 0.1));
    }
}

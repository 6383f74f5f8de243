//! Interior-point backend built on [Clarabel](https://clarabel.org).
//!
//! Clarabel solves `min ½xᵀPx + qᵀx` subject to `Ax + s = b`, `s ∈ K` for a
//! product `K` of cones. A [`Program`] maps onto it as follows:
//!
//! ```text
//! variables:  x = [p₀ … p_{N-1}]            (linear objective)
//!             x = [p₀ … p_{N-1}, t₀ … t_{N-1}] (entropy objective)
//! zero cone:        equality rows             a·p = b
//! nonnegative cone: inequality rows           a·p ≤ b  (≥ rows negated)
//!                   non-negativity            -p ≤ 0
//! exp cones:        (tᵢ, pᵢ, 1) ∈ K_exp  ⇔  tᵢ ≤ -pᵢ ln pᵢ
//! ```
//!
//! Maximizing entropy becomes minimizing `-Σ tᵢ`.

use ::clarabel::algebra::CscMatrix;
use ::clarabel::solver::*;
use log::debug;

use crate::constraint::Relation;
use crate::solver::{Objective, Program, Solution, SolveError, Solver};

/// The default [`Solver`].
#[derive(Debug, Default, Copy, Clone)]
pub struct ClarabelSolver;

/// Constraint matrix collected row by row as `(row, col, value)` triplets.
struct Triplets {
    cols: usize,
    rows: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl Triplets {
    fn new(cols: usize) -> Self {
        Self {
            cols,
            rows: 0,
            entries: Vec::new(),
        }
    }

    /// Appends a row given as `(col, value)` pairs; zeros are dropped.
    fn push(&mut self, row: impl IntoIterator<Item = (usize, f64)>) {
        for (col, value) in row {
            debug_assert!(col < self.cols);
            if value != 0.0 {
                self.entries.push((self.rows, col, value));
            }
        }
        self.rows += 1;
    }

    fn push_empty(&mut self) {
        self.rows += 1;
    }

    fn push_dense(&mut self, row: &[f64]) {
        self.push(row.iter().copied().enumerate());
    }

    fn into_csc(self) -> CscMatrix<f64> {
        let nnz = self.entries.len();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        for (row, col, value) in self.entries {
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        CscMatrix::new_from_triplets(self.rows, self.cols, rows, cols, values)
    }
}

impl Solver for ClarabelSolver {
    fn solve(&self, program: &Program) -> Result<Solution, SolveError> {
        let n = program.dimension;
        let entropy = matches!(program.objective, Objective::MaximizeEntropy);
        let width = if entropy { 2 * n } else { n };

        let mut a = Triplets::new(width);
        let mut b = Vec::new();
        let mut cones = Vec::new();

        let equalities: Vec<_> = program.equalities().collect();
        for row in &equalities {
            a.push_dense(&row.coefficients);
            b.push(row.rhs);
        }
        if !equalities.is_empty() {
            cones.push(SupportedConeT::ZeroConeT(equalities.len()));
        }

        let mut nonneg = 0;
        for row in program.inequalities() {
            match row.relation {
                Relation::Le => {
                    a.push_dense(&row.coefficients);
                    b.push(row.rhs);
                }
                Relation::Ge => {
                    a.push(row.coefficients.iter().map(|c| -c).enumerate());
                    b.push(-row.rhs);
                }
                Relation::Eq => unreachable!("equalities are placed in the zero cone"),
            }
            nonneg += 1;
        }
        for i in 0..n {
            a.push([(i, -1.0)]);
            b.push(0.0);
            nonneg += 1;
        }
        cones.push(SupportedConeT::NonnegativeConeT(nonneg));

        let mut q = vec![0.0; width];
        match &program.objective {
            Objective::MaximizeEntropy => {
                for i in 0..n {
                    a.push([(n + i, -1.0)]);
                    b.push(0.0);
                    a.push([(i, -1.0)]);
                    b.push(0.0);
                    a.push_empty();
                    b.push(1.0);

                    cones.push(SupportedConeT::ExponentialConeT());
                    q[n + i] = -1.0;
                }
            }
            Objective::Minimize { coefficients, .. } => {
                assert_eq!(coefficients.len(), n, "Objective must have one coefficient per variable");
                q.copy_from_slice(coefficients);
            }
        }

        debug!(
            "clarabel: {} variables, {} rows, {} cones",
            width,
            b.len(),
            cones.len()
        );

        let p: CscMatrix<f64> = CscMatrix::zeros((width, width));
        let a = a.into_csc();
        let settings = DefaultSettings {
            max_iter: program.settings.max_iter,
            time_limit: program.settings.time_limit,
            verbose: program.settings.verbose,
            tol_gap_abs: program.settings.tolerance,
            tol_gap_rel: program.settings.tolerance,
            tol_feas: program.settings.tolerance,
            ..DefaultSettings::default()
        };

        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings)
            .map_err(|err| SolveError::Failed(format!("{:?}", err)))?;
        solver.solve();

        let status = &solver.solution.status;
        debug!("clarabel: status {:?}", status);
        match status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => {}
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                return Err(SolveError::Infeasible);
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                return Err(SolveError::Unbounded);
            }
            other => return Err(SolveError::Failed(format!("{:?}", other))),
        }

        let x = solver.solution.x[..n].to_vec();
        let value = match &program.objective {
            Objective::MaximizeEntropy => x.iter().filter(|&&v| v > 0.0).map(|&v| -v * v.ln()).sum(),
            Objective::Minimize { coefficients, constant } => {
                coefficients.iter().zip(&x).map(|(c, v)| c * v).sum::<f64>() + constant
            }
        };
        Ok(Solution { x, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::solver::{Row, SolverSettings};

    fn simplex(n: usize) -> Row {
        Row {
            coefficients: vec![1.0; n],
            relation: Relation::Eq,
            rhs: 1.0,
        }
    }

    #[test]
    fn test_triplets_keep_empty_rows() {
        let mut triplets = Triplets::new(3);
        triplets.push_dense(&[1.0, 0.0, 2.0]);
        triplets.push_empty();
        triplets.push([(1, 3.0)]);
        let a = triplets.into_csc();
        assert_eq!((a.m, a.n), (3, 3));
        assert_eq!(a.nzval.len(), 3);
        assert_eq!(a.colptr, vec![0, 1, 2, 3]);
        assert_eq!(a.rowval, vec![0, 2, 0]);
    }

    #[test]
    fn test_uniform_entropy() {
        let program = Program {
            dimension: 4,
            objective: Objective::MaximizeEntropy,
            rows: vec![simplex(4)],
            settings: SolverSettings::default(),
        };
        let solution = ClarabelSolver.solve(&program).unwrap();
        for v in &solution.x {
            assert!((v - 0.25).abs() < 1e-5, "x = {:?}", solution.x);
        }
        assert!((solution.value - 4f64.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_linear_minimum() {
        let program = Program {
            dimension: 3,
            objective: Objective::Minimize {
                coefficients: vec![3.0, 1.0, 2.0],
                constant: 0.5,
            },
            rows: vec![simplex(3)],
            settings: SolverSettings::default(),
        };
        let solution = ClarabelSolver.solve(&program).unwrap();
        assert!((solution.value - 1.5).abs() < 1e-6);
        assert!((solution.x[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_infeasible() {
        let program = Program {
            dimension: 2,
            objective: Objective::Minimize {
                coefficients: vec![1.0, 0.0],
                constant: 0.0,
            },
            rows: vec![
                simplex(2),
                Row {
                    coefficients: vec![1.0, 1.0],
                    relation: Relation::Ge,
                    rhs: 2.0,
                },
            ],
            settings: SolverSettings::default(),
        };
        assert_eq!(ClarabelSolver.solve(&program), Err(SolveError::Infeasible));
    }
}

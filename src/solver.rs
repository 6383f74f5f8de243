//! The solver boundary.
//!
//! Problems are handed to a [`Solver`] as a [`Program`]: an objective over a
//! non-negative vector plus linear rows `a · x ⋈ b`. The program is plain data,
//! so backends can be swapped and tests can use deterministic doubles.

use std::fmt;

use crate::constraint::Relation;

/// What the solver optimizes.
#[derive(Debug, Clone, PartialEq)]
pub enum Objective {
    /// Maximize `Σ -x[a] ln x[a]`.
    MaximizeEntropy,
    /// Minimize `c · x + k`.
    Minimize { coefficients: Vec<f64>, constant: f64 },
}

/// One linear row `coefficients · x ⋈ rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

/// A complete problem over `dimension` variables.
///
/// Non-negativity of every variable is implied and need not appear in `rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub dimension: usize,
    pub objective: Objective,
    pub rows: Vec<Row>,
    pub settings: SolverSettings,
}

impl Program {
    pub fn equalities(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.relation == Relation::Eq)
    }

    pub fn inequalities(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.relation != Relation::Eq)
    }
}

/// Optimal point and objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vec<f64>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    Infeasible,
    Unbounded,
    Failed(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Infeasible => write!(f, "infeasible"),
            SolveError::Unbounded => write!(f, "unbounded"),
            SolveError::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

pub trait Solver {
    fn solve(&self, program: &Program) -> Result<Solution, SolveError>;
}

/// Options forwarded to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    pub max_iter: u32,
    /// Absolute and relative gap/feasibility tolerance.
    pub tolerance: f64,
    /// Seconds; infinite means no limit.
    pub time_limit: f64,
    pub verbose: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tolerance: 1e-8,
            time_limit: f64::INFINITY,
            verbose: false,
        }
    }
}

impl SolverSettings {
    pub fn max_iter(mut self, max_iter: u32) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_settings_builder() {
        let settings = SolverSettings::default().max_iter(10).tolerance(1e-6).verbose(true);
        assert_eq!(settings.max_iter, 10);
        assert_eq!(settings.tolerance, 1e-6);
        assert!(settings.verbose);
        assert!(settings.time_limit.is_infinite());
    }

    #[test]
    fn test_row_partition() {
        let row = |relation| Row {
            coefficients: vec![1.0],
            relation,
            rhs: 0.0,
        };
        let program = Program {
            dimension: 1,
            objective: Objective::MaximizeEntropy,
            rows: vec![row(Relation::Eq), row(Relation::Le), row(Relation::Ge)],
            settings: SolverSettings::default(),
        };
        assert_eq!(program.equalities().count(), 1);
        assert_eq!(program.inequalities().count(), 2);
    }
}

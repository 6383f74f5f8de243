//! The three canonical problems.
//!
//! Each problem combines the caller's assumptions with the simplex constraints
//! (`Σ p = 1`, `p ≥ 0`) and delegates to a [`Solver`]:
//!
//! - [`maximum_entropy`]: the least-informative distribution consistent with the assumptions.
//! - [`minimize_functional`]: the smallest value a linear functional can take.
//! - [`maximize_functional`]: defined as `-minimize_functional(-expr)`.
//!
//! The solved vector is written back into the atom space. A failed solve leaves
//! the space unsolved.

use log::{debug, info, warn};

use crate::constraint::{Constraint, Relation};
use crate::error::{Error, Result};
use crate::expr::LinearExpr;
use crate::solver::{Objective, Program, Row, SolveError, Solver, SolverSettings};
use crate::space::AtomSpace;

fn lower(space: &AtomSpace, assumptions: &[Constraint]) -> Result<Vec<Row>> {
    let n = space.atom_count();
    let mut rows = Vec::with_capacity(assumptions.len() + 1);
    rows.push(Row {
        coefficients: vec![1.0; n],
        relation: Relation::Eq,
        rhs: 1.0,
    });
    for constraint in assumptions {
        space.check_owns(constraint.space())?;
        debug!("assumption: {}", constraint);
        let expr = constraint.expr();
        rows.push(Row {
            coefficients: expr.coefficients().to_vec(),
            relation: constraint.relation(),
            rhs: -expr.constant_term(),
        });
    }
    Ok(rows)
}

fn run(
    space: &mut AtomSpace,
    objective: Objective,
    assumptions: &[Constraint],
    solver: &impl Solver,
    settings: &SolverSettings,
) -> Result<f64> {
    let rows = lower(space, assumptions)?;
    let program = Program {
        dimension: space.atom_count(),
        objective,
        rows,
        settings: settings.clone(),
    };

    space.reset();
    match solver.solve(&program) {
        Ok(solution) => {
            info!("solved {}: value = {}", space, solution.value);
            space.store(solution.x, settings.tolerance);
            Ok(solution.value)
        }
        Err(SolveError::Infeasible) => {
            warn!("{} is infeasible under {} assumption(s)", space, assumptions.len());
            Err(Error::Infeasible {
                assumptions: assumptions.to_vec(),
            })
        }
        Err(SolveError::Unbounded) => {
            warn!("{} is unbounded under {} assumption(s)", space, assumptions.len());
            Err(Error::Unbounded {
                assumptions: assumptions.to_vec(),
            })
        }
        Err(SolveError::Failed(reason)) => {
            warn!("solver failed on {}: {}", space, reason);
            Err(Error::Solver(reason))
        }
    }
}

/// Finds the maximum-entropy distribution satisfying `assumptions` and stores it in `space`.
pub fn maximum_entropy(space: &mut AtomSpace, assumptions: &[Constraint], solver: &impl Solver) -> Result<()> {
    maximum_entropy_with(space, assumptions, solver, &SolverSettings::default())
}

pub fn maximum_entropy_with(
    space: &mut AtomSpace,
    assumptions: &[Constraint],
    solver: &impl Solver,
    settings: &SolverSettings,
) -> Result<()> {
    info!(
        "maximum entropy over {} atoms with {} assumption(s)",
        space.atom_count(),
        assumptions.len()
    );
    run(space, Objective::MaximizeEntropy, assumptions, solver, settings)?;
    Ok(())
}

/// Returns the minimum of `expr` over all distributions satisfying `assumptions`.
///
/// The minimizing distribution is stored in `space`.
pub fn minimize_functional(
    space: &mut AtomSpace,
    expr: &LinearExpr,
    assumptions: &[Constraint],
    solver: &impl Solver,
) -> Result<f64> {
    minimize_functional_with(space, expr, assumptions, solver, &SolverSettings::default())
}

pub fn minimize_functional_with(
    space: &mut AtomSpace,
    expr: &LinearExpr,
    assumptions: &[Constraint],
    solver: &impl Solver,
    settings: &SolverSettings,
) -> Result<f64> {
    space.check_owns(expr.space())?;
    info!(
        "minimize functional over {} atoms with {} assumption(s)",
        space.atom_count(),
        assumptions.len()
    );
    let objective = Objective::Minimize {
        coefficients: expr.coefficients().to_vec(),
        constant: expr.constant_term(),
    };
    run(space, objective, assumptions, solver, settings)
}

/// Returns the maximum of `expr` over all distributions satisfying `assumptions`.
///
/// The maximizing distribution is stored in `space`.
pub fn maximize_functional(
    space: &mut AtomSpace,
    expr: &LinearExpr,
    assumptions: &[Constraint],
    solver: &impl Solver,
) -> Result<f64> {
    maximize_functional_with(space, expr, assumptions, solver, &SolverSettings::default())
}

pub fn maximize_functional_with(
    space: &mut AtomSpace,
    expr: &LinearExpr,
    assumptions: &[Constraint],
    solver: &impl Solver,
    settings: &SolverSettings,
) -> Result<f64> {
    Ok(-minimize_functional_with(space, &-expr, assumptions, solver, settings)?)
}

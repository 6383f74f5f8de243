//! End-to-end tests against the Clarabel backend.
//!
//! Covers maximum-entropy splits, independence, bound queries and
//! infeasibility reporting.

use boolprob_rs::backend::ClarabelSolver;
use boolprob_rs::constraint::{at_most, ConditionalProbability, Constraint};
use boolprob_rs::error::Error;
use boolprob_rs::expr::probability;
use boolprob_rs::problem::{maximize_functional, maximum_entropy, minimize_functional};
use boolprob_rs::space::AtomSpace;
use boolprob_rs::types::Atom;

const TOL: f64 = 1e-4;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOL,
        "expected {expected}, got {actual}"
    );
}

// ─── Maximum entropy ───────────────────────────────────────────────────────────

#[test]
fn uniform_without_assumptions() {
    let mut space = AtomSpace::new(3).unwrap();
    maximum_entropy(&mut space, &[], &ClarabelSolver).unwrap();

    let distribution = space.distribution().unwrap();
    assert_eq!(distribution.len(), 8);
    for &p in distribution {
        assert_close(p, 0.125);
    }
}

#[test]
fn binary_split() {
    let mut space = AtomSpace::new(1).unwrap();
    let x0 = space.var(0).unwrap().is_true().unwrap();
    let assumptions = [Constraint::equal_to(&probability(&x0), 0.3).unwrap()];

    maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap();

    let distribution = space.distribution().unwrap();
    let t = Atom::from_assignment(&[true]).index();
    let f = Atom::from_assignment(&[false]).index();
    assert_close(distribution[t], 0.3);
    assert_close(distribution[f], 0.7);
}

#[test]
fn marginals_give_product_distribution() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let assumptions = [
        Constraint::equal_to(&probability(&x[0]), 0.4).unwrap(),
        Constraint::equal_to(&probability(&x[1]), 0.3).unwrap(),
    ];

    maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap();

    let both = x[0].and(&x[1]).unwrap();
    assert_close(space.probability_of(&both).unwrap(), 0.12);
    for constraint in &assumptions {
        assert!(constraint.is_satisfied(&space, TOL).unwrap());
    }
}

#[test]
fn conditioning_on_independent_variable() {
    let mut space = AtomSpace::new(2).unwrap();
    let x0 = space.var(0).unwrap();
    let x1 = space.var(1).unwrap();
    let a = x0.is_true().unwrap();
    let b = x1.is_true().unwrap();

    // P(b | a) == P(b | !a) makes the two variables independent.
    let assumptions = [
        Constraint::equal_to(&probability(&a), 0.4).unwrap(),
        ConditionalProbability::new(&b, &a).unwrap().equal_to(0.3).unwrap(),
        ConditionalProbability::new(&b, &a.not()).unwrap().equal_to(0.3).unwrap(),
    ];

    maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap();

    let given = ConditionalProbability::new(&b, &a).unwrap().evaluate(&space).unwrap();
    assert_close(given, space.probability_of(&b).unwrap());
    assert_close(given, 0.3);
}

#[test]
fn conditional_bounds_are_respected() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let cond = ConditionalProbability::new(&x[1], &x[0]).unwrap();
    let assumptions = [
        Constraint::at_least(&probability(&x[0]), 0.5).unwrap(),
        cond.at_most(0.2).unwrap(),
    ];

    maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap();

    assert!(cond.evaluate(&space).unwrap() <= 0.2 + TOL);
    assert!(space.probability_of(&x[0]).unwrap() >= 0.5 - TOL);
}

// ─── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn frechet_bounds_on_conjunction() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let assumptions = [
        Constraint::equal_to(&probability(&x[0]), 0.6).unwrap(),
        Constraint::equal_to(&probability(&x[1]), 0.7).unwrap(),
    ];
    let both = probability(&x[0].and(&x[1]).unwrap());

    let lower = minimize_functional(&mut space, &both, &assumptions, &ClarabelSolver).unwrap();
    assert_close(lower, 0.3);
    assert_close(both.value(&space).unwrap(), lower);

    let upper = maximize_functional(&mut space, &both, &assumptions, &ClarabelSolver).unwrap();
    assert_close(upper, 0.6);
}

#[test]
fn maximize_is_negated_minimize() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let expr = 2.0 * probability(&x[0]) - probability(&x[1].not());
    let assumptions = [at_most(&probability(&x[0]), &probability(&x[1])).unwrap()];

    let max = maximize_functional(&mut space, &expr, &assumptions, &ClarabelSolver).unwrap();
    let min = minimize_functional(&mut space, &-expr.clone(), &assumptions, &ClarabelSolver).unwrap();
    assert_eq!(max, -min);
}

// ─── Failures ──────────────────────────────────────────────────────────────────

#[test]
fn contradictory_assumptions_are_infeasible() {
    let mut space = AtomSpace::new(1).unwrap();
    let x0 = space.var(0).unwrap().is_true().unwrap();
    let p = probability(&x0);
    let assumptions = [
        Constraint::equal_to(&p, 0.6).unwrap(),
        Constraint::equal_to(&p, 0.2).unwrap(),
    ];

    let err = minimize_functional(&mut space, &p, &assumptions, &ClarabelSolver).unwrap_err();
    assert_eq!(err, Error::Infeasible { assumptions: assumptions.to_vec() });
    assert!(!space.is_solved());

    let err = maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap_err();
    assert_eq!(err, Error::Infeasible { assumptions: assumptions.to_vec() });
    assert!(space.distribution().is_none());
}

#[test]
fn conditioning_on_impossible_event() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let assumptions = [Constraint::equal_to(&probability(&x[0]), 0.0).unwrap()];
    let cond = ConditionalProbability::new(&x[1], &x[0]).unwrap();

    assert_eq!(cond.evaluate(&space), Err(Error::Undefined));

    minimize_functional(&mut space, &probability(&x[1]), &assumptions, &ClarabelSolver).unwrap();
    assert_eq!(cond.evaluate_within(&space, TOL), Err(Error::DivisionByZero));
    assert_eq!(cond.evaluate(&space), Err(Error::DivisionByZero));
}

#[test]
fn conditioning_on_impossible_event_after_maximum_entropy() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let assumptions = [Constraint::equal_to(&probability(&x[0]), 0.0).unwrap()];

    maximum_entropy(&mut space, &assumptions, &ClarabelSolver).unwrap();

    let p = space.probability_of(&x[0]).unwrap();
    assert!((0.0..TOL).contains(&p), "P(x0) = {p}");
    let cond = ConditionalProbability::new(&x[1], &x[0]).unwrap();
    assert_eq!(cond.evaluate(&space), Err(Error::DivisionByZero));
    // Conditioning on the complement is well defined.
    let complement = ConditionalProbability::new(&x[1], &x[0].not()).unwrap();
    assert_close(complement.evaluate(&space).unwrap(), 0.5);
}

#[test]
fn reads_stay_within_unit_interval() {
    let mut space = AtomSpace::new(2).unwrap();
    let x = space.variables();
    let assumptions = [Constraint::equal_to(&probability(&x[0]), 0.6).unwrap()];
    let both = probability(&x[0].and(&x[1]).unwrap());

    minimize_functional(&mut space, &both, &assumptions, &ClarabelSolver).unwrap();

    let (a, b) = (&x[0], &x[1]);
    let events = [
        a.and(b).unwrap(),
        a.and(&b.not()).unwrap(),
        a.not().and(b).unwrap(),
        a.not().and(&b.not()).unwrap(),
        a.or(b).unwrap(),
    ];
    for event in &events {
        let p = space.probability_of(event).unwrap();
        assert!((0.0..=1.0).contains(&p), "{event:?}: {p}");
    }
}

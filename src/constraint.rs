//! Linear constraints over the distribution vector ("assumptions").
//!
//! Constraints are built with explicit functions ([`equals`], [`at_most`],
//! [`at_least`], [`Constraint::equal_to`], ...) rather than comparison
//! operators. Every constraint is kept in the normalized form `expr ⋈ 0`.
//!
//! [`ConditionalProbability`] states bounds on `P(event | condition)` by
//! clearing the denominator: `P(event & condition) ⋈ k · P(condition)`.

use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::expr::{probability, LinearExpr};
use crate::space::{AtomSpace, SpaceId};

/// Solver-level relation between an expression and zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Eq => write!(f, "=="),
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
        }
    }
}

/// Caller-facing comparison operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Comparison {
    Eq,
    Le,
    Lt,
    Ge,
    Gt,
}

impl Comparison {
    /// Lowers the comparison to a solver relation.
    ///
    /// Strict comparisons become non-strict: the feasible set must be closed.
    pub fn relation(self) -> Relation {
        match self {
            Comparison::Eq => Relation::Eq,
            Comparison::Le => Relation::Le,
            Comparison::Ge => Relation::Ge,
            Comparison::Lt => {
                debug!("weakening strict '<' to '<='");
                Relation::Le
            }
            Comparison::Gt => {
                debug!("weakening strict '>' to '>='");
                Relation::Ge
            }
        }
    }
}

/// The constraint `expr ⋈ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    expr: LinearExpr,
    relation: Relation,
}

fn check_operand(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidComparisonOperand { value });
    }
    Ok(value)
}

fn relate(lhs: &LinearExpr, relation: Relation, rhs: &LinearExpr) -> Result<Constraint> {
    Ok(Constraint {
        expr: lhs.checked_sub(rhs)?,
        relation,
    })
}

/// `lhs == rhs`
pub fn equals(lhs: &LinearExpr, rhs: &LinearExpr) -> Result<Constraint> {
    relate(lhs, Relation::Eq, rhs)
}

/// `lhs <= rhs`
pub fn at_most(lhs: &LinearExpr, rhs: &LinearExpr) -> Result<Constraint> {
    relate(lhs, Relation::Le, rhs)
}

/// `lhs >= rhs`
pub fn at_least(lhs: &LinearExpr, rhs: &LinearExpr) -> Result<Constraint> {
    relate(lhs, Relation::Ge, rhs)
}

impl Constraint {
    /// `expr op value`
    pub fn compare(expr: &LinearExpr, op: Comparison, value: f64) -> Result<Constraint> {
        let value = check_operand(value)?;
        Ok(Constraint {
            expr: expr.offset(-value),
            relation: op.relation(),
        })
    }

    pub fn equal_to(expr: &LinearExpr, value: f64) -> Result<Constraint> {
        Self::compare(expr, Comparison::Eq, value)
    }

    pub fn at_most(expr: &LinearExpr, value: f64) -> Result<Constraint> {
        Self::compare(expr, Comparison::Le, value)
    }

    pub fn at_least(expr: &LinearExpr, value: f64) -> Result<Constraint> {
        Self::compare(expr, Comparison::Ge, value)
    }

    pub fn space(&self) -> SpaceId {
        self.expr.space()
    }

    /// The normalized left-hand side; the right-hand side is always zero.
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Checks the constraint against a solved space, up to `tolerance`.
    pub fn is_satisfied(&self, space: &AtomSpace, tolerance: f64) -> Result<bool> {
        let value = self.expr.value(space)?;
        Ok(match self.relation {
            Relation::Eq => value.abs() <= tolerance,
            Relation::Le => value <= tolerance,
            Relation::Ge => value >= -tolerance,
        })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (atom, &c) in self.expr.coefficients().iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}*p[{}]", c, atom)?;
            first = false;
        }
        if first || self.expr.constant_term() != 0.0 {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}", self.expr.constant_term())?;
        }
        write!(f, " {} 0", self.relation)
    }
}

/// `P(event | condition)`, usable in comparisons against a scalar.
#[derive(Debug, Clone)]
pub struct ConditionalProbability {
    event: Event,
    condition: Event,
}

impl ConditionalProbability {
    /// Probabilities at or below this magnitude count as zero when dividing.
    pub const ZERO_PROBABILITY: f64 = 1e-12;

    pub fn new(event: &Event, condition: &Event) -> Result<Self> {
        if event.space() != condition.space() {
            return Err(Error::IncompatibleEvents {
                left: event.space(),
                right: condition.space(),
            });
        }
        Ok(Self {
            event: event.clone(),
            condition: condition.clone(),
        })
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn condition(&self) -> &Event {
        &self.condition
    }

    /// `P(event & condition)`
    pub fn numerator(&self) -> Result<LinearExpr> {
        Ok(probability(&self.event.and(&self.condition)?))
    }

    /// `P(condition)`
    pub fn denominator(&self) -> LinearExpr {
        probability(&self.condition)
    }

    /// Builds `P(event & condition) op value · P(condition)`.
    pub fn compare(&self, op: Comparison, value: f64) -> Result<Constraint> {
        let value = check_operand(value)?;
        let lhs = self.numerator()?;
        let rhs = self.denominator().scale(value);
        relate(&lhs, op.relation(), &rhs)
    }

    pub fn equal_to(&self, value: f64) -> Result<Constraint> {
        self.compare(Comparison::Eq, value)
    }

    pub fn at_most(&self, value: f64) -> Result<Constraint> {
        self.compare(Comparison::Le, value)
    }

    pub fn at_least(&self, value: f64) -> Result<Constraint> {
        self.compare(Comparison::Ge, value)
    }

    /// Reads `P(event & condition) / P(condition)` from a solved space.
    ///
    /// A condition whose mass is within the tolerance of the solve that produced
    /// the distribution (and never below [`ZERO_PROBABILITY`][Self::ZERO_PROBABILITY])
    /// counts as impossible and yields [`Error::DivisionByZero`].
    pub fn evaluate(&self, space: &AtomSpace) -> Result<f64> {
        let zero = space.tolerance().unwrap_or(0.0).max(Self::ZERO_PROBABILITY);
        self.evaluate_within(space, zero)
    }

    /// Like [`evaluate`][Self::evaluate], treating `|P(condition)| <= zero` as zero.
    pub fn evaluate_within(&self, space: &AtomSpace, zero: f64) -> Result<f64> {
        let numerator = self.numerator()?.value(space)?;
        let denominator = self.denominator().value(space)?;
        if denominator.abs() <= zero {
            return Err(Error::DivisionByZero);
        }
        Ok(numerator / denominator)
    }
}

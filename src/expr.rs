//! Linear functionals of the distribution vector.
//!
//! A [`LinearExpr`] is `c · p + k` where `p` is the (possibly unresolved)
//! distribution of one atom space. [`probability`] turns an event into the
//! expression `p · indicator`. Before a solve these expressions are used to
//! state constraints and objectives; after a solve [`LinearExpr::value`]
//! reads the concrete number.

use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::event::Event;
use crate::space::{AtomSpace, SpaceId};

#[derive(Debug, Clone, PartialEq)]
pub struct LinearExpr {
    space: SpaceId,
    coefficients: Vec<f64>,
    constant: f64,
}

/// Probability of `event`: the dot product of the distribution with its indicator.
pub fn probability(event: &Event) -> LinearExpr {
    LinearExpr {
        space: event.space(),
        coefficients: event.indicator().to_weights(),
        constant: 0.0,
    }
}

impl LinearExpr {
    /// The constant expression `value` over `space`.
    pub fn constant(space: &AtomSpace, value: f64) -> Self {
        Self {
            space: space.id(),
            coefficients: vec![0.0; space.atom_count()],
            constant: value,
        }
    }

    /// The expression `Σ weights[a] · p[a]`.
    pub fn weighted(space: &AtomSpace, weights: Vec<f64>) -> Self {
        assert_eq!(weights.len(), space.atom_count(), "One weight per atom is required");
        Self {
            space: space.id(),
            coefficients: weights,
            constant: 0.0,
        }
    }

    pub fn space(&self) -> SpaceId {
        self.space
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    fn check_compatible(&self, other: &LinearExpr) -> Result<()> {
        if self.space != other.space {
            return Err(Error::IncompatibleEvents {
                left: self.space,
                right: other.space,
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &LinearExpr) -> Result<LinearExpr> {
        self.check_compatible(other)?;
        Ok(LinearExpr {
            space: self.space,
            coefficients: self.coefficients.iter().zip(&other.coefficients).map(|(a, b)| a + b).collect(),
            constant: self.constant + other.constant,
        })
    }

    pub fn checked_sub(&self, other: &LinearExpr) -> Result<LinearExpr> {
        self.checked_add(&-other)
    }

    pub fn scale(&self, factor: f64) -> LinearExpr {
        LinearExpr {
            space: self.space,
            coefficients: self.coefficients.iter().map(|c| c * factor).collect(),
            constant: self.constant * factor,
        }
    }

    /// Returns the expression with `delta` added to its constant term.
    pub fn offset(&self, delta: f64) -> LinearExpr {
        LinearExpr {
            space: self.space,
            coefficients: self.coefficients.clone(),
            constant: self.constant + delta,
        }
    }

    /// Evaluates the expression against an explicit vector.
    pub fn evaluate_at(&self, x: &[f64]) -> f64 {
        assert_eq!(x.len(), self.coefficients.len(), "Vector length must match the atom count");
        self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>() + self.constant
    }

    /// Evaluates the expression against the solved distribution of `space`.
    ///
    /// The distribution is read as stored, so a probability can land outside
    /// `[0, 1]` by up to the solve tolerance.
    pub fn value(&self, space: &AtomSpace) -> Result<f64> {
        space.check_owns(self.space)?;
        let distribution = space.distribution().ok_or(Error::Undefined)?;
        Ok(self.evaluate_at(distribution))
    }
}

impl Neg for &LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

// The operator forms treat a space mismatch as a programming error.
impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match self.checked_add(&rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.checked_sub(&rhs) {
            Ok(diff) => diff,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<LinearExpr> for f64 {
    type Output = LinearExpr;

    fn mul(self, rhs: LinearExpr) -> Self::Output {
        rhs.scale(self)
    }
}

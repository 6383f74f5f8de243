//! # boolprob-rs: Joint distributions of boolean variables
//!
//! **`boolprob-rs`** models the full joint distribution of `n` boolean random variables
//! as one non-negative vector with an entry per joint assignment ("atom"), and turns
//! statements about events into linear constraints for a convex solver.
//!
//! Given a set of assumptions, it can compute:
//!
//! - the **maximum-entropy** distribution consistent with them, and
//! - the **minimal** or **maximal** value of any linear functional of the distribution,
//!   e.g. the tightest bounds on `P(A | B)` implied by what you know.
//!
//! ## Key Features
//!
//! - **Atom-indexed vector**: atom `a` stores variable `i` at bit weight `2^(n-i-1)`;
//!   a clear bit means `true` (see [`types::Atom`]).
//! - **Event algebra**: events are bit-packed [`Indicator`][crate::indicator::Indicator] masks,
//!   closed under AND, OR, NOT and equality, and tagged with the space they belong to.
//! - **Explicit constraint builders**: no overloaded comparison operators; assumptions are built
//!   with [`Constraint::equal_to`][crate::constraint::Constraint::equal_to],
//!   [`constraint::at_most`] and friends.
//! - **Pluggable solver**: problems are handed to a [`Solver`][crate::solver::Solver];
//!   the default backend uses Clarabel's exponential cones for entropy.
//!
//! ## Basic Usage
//!
//! ```rust
//! use boolprob_rs::backend::ClarabelSolver;
//! use boolprob_rs::constraint::{Constraint, ConditionalProbability};
//! use boolprob_rs::expr::probability;
//! use boolprob_rs::problem::{maximize_functional, maximum_entropy};
//! use boolprob_rs::space::AtomSpace;
//!
//! # fn main() -> boolprob_rs::error::Result<()> {
//! // 1. Two variables: rain and wet grass
//! let mut space = AtomSpace::new(2)?;
//! let rain = space.var(0)?.is_true()?;
//! let wet = space.var(1)?.is_true()?;
//!
//! // 2. State what we know
//! let assumptions = [
//!     Constraint::equal_to(&probability(&rain), 0.3)?,
//!     ConditionalProbability::new(&wet, &rain)?.equal_to(0.9)?,
//! ];
//!
//! // 3. Least-informative distribution
//! maximum_entropy(&mut space, &assumptions, &ClarabelSolver)?;
//! let p_wet = space.probability_of(&wet)?;
//! assert!(p_wet > 0.27 - 1e-4);
//!
//! // 4. Tightest upper bound on P(wet)
//! let upper = maximize_functional(&mut space, &probability(&wet), &assumptions, &ClarabelSolver)?;
//! assert!((upper - 0.97).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Components
//!
//! - **[`space`]**: the [`AtomSpace`][crate::space::AtomSpace] owning the distribution.
//! - **[`event`]**, **[`indexer`]**: building events from variables.
//! - **[`expr`]**, **[`constraint`]**: probabilities, conditional probabilities, assumptions.
//! - **[`problem`]**: the three canonical problems.
//! - **[`solver`]**, **[`backend`]**: the solver boundary and the Clarabel backend.

pub mod backend;
pub mod constraint;
pub mod error;
pub mod event;
pub mod expr;
pub mod indexer;
pub mod indicator;
pub mod problem;
pub mod solver;
pub mod space;
pub mod types;

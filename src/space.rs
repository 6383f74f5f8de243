//! Atom spaces: the joint distribution of `n` boolean variables.
//!
//! An [`AtomSpace`] owns the distribution vector, one probability mass per atom
//! (see [`Atom`] for the indexing convention). The vector stays unresolved until
//! a problem is solved through the space; after that it holds the solver's
//! answer and can be queried with [`AtomSpace::probability_of`] or
//! [`LinearExpr::value`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::expr::{probability, LinearExpr};
use crate::indexer::{variable_mask, VariableIndexer};
use crate::indicator::Indicator;
use crate::types::Atom;

static NEXT_SPACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an atom space.
///
/// Events and expressions refer back to their space through this id,
/// never by owning or borrowing the space itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SpaceId(u64);

impl SpaceId {
    fn fresh() -> Self {
        SpaceId(NEXT_SPACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct AtomSpace {
    id: SpaceId,
    name: Option<String>,
    variable_count: usize,
    distribution: Option<Vec<f64>>,
    tolerance: f64,
}

impl AtomSpace {
    /// Largest supported number of variables.
    pub const MAX_VARIABLES: usize = 20;

    /// Creates a space over `variable_count` boolean variables.
    ///
    /// The distribution has `2^variable_count` entries and is unresolved until solved.
    pub fn new(variable_count: usize) -> Result<Self> {
        if variable_count == 0 || variable_count > Self::MAX_VARIABLES {
            return Err(Error::InvalidDimension {
                count: variable_count,
                max: Self::MAX_VARIABLES,
            });
        }
        let id = SpaceId::fresh();
        debug!("new atom space {} with {} variables", id, variable_count);
        Ok(Self {
            id,
            name: None,
            variable_count,
            distribution: None,
            tolerance: 0.0,
        })
    }

    /// Creates a named space. The name only shows up in formatting and logs.
    pub fn named(variable_count: usize, name: impl Into<String>) -> Result<Self> {
        let mut space = Self::new(variable_count)?;
        space.name = Some(name.into());
        Ok(space)
    }

    pub fn id(&self) -> SpaceId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Number of atoms, i.e. the length of the distribution vector.
    pub fn atom_count(&self) -> usize {
        1 << self.variable_count
    }

    pub fn atoms(&self) -> impl Iterator<Item = Atom> {
        (0..self.atom_count()).map(Atom::new)
    }

    /// Returns the solved distribution, or `None` before the first successful solve.
    pub fn distribution(&self) -> Option<&[f64]> {
        self.distribution.as_deref()
    }

    pub fn is_solved(&self) -> bool {
        self.distribution.is_some()
    }

    /// Tolerance of the solve that produced the current distribution.
    ///
    /// Entries may deviate from the exact optimum by about this much, so masses
    /// at or below it are indistinguishable from zero.
    pub fn tolerance(&self) -> Option<f64> {
        self.distribution.as_ref().map(|_| self.tolerance)
    }

    /// Forgets the solved distribution.
    pub fn reset(&mut self) {
        self.distribution = None;
    }

    pub(crate) fn store(&mut self, distribution: Vec<f64>, tolerance: f64) {
        assert_eq!(
            distribution.len(),
            self.atom_count(),
            "Solved vector must have one entry per atom"
        );
        self.distribution = Some(distribution);
        self.tolerance = tolerance;
    }

    /// Returns an indexer for variable `index`.
    pub fn var(&self, index: usize) -> Result<VariableIndexer> {
        VariableIndexer::new(self, index)
    }

    /// Returns the mask of atoms where variable `index` has the given truth value.
    pub fn indicator_for(&self, index: usize, truth_value: bool) -> Result<Indicator> {
        self.check_index(index)?;
        Ok(variable_mask(self.variable_count, index, truth_value))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.variable_count {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.variable_count,
            });
        }
        Ok(())
    }

    /// Returns the event "variable `i` is true" for every variable.
    pub fn variables(&self) -> Vec<Event> {
        (0..self.variable_count)
            .map(|i| Event::new(self.id, variable_mask(self.variable_count, i, true)))
            .collect()
    }

    /// The event containing every atom.
    pub fn certain(&self) -> Event {
        Event::new(self.id, Indicator::full(self.atom_count()))
    }

    /// The event containing no atom.
    pub fn impossible(&self) -> Event {
        Event::new(self.id, Indicator::empty(self.atom_count()))
    }

    /// The sum of the distribution vector, as a linear expression.
    pub fn total(&self) -> LinearExpr {
        probability(&self.certain())
    }

    /// Reads the solved probability of `event`, clamped to `[0, 1]`.
    ///
    /// The stored distribution is left as the solver returned it; see [`LinearExpr::value`]
    /// for the unclamped read.
    pub fn probability_of(&self, event: &Event) -> Result<f64> {
        Ok(probability(event).value(self)?.clamp(0.0, 1.0))
    }

    pub(crate) fn check_owns(&self, space: SpaceId) -> Result<()> {
        if space != self.id {
            return Err(Error::IncompatibleEvents {
                left: self.id,
                right: space,
            });
        }
        Ok(())
    }
}

impl fmt::Display for AtomSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "AtomSpace({}, {:?})", self.variable_count, name),
            None => write!(f, "AtomSpace({})", self.variable_count),
        }
    }
}

impl fmt::Debug for AtomSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomSpace")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("variable_count", &self.variable_count)
            .field("solved", &self.is_solved())
            .finish()
    }
}

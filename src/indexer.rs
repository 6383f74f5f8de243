//! Variable indexers: elementary events `x[i] == true`, `x[i] == false`, `x[i] == x[j]`.

use crate::error::{Error, Result};
use crate::event::Event;
use crate::indicator::Indicator;
use crate::space::{AtomSpace, SpaceId};

/// Mask of the atoms where variable `index` of `n` equals `truth_value`.
///
/// The raw bit of variable `index` sits at weight `2^(n - index - 1)`; a clear bit means true.
pub(crate) fn variable_mask(n: usize, index: usize, truth_value: bool) -> Indicator {
    let shift = n - index - 1;
    Indicator::from_fn(1 << n, |a| {
        let bit = (a >> shift) & 1;
        if truth_value {
            bit == 0
        } else {
            bit == 1
        }
    })
}

/// Handle for a single variable of an atom space, used to build elementary events.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VariableIndexer {
    space: SpaceId,
    variable_count: usize,
    index: usize,
}

/// Right-hand side of an elementary comparison `x[i] == ...`.
#[derive(Debug, Copy, Clone)]
pub enum Elementary {
    Truth(bool),
    Variable(VariableIndexer),
}

impl From<bool> for Elementary {
    fn from(value: bool) -> Self {
        Elementary::Truth(value)
    }
}

impl From<VariableIndexer> for Elementary {
    fn from(var: VariableIndexer) -> Self {
        Elementary::Variable(var)
    }
}

impl VariableIndexer {
    pub(crate) fn new(space: &AtomSpace, index: usize) -> Result<Self> {
        space.check_index(index)?;
        Ok(Self {
            space: space.id(),
            variable_count: space.variable_count(),
            index,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn space(&self) -> SpaceId {
        self.space
    }

    /// Builds the event `x[i] == other`.
    ///
    /// Comparing two variables yields "both true or both false". Both variables
    /// must come from the same space; otherwise the comparison is rejected.
    pub fn equals(&self, other: impl Into<Elementary>) -> Result<Event> {
        match other.into() {
            Elementary::Truth(value) => Ok(Event::new(
                self.space,
                variable_mask(self.variable_count, self.index, value),
            )),
            Elementary::Variable(other) => {
                if other.space != self.space {
                    return Err(Error::InvalidComparison {
                        reason: format!(
                            "x[{}] of space {} compared with x[{}] of space {}",
                            self.index, self.space, other.index, other.space
                        ),
                    });
                }
                let both_true = self.equals(true)?.and(&other.equals(true)?)?;
                let both_false = self.equals(false)?.and(&other.equals(false)?)?;
                both_true.or(&both_false)
            }
        }
    }

    pub fn is_true(&self) -> Result<Event> {
        self.equals(true)
    }

    pub fn is_false(&self) -> Result<Event> {
        self.equals(false)
    }

    pub fn agrees_with(&self, other: &VariableIndexer) -> Result<Event> {
        self.equals(*other)
    }
}

//! Events: sets of atoms.
//!
//! An [`Event`] is an indicator mask tagged with the id of the space it was
//! built from. Combinators never touch their operands; each returns a new event.
//! Binary combinators check that both operands come from the same space.

use std::ops::Not;

use crate::error::{Error, Result};
use crate::indicator::Indicator;
use crate::space::SpaceId;
use crate::types::Atom;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    space: SpaceId,
    indicator: Indicator,
}

impl Event {
    pub(crate) fn new(space: SpaceId, indicator: Indicator) -> Self {
        Self { space, indicator }
    }

    pub fn space(&self) -> SpaceId {
        self.space
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    fn check_compatible(&self, other: &Event) -> Result<()> {
        if self.space != other.space {
            return Err(Error::IncompatibleEvents {
                left: self.space,
                right: other.space,
            });
        }
        Ok(())
    }

    pub fn and(&self, other: &Event) -> Result<Event> {
        self.check_compatible(other)?;
        Ok(Event::new(self.space, self.indicator.and(&other.indicator)))
    }

    pub fn or(&self, other: &Event) -> Result<Event> {
        self.check_compatible(other)?;
        Ok(Event::new(self.space, self.indicator.or(&other.indicator)))
    }

    pub fn xor(&self, other: &Event) -> Result<Event> {
        self.check_compatible(other)?;
        Ok(Event::new(self.space, self.indicator.xor(&other.indicator)))
    }

    /// Atoms on which both events agree (both hold or both fail).
    pub fn equals(&self, other: &Event) -> Result<Event> {
        self.check_compatible(other)?;
        Ok(Event::new(self.space, self.indicator.iff(&other.indicator)))
    }

    /// `self => other`, i.e. `!self | other`.
    pub fn implies(&self, other: &Event) -> Result<Event> {
        self.not().or(other)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&self) -> Event {
        Event::new(self.space, self.indicator.not())
    }

    /// True if the event holds on every atom.
    pub fn is_certain(&self) -> bool {
        self.indicator.is_full()
    }

    /// True if the event holds on no atom.
    pub fn is_impossible(&self) -> bool {
        self.indicator.is_empty()
    }

    /// Number of atoms in the event.
    pub fn count(&self) -> usize {
        self.indicator.count()
    }

    pub fn atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.indicator.iter().map(Atom::new)
    }
}

impl Not for &Event {
    type Output = Event;

    fn not(self) -> Self::Output {
        Event::not(self)
    }
}

impl Not for Event {
    type Output = Event;

    fn not(self) -> Self::Output {
        Event::not(&self)
    }
}

//! Type-safe wrapper for atoms.
//!
//! An atom is one complete truth assignment to all `n` variables of an atom
//! space, identified by its position in the distribution vector.
use std::fmt;

/// An atom index in `[0, 2^n)`.
///
/// # Encoding
///
/// Variable `i` is stored at bit weight `2^(n - i - 1)`, so variable 0 is the
/// most significant of the `n` used bits. A **clear** bit means the variable is
/// assigned `true`, a set bit means `false`. Atom 0 is therefore the all-true
/// assignment and atom `2^n - 1` the all-false one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Atom(usize);

impl Atom {
    pub fn new(index: usize) -> Self {
        Atom(index)
    }

    /// Returns the position of this atom in the distribution vector.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the raw bit stored for variable `var` in a space of `n` variables.
    pub fn bit(self, var: usize, n: usize) -> bool {
        debug_assert!(var < n);
        (self.0 >> (n - var - 1)) & 1 == 1
    }

    /// Returns the truth value this atom assigns to variable `var`.
    pub fn value_of(self, var: usize, n: usize) -> bool {
        !self.bit(var, n)
    }

    /// Returns the full assignment, variable 0 first.
    pub fn assignment(self, n: usize) -> Vec<bool> {
        (0..n).map(|var| self.value_of(var, n)).collect()
    }

    /// Builds the atom for a full assignment, variable 0 first.
    pub fn from_assignment(values: &[bool]) -> Self {
        let index = values.iter().fold(0, |acc, &value| (acc << 1) | usize::from(!value));
        Atom(index)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

impl From<Atom> for usize {
    fn from(atom: Atom) -> Self {
        atom.0
    }
}

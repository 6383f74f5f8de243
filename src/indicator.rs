//! Bit-packed indicator masks over atoms.
//!
//! An [`Indicator`] marks which atoms of an atom space belong to an event.
//! It has a fixed length (the number of atoms) and is backed by `u64` words.
//! Bits past the logical length are always kept clear, so word-level
//! comparisons and population counts are exact.

use std::fmt;

/// A fixed-length bit vector, one bit per atom.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Indicator {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Number of atoms covered
    len: usize,
}

impl Indicator {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates a mask of length `len` with no atoms set.
    pub fn empty(len: usize) -> Self {
        let num_words = len.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            len,
        }
    }

    /// Creates a mask of length `len` with every atom set.
    pub fn full(len: usize) -> Self {
        let mut mask = Self {
            words: vec![u64::MAX; len.div_ceil(Self::BITS_PER_WORD)],
            len,
        };
        mask.clear_tail();
        mask
    }

    /// Creates a mask of length `len` by evaluating `f` on every atom index.
    pub fn from_fn(len: usize, f: impl Fn(usize) -> bool) -> Self {
        let mut mask = Self::empty(len);
        for index in 0..len {
            if f(index) {
                mask.set(index);
            }
        }
        mask
    }

    /// Returns the number of atoms covered (the mask length, not the set count).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no atom is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns true if every atom is set.
    pub fn is_full(&self) -> bool {
        self.count() == self.len
    }

    /// Returns the number of set atoms.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    /// Returns true if the atom at the given index is set.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    #[inline]
    fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        self.words[word_idx] |= 1u64 << bit_idx;
    }

    /// Zeroes the unused bits of the last word.
    fn clear_tail(&mut self) {
        let used = self.len % Self::BITS_PER_WORD;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    fn zip_with(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        assert_eq!(self.len, other.len, "Indicator lengths must match");
        let words = self.words.iter().zip(&other.words).map(|(&a, &b)| op(a, b)).collect();
        let mut mask = Self { words, len: self.len };
        mask.clear_tail();
        mask
    }

    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn or(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Elementwise equality: set where both masks agree.
    pub fn iff(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| !(a ^ b))
    }

    pub fn not(&self) -> Self {
        let mut mask = Self {
            words: self.words.iter().map(|&w| !w).collect(),
            len: self.len,
        };
        mask.clear_tail();
        mask
    }

    /// Returns the mask as a 0/1 weight vector.
    pub fn to_weights(&self) -> Vec<f64> {
        (0..self.len).map(|i| if self.contains(i) { 1.0 } else { 0.0 }).collect()
    }

    /// Returns an iterator over all set atom indices.
    pub fn iter(&self) -> IndicatorIter<'_> {
        IndicatorIter {
            indicator: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl fmt::Debug for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Indicator(")?;
        for i in 0..self.len {
            write!(f, "{}", if self.contains(i) { '1' } else { '0' })?;
        }
        write!(f, ")")
    }
}

/// Iterator over set atoms in an [`Indicator`].
pub struct IndicatorIter<'a> {
    indicator: &'a Indicator,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for IndicatorIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * Indicator::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.indicator.words.len() {
                return None;
            }
            self.current_word = self.indicator.words[self.word_idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_empty_and_full() {
        let empty = Indicator::empty(100);
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
        assert_eq!(empty.len(), 100);

        let full = Indicator::full(100);
        assert!(full.is_full());
        assert_eq!(full.count(), 100);
        assert!(!full.contains(100));
    }

    #[test]
    fn test_not_keeps_tail_clear() {
        let mask = Indicator::from_fn(70, |i| i % 3 == 0);
        let negated = mask.not();
        assert_eq!(mask.count() + negated.count(), 70);
        assert!(mask.or(&negated).is_full());
        assert!(mask.and(&negated).is_empty());
        assert_eq!(negated.not(), mask);
    }

    #[test]
    fn test_iff() {
        let a = Indicator::from_fn(4, |i| i < 2);
        let b = Indicator::from_fn(4, |i| i % 2 == 0);
        let eq = a.iff(&b);
        assert_eq!(eq.iter().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(eq, a.xor(&b).not());
    }

    #[test]
    fn test_iter() {
        let mask = Indicator::from_fn(130, |i| matches!(i, 3 | 5 | 10 | 64 | 129));
        let indices: Vec<_> = mask.iter().collect();
        assert_eq!(indices, vec![3, 5, 10, 64, 129]);
    }

    #[test]
    fn test_to_weights() {
        let mask = Indicator::from_fn(4, |i| i == 1 || i == 2);
        assert_eq!(mask.to_weights(), vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "Indicator lengths must match")]
    fn test_length_mismatch_panics() {
        Indicator::empty(4).and(&Indicator::empty(8));
    }
}

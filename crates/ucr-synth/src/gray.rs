//! Reflected binary Gray code.
//!
//! Codeword `i` of width `k` is `i ^ (i >> 1)`. Bit positions are numbered
//! from the most significant bit, i.e. position 0 is the leftmost character
//! of the printed codeword. That numbering is what maps a flipped bit to a
//! control qubit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};

/// Widest codeword supported.
pub const MAX_WIDTH: u32 = 63;

/// One codeword of a reflected binary Gray code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrayCodeword {
    bits: u64,
    width: u32,
}

impl GrayCodeword {
    /// The `index`-th codeword of width `width`.
    ///
    /// `index` is reduced modulo `2^width`, so `nth(width, 2^width)` is the
    /// all-zero codeword again. Fails with [`SynthError::InvalidWidth`] above
    /// [`MAX_WIDTH`].
    pub fn nth(width: u32, index: u64) -> SynthResult<Self> {
        check_width(width)?;
        Ok(Self::nth_unchecked(width, index))
    }

    fn nth_unchecked(width: u32, index: u64) -> Self {
        let mask = (1u64 << width) - 1;
        let i = index & mask;
        Self {
            bits: i ^ (i >> 1),
            width,
        }
    }

    /// Number of bits.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raw value, least significant bit rightmost.
    #[inline]
    pub fn value(&self) -> u64 {
        self.bits
    }

    /// Bit at `position`, counted from the most significant bit.
    #[inline]
    pub fn bit(&self, position: u32) -> bool {
        position < self.width && (self.bits >> (self.width - 1 - position)) & 1 == 1
    }

    /// All bits, most significant first.
    pub fn to_bits(&self) -> Vec<bool> {
        (0..self.width).map(|p| self.bit(p)).collect()
    }
}

impl fmt::Display for GrayCodeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in 0..self.width {
            f.write_str(if self.bit(p) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

fn check_width(width: u32) -> SynthResult<()> {
    if width > MAX_WIDTH {
        return Err(SynthError::InvalidWidth {
            width,
            max: MAX_WIDTH,
        });
    }
    Ok(())
}

/// The full Gray code of width `width`: `2^width` codewords starting at zero.
pub fn generate(width: u32) -> SynthResult<Vec<GrayCodeword>> {
    check_width(width)?;
    Ok((0..1u64 << width)
        .map(|i| GrayCodeword::nth_unchecked(width, i))
        .collect())
}

/// Position of the single bit in which two codewords differ.
///
/// Fails with [`SynthError::InvalidTransition`] unless the codewords have
/// the same width and differ in exactly one bit.
pub fn diff_bit(a: GrayCodeword, b: GrayCodeword) -> SynthResult<u32> {
    let flipped = a.bits ^ b.bits;
    if a.width != b.width || flipped.count_ones() != 1 {
        return Err(SynthError::InvalidTransition {
            from: a.to_string(),
            to: b.to_string(),
        });
    }
    Ok(a.width - 1 - flipped.trailing_zeros())
}

/// Cyclic walk over a Gray code.
///
/// Yields, for every step `i` in `0..2^width`, the position flipped between
/// codeword `i` and codeword `(i + 1) mod 2^width`.
#[derive(Debug, Clone)]
pub struct GrayWalk {
    width: u32,
    step: u64,
    len: u64,
}

impl GrayWalk {
    /// Walk the full cycle of the Gray code of width `width`.
    ///
    /// Width 0 has a single codeword and no transitions, so the walk is
    /// empty.
    pub fn new(width: u32) -> SynthResult<Self> {
        check_width(width)?;
        let len = if width == 0 { 0 } else { 1u64 << width };
        Ok(Self {
            width,
            step: 0,
            len,
        })
    }

    /// Number of codewords in the cycle.
    #[inline]
    pub fn cycle_len(&self) -> u64 {
        1u64 << self.width
    }
}

impl Iterator for GrayWalk {
    type Item = (GrayCodeword, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.len {
            return None;
        }
        let current = GrayCodeword::nth_unchecked(self.width, self.step);
        self.step += 1;
        // Step i flips bit trailing_zeros(i + 1) from the right; the wrap from
        // the last codeword back to zero flips the leftmost bit.
        let from_right = self.step.trailing_zeros().min(self.width - 1);
        Some((current, self.width - 1 - from_right))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.len - self.step).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GrayWalk {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_width_three() {
        let code: Vec<String> = generate(3).unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(
            code,
            vec!["000", "001", "011", "010", "110", "111", "101", "100"]
        );
    }

    #[test]
    fn test_generate_width_zero() {
        let code = generate(0).unwrap();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].to_string(), "");
    }

    #[test]
    fn test_bit_numbering_from_msb() {
        let word = GrayCodeword::nth(3, 4).unwrap(); // 110
        assert_eq!(word.to_bits(), vec![true, true, false]);
        assert!(word.bit(0));
        assert!(!word.bit(2));
        assert!(!word.bit(7));
    }

    #[test]
    fn test_diff_bit() {
        let a = GrayCodeword::nth(3, 0).unwrap(); // 000
        let b = GrayCodeword::nth(3, 1).unwrap(); // 001
        assert_eq!(diff_bit(a, b).unwrap(), 2);

        let c = GrayCodeword::nth(3, 3).unwrap(); // 010
        let d = GrayCodeword::nth(3, 4).unwrap(); // 110
        assert_eq!(diff_bit(c, d).unwrap(), 0);

        // Wrap-around from 100 back to 000
        let last = GrayCodeword::nth(3, 7).unwrap();
        assert_eq!(diff_bit(last, a).unwrap(), 0);
    }

    #[test]
    fn test_diff_bit_rejects_non_adjacent() {
        let a = GrayCodeword::nth(3, 0).unwrap();
        let err = diff_bit(a, GrayCodeword::nth(3, 2).unwrap()).unwrap_err(); // 000 vs 011
        assert_eq!(
            err,
            SynthError::InvalidTransition {
                from: "000".into(),
                to: "011".into()
            }
        );
        assert!(diff_bit(a, a).is_err());
        assert!(diff_bit(a, GrayCodeword::nth(2, 1).unwrap()).is_err());
    }

    #[test]
    fn test_walk_positions() {
        let positions: Vec<u32> = GrayWalk::new(3).unwrap().map(|(_, p)| p).collect();
        assert_eq!(positions, vec![2, 1, 2, 0, 2, 1, 2, 0]);
    }

    #[test]
    fn test_walk_empty_for_width_zero() {
        assert_eq!(GrayWalk::new(0).unwrap().count(), 0);
        assert_eq!(GrayWalk::new(0).unwrap().cycle_len(), 1);
    }

    #[test]
    fn test_walk_matches_diff_bit() {
        let code = generate(5).unwrap();
        for (i, (word, position)) in GrayWalk::new(5).unwrap().enumerate() {
            assert_eq!(word, code[i]);
            let following = code[(i + 1) % code.len()];
            assert_eq!(diff_bit(word, following).unwrap(), position);
        }
    }

    #[test]
    fn test_width_limit() {
        let err = SynthError::InvalidWidth {
            width: 64,
            max: MAX_WIDTH,
        };
        assert_eq!(GrayCodeword::nth(64, 0), Err(err.clone()));
        assert_eq!(generate(64), Err(err.clone()));
        assert_eq!(GrayWalk::new(64).unwrap_err(), err);

        let widest = GrayCodeword::nth(MAX_WIDTH, u64::MAX).unwrap();
        assert_eq!(widest.width(), MAX_WIDTH);
        let mut walk = GrayWalk::new(MAX_WIDTH).unwrap();
        assert_eq!(walk.next().map(|(_, p)| p), Some(MAX_WIDTH - 1));
    }

    #[test]
    fn test_walk_size_hint() {
        let mut walk = GrayWalk::new(4).unwrap();
        assert_eq!(walk.size_hint(), (16, Some(16)));
        walk.next();
        assert_eq!(walk.len(), 15);
    }
}

use crate::types::{Coord, File, Rank};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// A boolean mask over the 64 board squares.
///
/// This is the transient result type of every move or attack query: a
/// destination set is just the mask of squares the query selected. Masks are
/// produced fresh per query and never cached across moves.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);
    pub const FULL: SquareSet = SquareSet(u64::MAX);

    #[inline]
    pub const fn from_raw(val: u64) -> SquareSet {
        SquareSet(val)
    }

    #[inline]
    pub const fn from_coord(coord: Coord) -> SquareSet {
        SquareSet(1_u64 << coord.index())
    }

    #[inline]
    pub const fn with(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 | (1_u64 << coord.index()))
    }

    #[inline]
    pub const fn without(self, coord: Coord) -> SquareSet {
        SquareSet(self.0 & !(1_u64 << coord.index()))
    }

    #[inline]
    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    #[inline]
    pub fn unset(&mut self, coord: Coord) {
        *self = self.without(coord);
    }

    #[inline]
    pub const fn has(self, coord: Coord) -> bool {
        ((self.0 >> coord.index()) & 1) != 0
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Lowest-index square in the set, if any.
    #[inline]
    pub fn first(self) -> Option<Coord> {
        self.into_iter().next()
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "SquareSet({})", self)
    }
}

impl fmt::Display for SquareSet {
    /// Eight ranks top to bottom, separated by `/`, with `x` for a selected
    /// square and `.` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            for file in File::iter() {
                let ch = if self.has(Coord::from_parts(file, rank)) {
                    'x'
                } else {
                    '.'
                };
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        unsafe { Some(Coord::from_index_unchecked(bit as usize)) }
    }
}

impl IntoIterator for SquareSet {
    type Item = Coord;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> SquareSet {
        let mut res = SquareSet::EMPTY;
        for coord in iter {
            res.set(coord);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn set_and_test() {
        let mut s = SquareSet::EMPTY;
        assert!(s.is_empty());
        s.set(sq("e4"));
        s.set(sq("a8"));
        assert!(s.is_nonempty());
        assert_eq!(s.len(), 2);
        assert!(s.has(sq("e4")));
        assert!(s.has(sq("a8")));
        assert!(!s.has(sq("e5")));
        s.unset(sq("e4"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn iteration_order() {
        let s = SquareSet::EMPTY
            .with(sq("a4"))
            .with(sq("e2"))
            .with(sq("f3"));
        assert_eq!(
            s.into_iter().collect::<Vec<_>>(),
            vec![sq("a4"), sq("f3"), sq("e2")],
        );
        assert_eq!(s.first(), Some(sq("a4")));
        assert_eq!(SquareSet::EMPTY.first(), None);
    }

    #[test]
    fn bit_algebra() {
        let (a, b, c) = (sq("a4"), sq("e2"), sq("f3"));
        let s1 = SquareSet::EMPTY.with(a).with(b);
        let s2 = SquareSet::EMPTY.with(b).with(c);
        assert_eq!(s1 & s2, SquareSet::EMPTY.with(b));
        assert_eq!(s1 | s2, SquareSet::EMPTY.with(a).with(b).with(c));
        assert_eq!(s1 ^ s2, SquareSet::EMPTY.with(a).with(c));
        assert_eq!((!s1).len(), 62);
    }

    #[test]
    fn collect_roundtrip() {
        let coords = [sq("b2"), sq("g7"), sq("h1")];
        let s: SquareSet = coords.iter().copied().collect();
        assert_eq!(s.into_iter().collect::<Vec<_>>().len(), 3);
        for c in coords {
            assert!(s.has(c));
        }
    }

    #[test]
    fn format() {
        let s = SquareSet::EMPTY.with(sq("a8")).with(sq("h1"));
        assert_eq!(
            s.to_string(),
            "x......./......../......../......../......../......../......../.......x"
        );
    }
}

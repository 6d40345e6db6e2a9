/// Set of visited cells of the current partial path, packed into bits of a single integer.
///
/// Passed by value along the search recursion, so each branch works on its own copy
/// and backtracking needs no explicit bit clearing.
/// Changing the inner integer type changes [`VisitMask::CAPACITY`] without affecting algorithm logic.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitMask(u64);

impl VisitMask {
    /// Mask with no cell visited.
    pub const EMPTY: Self = Self(0);

    /// Maximal number of cells a mask can track.
    pub const CAPACITY: u32 = u64::BITS;

    /// Returns `true` if the bit of the given `cell` is set.
    #[inline(always)] pub fn contains(self, cell: u8) -> bool {
        self.0 & (1 << cell) != 0
    }

    /// Returns copy of `self` with the bit of the given `cell` set.
    #[inline(always)] pub fn with(self, cell: u8) -> Self {
        Self(self.0 | (1 << cell))
    }

    /// Sets the bit of the given `cell`.
    #[inline(always)] pub fn insert(&mut self, cell: u8) {
        self.0 |= 1 << cell;
    }

    /// Clears the bit of the given `cell`.
    #[inline(always)] pub fn remove(&mut self, cell: u8) {
        self.0 &= !(1 << cell);
    }

    /// Returns number of cells contained (popcount).
    #[inline(always)] pub fn len(self) -> u32 { self.0.count_ones() }

    /// Returns `true` if no cell is contained.
    #[inline(always)] pub fn is_empty(self) -> bool { self.0 == 0 }
}

impl std::fmt::Debug for VisitMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VisitMask({:#b})", self.0)
    }
}

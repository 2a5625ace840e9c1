//! Occupancy of the pixel rows of a single pixel column.
//!
//! Near a vertical asymptote, bisection could go on forever inside
//! one pixel column.  Once every pixel row between two values has
//! been visited, there is nothing more to draw there.  The rows
//! visited so far are recorded in a Fenwick tree (a.k.a. binary
//! indexed tree) so that "is this span fully covered?" is answered
//! in O(log n).

use crate::error::{Error, Result};

/// Fenwick tree over the 1-based indices `1 ..= n`.
#[derive(Debug, Clone)]
pub struct Fenwick {
    // `tree[0]` is unused.
    tree: Vec<i64>,
}

impl Fenwick {
    /// Tree of `n` zeros.
    pub fn new(n: usize) -> Self {
        Fenwick { tree: vec![0; n + 1] }
    }

    /// Number of indices.
    #[inline]
    pub fn len(&self) -> usize { self.tree.len() - 1 }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Add `delta` at position `index` ∈ \[1, n\].
    pub fn add(&mut self, index: usize, delta: i64) -> Result<()> {
        let n = self.len();
        if index < 1 || index > n {
            return Err(Error::IndexOutOfRange { index, len: n })
        }
        let mut i = index;
        while i <= n {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
        Ok(())
    }

    /// Sum of the values at positions `1 ..= index` with `index` ∈
    /// \[0, n\] (an empty sum for `0`).
    pub fn prefix_sum(&self, index: usize) -> Result<i64> {
        let n = self.len();
        if index > n {
            return Err(Error::IndexOutOfRange { index, len: n })
        }
        let mut i = index;
        let mut s = 0;
        while i >= 1 {
            s += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        Ok(s)
    }

    /// Sum of the values at positions `l ..= r` (with 1 ≤ `l`).
    pub fn range_sum(&self, l: usize, r: usize) -> Result<i64> {
        if l == 0 {
            return Err(Error::IndexOutOfRange { index: l, len: self.len() })
        }
        Ok(self.prefix_sum(r)? - self.prefix_sum(l - 1)?)
    }
}


/// Set of occupied rows `0 .. n` of a pixel column.
#[derive(Debug, Clone)]
pub struct OccupancyTable {
    fenwick: Fenwick,
}

impl OccupancyTable {
    /// Table with `n` free rows `0 .. n`.
    pub fn new(n: usize) -> Self {
        OccupancyTable { fenwick: Fenwick::new(n) }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize { self.fenwick.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.fenwick.is_empty() }

    /// Mark the (0-based) row `v` as occupied.  Occupying a row
    /// twice is the same as occupying it once.
    pub fn occupy(&mut self, v: usize) -> Result<&mut Self> {
        let i = v.saturating_add(1);
        if self.fenwick.range_sum(i, i)? == 0 {
            self.fenwick.add(i, 1)?;
        }
        Ok(self)
    }

    /// Number of occupied rows in the closed range between `l` and
    /// `r` (in any order).
    pub fn occupied(&self, l: usize, r: usize) -> Result<usize> {
        let (l, r) = if l <= r { (l, r) } else { (r, l) };
        let r1 = r.checked_add(1)
            .ok_or(Error::IndexOutOfRange { index: r, len: self.len() })?;
        Ok(self.fenwick.range_sum(l + 1, r1)? as usize)
    }

    /// Return `true` iff every row of the closed range between `l`
    /// and `r` (in any order) is occupied.
    pub fn is_range_fully_occupied(&self, l: usize, r: usize) -> Result<bool> {
        Ok(self.occupied(l, r)? == l.abs_diff(r) + 1)
    }
}

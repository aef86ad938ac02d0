//! Toroidal addressing for square grids.

use moore_core::rule::SCAN_ORDER;

/// Wrap-around addressing for an `N×N` square grid.
///
/// Cells are stored row-major: `(x, y)` lives at `y * N + x`. Every
/// coordinate is reduced modulo `N` on both axes, so `(-1, 0)` addresses
/// `(N-1, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Torus {
    size: u32,
}

impl Torus {
    /// Addressing for side length `size`. `size` must be non-zero.
    pub(crate) fn new(size: u32) -> Self {
        debug_assert!(size > 0);
        Self { size }
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Reduce one axis value into `[0, N)`.
    #[inline]
    pub fn wrap(&self, v: i64) -> u32 {
        v.rem_euclid(self.size as i64) as u32
    }

    /// Flat index of `(x, y)` after wrapping both axes.
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> usize {
        self.wrap(y) as usize * self.size as usize + self.wrap(x) as usize
    }

    /// `(x, y)` for an in-range flat index.
    #[inline]
    pub fn coord(&self, index: usize) -> (u32, u32) {
        let n = self.size as usize;
        ((index % n) as u32, (index / n) as u32)
    }

    /// Flat indices of the 3×3 block around `(x, y)` in neighbourhood
    /// scan order, wrapped toroidally.
    #[inline]
    pub fn moore_indices(&self, x: u32, y: u32) -> [usize; 9] {
        let (x, y) = (x as i64, y as i64);
        SCAN_ORDER.map(|(dx, dy)| self.index(x + dx as i64, y + dy as i64))
    }
}

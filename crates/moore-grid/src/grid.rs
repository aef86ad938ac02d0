//! Double-buffered toroidal cell grid.
//!
//! The lifecycle per generation is:
//! 1. [`StateGrid::split_mut`] borrows the current buffer read-only and
//!    the next buffer mutably
//! 2. every cell of the next buffer is written from the current one
//! 3. [`StateGrid::swap`] makes the written buffer current
//!
//! [`StateGrid::advance`] bundles the three steps so the swap cannot
//! happen before the write pass has returned.

use moore_core::random::{self, Stream};
use moore_core::FillMode;

use crate::error::GridError;
use crate::hash;
use crate::torus::Torus;

/// An `N×N` toroidal grid of binary cells stored as `f32` (0.0 or 1.0).
///
/// # Buffer layout
///
/// ```text
/// buffers[front]     ←─── current: read by steps, painted by brushes
/// buffers[1 - front] ←─── next: written by the step in progress
/// ```
#[derive(Clone, Debug)]
pub struct StateGrid {
    torus: Torus,
    buffers: [Vec<f32>; 2],
    front: usize,
    generation: u64,
}

impl StateGrid {
    /// Largest accepted side length.
    pub const MAX_SIZE: u32 = 1 << 14;

    /// Create a grid of side `size` filled according to `mode`.
    ///
    /// For [`FillMode::Random`] each cell draws independently from the
    /// [`Stream::Init`] stream under `seed`.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] if `size == 0`,
    /// [`GridError::DimensionTooLarge`] if `size > MAX_SIZE`.
    pub fn new(size: u32, mode: FillMode, seed: u64) -> Result<Self, GridError> {
        Self::check_size(size)?;
        let n = size as usize * size as usize;
        let mut grid = Self {
            torus: Torus::new(size),
            buffers: [vec![0.0; n], vec![0.0; n]],
            front: 0,
            generation: 0,
        };
        grid.initialize(mode, seed);
        Ok(grid)
    }

    /// Create a grid from explicit row-major cell values.
    ///
    /// Values are taken as-is; callers are expected to pass 0.0 or 1.0.
    pub fn from_cells(size: u32, cells: Vec<f32>) -> Result<Self, GridError> {
        Self::check_size(size)?;
        let expected = size as usize * size as usize;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            torus: Torus::new(size),
            buffers: [cells, vec![0.0; expected]],
            front: 0,
            generation: 0,
        })
    }

    fn check_size(size: u32) -> Result<(), GridError> {
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        if size > Self::MAX_SIZE {
            return Err(GridError::DimensionTooLarge {
                size,
                max: Self::MAX_SIZE,
            });
        }
        Ok(())
    }

    /// Refill both buffers according to `mode`, discarding prior state
    /// and resetting the generation counter.
    pub fn initialize(&mut self, mode: FillMode, seed: u64) {
        let current = &mut self.buffers[0];
        for (i, v) in current.iter_mut().enumerate() {
            *v = mode.value(|| random::draw(seed, i as u64, Stream::Init));
        }
        let (a, b) = self.buffers.split_at_mut(1);
        b[0].copy_from_slice(&a[0]);
        self.front = 0;
        self.generation = 0;
    }

    /// Side length.
    pub fn size(&self) -> u32 {
        self.torus.size()
    }

    /// Total number of cells (`size²`).
    pub fn cell_count(&self) -> usize {
        self.buffers[0].len()
    }

    /// Wrap-around addressing for this grid.
    pub fn torus(&self) -> Torus {
        self.torus
    }

    /// Number of completed swaps since initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current buffer, row-major.
    pub fn current(&self) -> &[f32] {
        &self.buffers[self.front]
    }

    /// Mutable access to the current buffer, for in-place edits between
    /// generations.
    pub fn current_mut(&mut self) -> &mut [f32] {
        &mut self.buffers[self.front]
    }

    /// Value at `(x, y)`, both axes wrapped.
    pub fn read(&self, x: i64, y: i64) -> f32 {
        self.current()[self.torus.index(x, y)]
    }

    /// Overwrite the current value at `(x, y)`, both axes wrapped.
    pub fn write(&mut self, x: i64, y: i64, value: f32) {
        let i = self.torus.index(x, y);
        self.current_mut()[i] = value;
    }

    /// Borrow `(current, next)` for a write pass.
    ///
    /// Only `next` is writable, so a pass cannot observe its own output.
    pub fn split_mut(&mut self) -> (&[f32], &mut [f32]) {
        let (a, b) = self.buffers.split_at_mut(1);
        if self.front == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Exchange current and next.
    ///
    /// Call only after every cell of the next buffer has been written.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
        self.generation += 1;
    }

    /// Run one complete write pass and swap.
    ///
    /// `pass` receives the addressing, the current buffer, and the next
    /// buffer; it must write every cell of the next buffer.
    pub fn advance<F>(&mut self, pass: F)
    where
        F: FnOnce(Torus, &[f32], &mut [f32]),
    {
        let torus = self.torus;
        let (current, next) = self.split_mut();
        pass(torus, current, next);
        self.swap();
    }

    /// Number of live (value 1) cells in the current buffer.
    pub fn population(&self) -> usize {
        self.current().iter().filter(|&&v| v >= 0.5).count()
    }

    /// FNV-1a fingerprint of the current buffer.
    pub fn state_hash(&self) -> u64 {
        hash::cells_hash(self.size(), self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(
            StateGrid::new(0, FillMode::Zero, 0).unwrap_err(),
            GridError::EmptyGrid
        );
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = StateGrid::new(StateGrid::MAX_SIZE + 1, FillMode::Zero, 0).unwrap_err();
        assert!(matches!(err, GridError::DimensionTooLarge { .. }));
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let err = StateGrid::from_cells(3, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::LengthMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn constant_fills() {
        let g = StateGrid::new(7, FillMode::One, 0).unwrap();
        assert_eq!(g.population(), 49);
        let g = StateGrid::new(7, FillMode::Zero, 0).unwrap();
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn random_fill_is_roughly_half() {
        let g = StateGrid::new(100, FillMode::Random, 12345).unwrap();
        let pop = g.population();
        assert!((4500..5500).contains(&pop), "population {pop}");
        assert!(g.current().iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn random_fill_is_seed_reproducible() {
        let a = StateGrid::new(32, FillMode::Random, 9).unwrap();
        let b = StateGrid::new(32, FillMode::Random, 9).unwrap();
        let c = StateGrid::new(32, FillMode::Random, 10).unwrap();
        assert_eq!(a.current(), b.current());
        assert_ne!(a.current(), c.current());
    }

    #[test]
    fn read_wraps_coordinates() {
        let mut cells = vec![0.0; 9];
        cells[8] = 1.0; // (2, 2)
        let g = StateGrid::from_cells(3, cells).unwrap();
        assert_eq!(g.read(-1, -1), 1.0);
        assert_eq!(g.read(2, 2), 1.0);
        assert_eq!(g.read(5, 5), 1.0);
        assert_eq!(g.read(0, 0), 0.0);
    }

    #[test]
    fn advance_writes_next_then_swaps() {
        let mut g = StateGrid::new(4, FillMode::Zero, 0).unwrap();
        g.advance(|_, current, next| {
            assert!(current.iter().all(|&v| v == 0.0));
            next.fill(1.0);
        });
        assert_eq!(g.generation(), 1);
        assert_eq!(g.population(), 16);

        // The old current is now the write target.
        let (current, next) = g.split_mut();
        assert!(current.iter().all(|&v| v == 1.0));
        assert!(next.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn initialize_resets_generation_and_both_buffers() {
        let mut g = StateGrid::new(4, FillMode::Zero, 0).unwrap();
        g.advance(|_, _, next| next.fill(1.0));
        g.initialize(FillMode::Zero, 0);
        assert_eq!(g.generation(), 0);
        let (current, next) = g.split_mut();
        assert!(current.iter().chain(next.iter()).all(|&v| v == 0.0));
    }

    #[test]
    fn write_targets_current_buffer() {
        let mut g = StateGrid::new(3, FillMode::Zero, 0).unwrap();
        g.write(-1, 0, 1.0);
        assert_eq!(g.current()[2], 1.0);
    }

    proptest! {
        #[test]
        fn double_swap_restores_roles(size in 1u32..16, seed in any::<u64>()) {
            let mut g = StateGrid::new(size, FillMode::Random, seed).unwrap();
            let before = g.state_hash();
            g.swap();
            g.swap();
            prop_assert_eq!(g.state_hash(), before);
            prop_assert_eq!(g.generation(), 2);
        }
    }
}

//! One synchronous generation of the stochastic rule-table automaton.
//!
//! Every cell's next value is a pure function of the previous buffer,
//! the rule table, the step seed, and the step parameters. Per cell:
//!
//! 1. With probability `1 - update_prob` the cell keeps its value.
//! 2. Otherwise, with probability `noise_prob` it is overwritten by
//!    noise: 1 when `(u - 0.5) * 2 < noise_bias`, else 0.
//! 3. Otherwise the 3×3 neighbourhood is encoded as a 9-bit index and
//!    the rule table gives the next value.
//!
//! The three decisions use separate [`Stream`]s so they are independent
//! for a given cell and seed. Because no cell reads another cell's new
//! value, rows are written in parallel with no synchronization beyond
//! the buffer swap that ends the generation.

use moore_core::random::{self, Stream};
use moore_core::RuleTable;
use moore_grid::{StateGrid, Torus};
use rayon::prelude::*;

use crate::config::{Execution, StepParams};

/// Encode a neighbourhood in scan order: position `k` contributes `2^k`
/// when its cell is alive.
#[inline]
pub fn neighbourhood_index(values: &[f32; 9]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |acc, (k, &v)| acc | (usize::from(v >= 0.5) << k))
}

/// Gather the 3×3 block around `(x, y)` from `cells`, wrapped.
#[inline]
pub fn gather(torus: Torus, cells: &[f32], x: u32, y: u32) -> [f32; 9] {
    torus.moore_indices(x, y).map(|i| cells[i])
}

/// Transition function bound to one rule, parameter set, and step seed.
#[derive(Clone, Copy, Debug)]
pub struct StepKernel<'a> {
    rule: &'a RuleTable,
    params: &'a StepParams,
    seed: u64,
}

impl<'a> StepKernel<'a> {
    /// Bind a kernel for one generation.
    pub fn new(rule: &'a RuleTable, params: &'a StepParams, seed: u64) -> Self {
        Self { rule, params, seed }
    }

    /// Next value for flat cell `cell` whose neighbourhood is `values`
    /// (`values[4]` is the cell itself).
    #[inline]
    pub fn transition(&self, cell: u64, values: &[f32; 9]) -> f32 {
        if !random::chance(self.seed, cell, Stream::Update, self.params.update_prob) {
            return values[4];
        }
        if random::chance(self.seed, cell, Stream::Noise, self.params.noise_prob) {
            let u = random::draw(self.seed, cell, Stream::Bias);
            return if (u - 0.5) * 2.0 < self.params.noise_bias {
                1.0
            } else {
                0.0
            };
        }
        if self.rule.lookup(neighbourhood_index(values)) {
            1.0
        } else {
            0.0
        }
    }

    /// Write one row of the next buffer.
    fn write_row(&self, torus: Torus, current: &[f32], y: usize, out: &mut [f32]) {
        let n = out.len();
        for (x, slot) in out.iter_mut().enumerate() {
            let values = gather(torus, current, x as u32, y as u32);
            *slot = self.transition((y * n + x) as u64, &values);
        }
    }

    /// Run one full generation on `grid` and swap its buffers.
    pub fn run(&self, grid: &mut StateGrid, execution: Execution) {
        grid.advance(|torus, current, next| {
            let n = torus.size() as usize;
            match execution {
                Execution::Serial => next
                    .chunks_mut(n)
                    .enumerate()
                    .for_each(|(y, out)| self.write_row(torus, current, y, out)),
                Execution::Parallel => next
                    .par_chunks_mut(n)
                    .enumerate()
                    .for_each(|(y, out)| self.write_row(torus, current, y, out)),
            }
        });
    }
}

/// Run one generation of `rule` on `grid` under `params` and `seed`.
pub fn step(
    grid: &mut StateGrid,
    rule: &RuleTable,
    params: &StepParams,
    seed: u64,
    execution: Execution,
) {
    StepKernel::new(rule, params, seed).run(grid, execution);
}

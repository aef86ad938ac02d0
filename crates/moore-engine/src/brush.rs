//! Circular brush overwrites on the current buffer.
//!
//! Brush geometry is resolution independent: the centre and radius are
//! in normalized grid space `[0, 1]²`, and cell `(x, y)` is tested at its
//! centre `((x + 0.5) / N, (y + 0.5) / N)`. The brush does not wrap
//! across grid edges.

use moore_core::random::{self, Stream};
use moore_core::FillMode;
use moore_grid::StateGrid;

/// Rows or columns whose cell centres may lie within `radius` of `c`.
fn axis_span(c: f64, radius: f64, n: usize) -> std::ops::Range<usize> {
    let lo = ((c - radius) * n as f64 - 0.5).floor().max(0.0);
    let hi = ((c + radius) * n as f64 + 0.5).ceil().min(n as f64);
    if hi <= lo {
        return 0..0;
    }
    lo as usize..hi as usize
}

/// Paint every cell whose centre lies strictly within `radius` of
/// `center`, returning how many cells were written.
///
/// [`FillMode::Random`] draws each painted cell from the
/// [`Stream::Brush`] stream under `seed`, independent of the cell's
/// prior value. Each call is a complete pass; nothing is retained
/// between calls, so a stroke is simply a sequence of calls.
pub fn apply(
    grid: &mut StateGrid,
    center: (f64, f64),
    radius: f64,
    mode: FillMode,
    seed: u64,
) -> usize {
    if radius.is_nan() || radius <= 0.0 || !center.0.is_finite() || !center.1.is_finite() {
        return 0;
    }
    let n = grid.size() as usize;
    let scale = n as f64;
    let (cx, cy) = center;
    let rows = axis_span(cy, radius, n);
    let cols = axis_span(cx, radius, n);
    let cells = grid.current_mut();

    let mut painted = 0;
    for y in rows {
        let dy = (y as f64 + 0.5) / scale - cy;
        for x in cols.clone() {
            let dx = (x as f64 + 0.5) / scale - cx;
            if dx.hypot(dy) < radius {
                let i = y * n + x;
                cells[i] = mode.value(|| random::draw(seed, i as u64, Stream::Brush));
                painted += 1;
            }
        }
    }
    painted
}

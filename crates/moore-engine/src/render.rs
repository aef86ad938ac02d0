//! Greyscale display mapping for cell values.

/// Displayed intensity for cell value `v`: live cells are dark (0.25),
/// dead cells light (0.75).
#[inline]
pub fn intensity(v: f32) -> f32 {
    0.5 * (1.0 - v) + 0.25
}

/// Map a whole buffer through [`intensity`].
pub fn intensities(cells: &[f32]) -> Vec<f32> {
    cells.iter().map(|&v| intensity(v)).collect()
}

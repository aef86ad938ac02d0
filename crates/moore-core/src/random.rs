//! Seed-addressable per-cell randomness.
//!
//! [`draw`] is a pure function of `(seed, cell, stream)`: there is no
//! generator state to advance, so cells may be evaluated in any order or
//! in parallel and still see identical values. Independent decisions
//! made for the same cell in the same step use different [`Stream`]s.
//!
//! The mixer is the SplitMix64 finalizer applied twice, once to fold the
//! seed with the stream key and once to fold in the cell index.

/// Golden-ratio increment used to separate stream keys.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Independent decision channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// Whether a cell updates this step.
    Update,
    /// Whether an updating cell is overwritten by noise.
    Noise,
    /// Which value a noised cell takes.
    Bias,
    /// Random grid initialization.
    Init,
    /// Random brush painting.
    Brush,
}

impl Stream {
    /// Additive seed offset for this stream.
    pub const fn offset(self) -> u64 {
        match self {
            Self::Update => 0,
            Self::Noise => 1231,
            Self::Bias => 7861,
            Self::Init => 3301,
            Self::Brush => 5132,
        }
    }
}

/// SplitMix64 output function.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Raw 64-bit hash for `(seed, cell, stream)`.
#[inline]
pub fn hash(seed: u64, cell: u64, stream: Stream) -> u64 {
    let key = mix64(
        seed.wrapping_add(stream.offset())
            .wrapping_mul(GOLDEN_GAMMA),
    );
    mix64(key ^ cell.wrapping_mul(GOLDEN_GAMMA).wrapping_add(GOLDEN_GAMMA))
}

/// Uniform value in `[0, 1)` for `(seed, cell, stream)`.
///
/// Identical inputs always return the identical output.
#[inline]
pub fn draw(seed: u64, cell: u64, stream: Stream) -> f64 {
    const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
    ((hash(seed, cell, stream) >> 11) as f64) * SCALE
}

/// Bernoulli trial: `true` with probability `p`.
#[inline]
pub fn chance(seed: u64, cell: u64, stream: Stream, p: f64) -> bool {
    draw(seed, cell, stream) < p
}

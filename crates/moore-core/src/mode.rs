//! How a cell is filled on initialization or under the brush.

use serde::{Deserialize, Serialize};

/// Fill policy shared by grid initialization and brush painting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillMode {
    /// Every cell becomes 0.
    #[default]
    Zero,
    /// Every cell becomes 1.
    One,
    /// Each cell independently becomes 1 when its draw is below 0.5.
    Random,
}

impl FillMode {
    /// Cell value under this mode.
    ///
    /// `draw` is only evaluated for [`FillMode::Random`].
    #[inline]
    pub fn value(self, draw: impl FnOnce() -> f64) -> f32 {
        match self {
            Self::Zero => 0.0,
            Self::One => 1.0,
            Self::Random => {
                if draw() < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_modes_ignore_draw() {
        assert_eq!(FillMode::Zero.value(|| unreachable!()), 0.0);
        assert_eq!(FillMode::One.value(|| unreachable!()), 1.0);
    }

    #[test]
    fn random_thresholds_at_half() {
        assert_eq!(FillMode::Random.value(|| 0.49), 1.0);
        assert_eq!(FillMode::Random.value(|| 0.5), 0.0);
    }
}

//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input for constructing a
//! [`SimulationContext`](crate::context::SimulationContext).
//! [`validate()`](SimConfig::validate) checks every parameter range up
//! front; the context re-validates each piece when it is changed live.

use std::error::Error;
use std::fmt;

use moore_core::FillMode;
use moore_grid::{GridError, StateGrid};

use crate::cadence::{MAX_STEPS_PER_FRAME, MIN_STEPS_PER_FRAME};

/// Preset brush radii (small, medium, large) in normalized grid units.
pub const BRUSH_RADII: [f64; 3] = [0.05, 0.15, 0.3];

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions are invalid.
    Grid(GridError),
    /// A probability is NaN, infinite, or outside `[0, 1]`.
    InvalidProbability {
        /// Which parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `noise_bias` is NaN, infinite, or outside `[-1, 1]`.
    InvalidNoiseBias {
        /// The rejected value.
        value: f64,
    },
    /// Brush radius is NaN, infinite, or negative.
    InvalidBrushRadius {
        /// The rejected value.
        value: f64,
    },
    /// `steps_per_frame` is outside `[-4, 4]`.
    StepsPerFrameOutOfRange {
        /// The rejected value.
        value: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} must be a probability in [0, 1], got {value}")
            }
            Self::InvalidNoiseBias { value } => {
                write!(f, "noise_bias must be finite and in [-1, 1], got {value}")
            }
            Self::InvalidBrushRadius { value } => {
                write!(f, "brush radius must be finite and >= 0, got {value}")
            }
            Self::StepsPerFrameOutOfRange { value } => write!(
                f,
                "steps_per_frame must be in [{MIN_STEPS_PER_FRAME}, {MAX_STEPS_PER_FRAME}], got {value}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability { name, value });
    }
    Ok(())
}

// ── StepParams ─────────────────────────────────────────────────────

/// Per-step stochastic controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Probability that a cell updates at all this step. Default: 1.0.
    pub update_prob: f64,
    /// Probability that an updating cell is replaced by noise. Default: 0.1.
    pub noise_prob: f64,
    /// Bias of noise toward 1 (`1.0`) or 0 (`-1.0`). Default: 0.0.
    pub noise_bias: f64,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            update_prob: 1.0,
            noise_prob: 0.1,
            noise_bias: 0.0,
        }
    }
}

impl StepParams {
    /// Every cell follows the rule every step.
    pub fn deterministic() -> Self {
        Self {
            update_prob: 1.0,
            noise_prob: 0.0,
            noise_bias: 0.0,
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("update_prob", self.update_prob)?;
        check_probability("noise_prob", self.noise_prob)?;
        if !self.noise_bias.is_finite() || !(-1.0..=1.0).contains(&self.noise_bias) {
            return Err(ConfigError::InvalidNoiseBias {
                value: self.noise_bias,
            });
        }
        Ok(())
    }
}

// ── BrushParams ────────────────────────────────────────────────────

/// Brush fill mode and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushParams {
    /// What painted cells become. Default: [`FillMode::One`].
    pub mode: FillMode,
    /// Radius in normalized grid units. Default: 0.15.
    pub radius: f64,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            mode: FillMode::One,
            radius: BRUSH_RADII[1],
        }
    }
}

impl BrushParams {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::InvalidBrushRadius { value: self.radius });
        }
        Ok(())
    }
}

// ── Execution ──────────────────────────────────────────────────────

/// How a generation's write pass is scheduled.
///
/// Both strategies produce bit-identical grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// Rows are written on the current thread, in order.
    Serial,
    /// Rows are written concurrently on the rayon pool.
    #[default]
    Parallel,
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for a simulation context.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Grid side length. Default: 100.
    pub grid_size: u32,
    /// Master seed. `None` draws one from OS entropy, so random fills,
    /// random brushes, and stochastic steps differ from run to run.
    pub seed: Option<u64>,
    /// How the grid is filled on reset. Default: [`FillMode::Zero`].
    pub init_mode: FillMode,
    /// Stochastic step controls.
    pub step: StepParams,
    /// Brush controls.
    pub brush: BrushParams,
    /// Cadence control in `[-4, 4]`. Default: -1 (one step every third frame).
    pub steps_per_frame: i32,
    /// Whether ticks run steps. Default: true.
    pub running: bool,
    /// Write-pass scheduling. Default: [`Execution::Parallel`].
    pub execution: Execution,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            seed: None,
            init_mode: FillMode::Zero,
            step: StepParams::default(),
            brush: BrushParams::default(),
            steps_per_frame: -1,
            running: true,
            execution: Execution::default(),
        }
    }
}

impl SimConfig {
    /// Check all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid_size(self.grid_size)?;
        self.step.validate()?;
        self.brush.validate()?;
        validate_steps_per_frame(self.steps_per_frame)?;
        Ok(())
    }
}

pub(crate) fn validate_grid_size(size: u32) -> Result<(), ConfigError> {
    if size == 0 {
        return Err(GridError::EmptyGrid.into());
    }
    if size > StateGrid::MAX_SIZE {
        return Err(GridError::DimensionTooLarge {
            size,
            max: StateGrid::MAX_SIZE,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn validate_steps_per_frame(value: i32) -> Result<(), ConfigError> {
    if !(MIN_STEPS_PER_FRAME..=MAX_STEPS_PER_FRAME).contains(&value) {
        return Err(ConfigError::StepsPerFrameOutOfRange { value });
    }
    Ok(())
}

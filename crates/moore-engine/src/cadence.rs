//! Steps-per-tick scheduling.
//!
//! The external render loop ticks at its own rate; the cadence decides
//! how many generations each tick runs. A signed control value
//! `steps_per_frame` spans 1/60× to 16×:
//!
//! | spf | -4 | -3 | -2 | -1 | 0 | 1 | 2 | 3 | 4 |
//! |-----|----|----|----|----|---|---|---|---|---|
//! | rate | 1/60× | 1/30× | 1/10× | 1/3× | 1× | 2× | 4× | 8× | 16× |
//!
//! Positive values run `2^spf` steps every tick. Non-positive values run
//! one step on ticks whose frame number is a multiple of
//! `SKIP_TABLE[-spf]`, and none otherwise.

use crate::config::{validate_steps_per_frame, ConfigError};

/// Smallest accepted `steps_per_frame`.
pub const MIN_STEPS_PER_FRAME: i32 = -4;

/// Largest accepted `steps_per_frame`.
pub const MAX_STEPS_PER_FRAME: i32 = 4;

/// Frame divisor for `steps_per_frame` in `0, -1, ..., -4`.
pub const SKIP_TABLE: [u64; 5] = [1, 3, 10, 30, 60];

const LABELS: [&str; 9] = [
    "1/60x", "1/30x", "1/10x", "1/3x", "1x", "2x", "4x", "8x", "16x",
];

/// Steps to run on frame `frame` under control value `spf`.
///
/// `spf` is clamped to `[-4, 4]`.
pub fn steps_for(spf: i32, frame: u64) -> u32 {
    let spf = spf.clamp(MIN_STEPS_PER_FRAME, MAX_STEPS_PER_FRAME);
    if spf > 0 {
        1 << spf
    } else {
        let skip = SKIP_TABLE[spf.unsigned_abs() as usize];
        u32::from(frame % skip == 0)
    }
}

/// Display label for a control value, or `None` outside `[-4, 4]`.
pub fn label(spf: i32) -> Option<&'static str> {
    let i = usize::try_from(spf.checked_sub(MIN_STEPS_PER_FRAME)?).ok()?;
    LABELS.get(i).copied()
}

/// Frame counter plus the cadence control.
///
/// [`advance`](CadenceController::advance) is called once per render
/// tick. While paused the frame counter still advances but no steps are
/// scheduled, and nothing accumulates for later ticks.
#[derive(Clone, Debug)]
pub struct CadenceController {
    steps_per_frame: i32,
    frame_count: u64,
    running: bool,
}

impl CadenceController {
    /// New controller at frame 0.
    pub fn new(steps_per_frame: i32, running: bool) -> Result<Self, ConfigError> {
        validate_steps_per_frame(steps_per_frame)?;
        Ok(Self {
            steps_per_frame,
            frame_count: 0,
            running,
        })
    }

    /// Count one frame and return `(frame, steps)` for it.
    ///
    /// The first call sees frame 1.
    pub fn advance(&mut self) -> (u64, u32) {
        self.frame_count += 1;
        let steps = if self.running {
            steps_for(self.steps_per_frame, self.frame_count)
        } else {
            0
        };
        (self.frame_count, steps)
    }

    /// Frames counted so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current control value.
    pub fn steps_per_frame(&self) -> i32 {
        self.steps_per_frame
    }

    /// Change the control value. The frame counter is kept.
    pub fn set_steps_per_frame(&mut self, spf: i32) -> Result<(), ConfigError> {
        validate_steps_per_frame(spf)?;
        self.steps_per_frame = spf;
        Ok(())
    }

    /// Whether ticks schedule steps.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pause or resume.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Label for the current control value.
    pub fn label(&self) -> &'static str {
        // Validated on every write.
        label(self.steps_per_frame).unwrap_or("1x")
    }
}

//! The simulation context: one owned unit holding every piece of state.
//!
//! [`SimulationContext`] replaces ambient shared state with a single
//! value the caller owns. All mutating methods take `&mut self`, so a
//! reset can never interleave with a step or a brush pass and a step can
//! never overlap the next one; the borrow checker enforces the exclusion.
//!
//! # Preconditions
//!
//! A context starts *uninitialized*: no rule and no grid. Until both
//! exist, [`step`](SimulationContext::step),
//! [`brush`](SimulationContext::brush), and
//! [`tick`](SimulationContext::tick) do nothing and report zero work,
//! and [`cells`](SimulationContext::cells) returns `None`. Load a rule
//! and call [`reset_state`](SimulationContext::reset_state) (or use
//! [`SimulationContext::with_rule`]) before the first tick.
//!
//! # Seeds
//!
//! Every step, brush pass, and reset draws a fresh 64-bit seed from a
//! ChaCha8 stream. With `SimConfig::seed = Some(s)` that stream, and so
//! the whole run, is reproducible. With `None` it is seeded from OS
//! entropy and random fills, random brushes, and stochastic steps
//! differ between runs.

use std::error::Error;
use std::fmt;

use moore_core::{FillMode, RuleError, RuleLibrary, RuleTable};
use moore_grid::StateGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::brush;
use crate::cadence::CadenceController;
use crate::config::{validate_grid_size, BrushParams, ConfigError, SimConfig, StepParams};
use crate::input::{PointerSample, PointerSender, PointerStream};
use crate::kernel::StepKernel;
use crate::render;

// ── ContextError ─────────────────────────────────────────────────

/// Errors from [`SimulationContext`] operations.
#[derive(Clone, Debug, PartialEq)]
pub enum ContextError {
    /// A rule could not be loaded, looked up, or edited.
    Rule(RuleError),
    /// A configuration value was rejected.
    Config(ConfigError),
    /// The operation needs a rule and none is loaded.
    NoRuleLoaded,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(e) => write!(f, "rule: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::NoRuleLoaded => write!(f, "no rule loaded"),
        }
    }
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rule(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::NoRuleLoaded => None,
        }
    }
}

impl From<RuleError> for ContextError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

impl From<ConfigError> for ContextError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── TickReport ───────────────────────────────────────────────────

/// What one [`SimulationContext::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame number of this tick (first tick is 1; 0 if uninitialized).
    pub frame: u64,
    /// Generations run.
    pub steps: u32,
    /// Active pointer samples applied before stepping.
    pub brush_strokes: u32,
}

// ── SimulationContext ────────────────────────────────────────────

/// Rule, grid, cadence, and controls for one running automaton.
pub struct SimulationContext {
    config: SimConfig,
    library: RuleLibrary,
    selected: Option<String>,
    /// The last loaded rule before any toggles.
    pristine: Option<RuleTable>,
    rule: Option<RuleTable>,
    grid: Option<StateGrid>,
    cadence: CadenceController,
    rng: ChaCha8Rng,
    pointer: PointerStream,
}

impl SimulationContext {
    /// Create an uninitialized context from a validated configuration.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cadence = CadenceController::new(config.steps_per_frame, config.running)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            config,
            library: RuleLibrary::new(),
            selected: None,
            pristine: None,
            rule: None,
            grid: None,
            cadence,
            rng,
            pointer: PointerStream::new(),
        })
    }

    /// Create a context with `rule` loaded and the grid initialized.
    pub fn with_rule(config: SimConfig, rule: RuleTable) -> Result<Self, ContextError> {
        let mut ctx = Self::new(config)?;
        ctx.set_rule(rule);
        ctx.reset_state()?;
        Ok(ctx)
    }

    /// Whether both a rule and a grid exist.
    pub fn is_initialized(&self) -> bool {
        self.rule.is_some() && self.grid.is_some()
    }

    // ── Rules ────────────────────────────────────────────────────

    /// Replace the library of named rules.
    pub fn set_library(&mut self, library: RuleLibrary) {
        self.library = library;
    }

    /// The library of named rules.
    pub fn library(&self) -> &RuleLibrary {
        &self.library
    }

    /// Name of the rule last picked with [`select_rule`](Self::select_rule)
    /// or [`add_rule`](Self::add_rule).
    pub fn selected_rule(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn set_rule(&mut self, rule: RuleTable) {
        debug!(ones = rule.count_ones(), "rule loaded");
        self.pristine = Some(rule.clone());
        self.rule = Some(rule);
    }

    /// Load a rule from a raw 512-character code.
    ///
    /// On error the current rule is kept unchanged. The grid is not reset.
    pub fn load_rule(&mut self, code: &str) -> Result<(), ContextError> {
        match RuleTable::load(code) {
            Ok(rule) => {
                self.set_rule(rule);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rejected rule code");
                Err(RuleError::from(e).into())
            }
        }
    }

    /// Load a named rule from the library.
    pub fn select_rule(&mut self, name: &str) -> Result<(), ContextError> {
        let rule = self.library.table(name).inspect_err(|e| {
            warn!(rule = name, error = %e, "rule selection failed");
        })?;
        self.selected = Some(name.to_string());
        self.set_rule(rule);
        Ok(())
    }

    /// Add a rule to the library and select it.
    ///
    /// Whitespace in `code` is ignored. Nothing changes on error.
    pub fn add_rule(&mut self, name: &str, code: &str) -> Result<(), ContextError> {
        let record = self.library.insert(name, code).inspect_err(|e| {
            warn!(rule = name, error = %e, "rejected new rule");
        })?;
        let (name, rule) = (record.name.clone(), record.table()?);
        self.selected = Some(name);
        self.set_rule(rule);
        Ok(())
    }

    /// Restore the last loaded rule, discarding any toggles.
    pub fn reset_rule(&mut self) -> Result<(), ContextError> {
        let pristine = self.pristine.clone().ok_or(ContextError::NoRuleLoaded)?;
        debug!("rule reset");
        self.rule = Some(pristine);
        Ok(())
    }

    /// Flip one rule entry.
    pub fn toggle_rule(&mut self, index: usize) -> Result<(), ContextError> {
        let rule = self.rule.as_ref().ok_or(ContextError::NoRuleLoaded)?;
        let next = rule.toggle(index)?;
        debug!(index, now = next.lookup(index), "rule entry toggled");
        self.rule = Some(next);
        Ok(())
    }

    /// The active rule.
    pub fn rule(&self) -> Option<&RuleTable> {
        self.rule.as_ref()
    }

    // ── Grid ─────────────────────────────────────────────────────

    /// Rebuild the grid from the configured size and init mode,
    /// discarding all prior cell state.
    pub fn reset_state(&mut self) -> Result<(), ContextError> {
        let seed = self.rng.random::<u64>();
        let grid = StateGrid::new(self.config.grid_size, self.config.init_mode, seed)
            .map_err(ConfigError::from)?;
        info!(
            size = self.config.grid_size,
            mode = ?self.config.init_mode,
            "state reset"
        );
        self.grid = Some(grid);
        Ok(())
    }

    /// Change the grid size and reset the state.
    ///
    /// On error the size and grid are unchanged.
    pub fn set_grid_size(&mut self, size: u32) -> Result<(), ContextError> {
        validate_grid_size(size)?;
        self.config.grid_size = size;
        self.reset_state()
    }

    /// Change the init mode and reset the state.
    pub fn set_init_mode(&mut self, mode: FillMode) -> Result<(), ContextError> {
        self.config.init_mode = mode;
        self.reset_state()
    }

    /// The grid, if initialized.
    pub fn grid(&self) -> Option<&StateGrid> {
        self.grid.as_ref()
    }

    /// Read-only view of the current buffer, if initialized.
    pub fn cells(&self) -> Option<&[f32]> {
        self.grid.as_ref().map(StateGrid::current)
    }

    /// Display intensities for the current buffer, if initialized.
    pub fn intensities(&self) -> Option<Vec<f32>> {
        self.cells().map(render::intensities)
    }

    // ── Controls ─────────────────────────────────────────────────

    /// The live configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the step parameters.
    pub fn set_step_params(&mut self, params: StepParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.config.step = params;
        Ok(())
    }

    /// Replace the brush parameters.
    pub fn set_brush_params(&mut self, params: BrushParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.config.brush = params;
        Ok(())
    }

    /// Change the cadence control.
    pub fn set_steps_per_frame(&mut self, spf: i32) -> Result<(), ConfigError> {
        self.cadence.set_steps_per_frame(spf)?;
        self.config.steps_per_frame = spf;
        Ok(())
    }

    /// Pause or resume ticking.
    pub fn set_running(&mut self, running: bool) {
        self.cadence.set_running(running);
        self.config.running = running;
    }

    /// Flip between paused and running; returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        let running = !self.cadence.is_running();
        self.set_running(running);
        running
    }

    /// The cadence state.
    pub fn cadence(&self) -> &CadenceController {
        &self.cadence
    }

    /// Handle for the input layer to queue pointer samples.
    pub fn pointer_sender(&self) -> PointerSender {
        self.pointer.sender()
    }

    // ── Operations ───────────────────────────────────────────────

    /// Run exactly one generation, ignoring cadence and pause.
    ///
    /// Returns `false` (and does nothing) when uninitialized.
    pub fn step(&mut self) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let seed = self.rng.random::<u64>();
        let (Some(rule), Some(grid)) = (self.rule.as_ref(), self.grid.as_mut()) else {
            return false;
        };
        StepKernel::new(rule, &self.config.step, seed).run(grid, self.config.execution);
        true
    }

    /// Apply one pointer sample with the configured brush, returning
    /// how many cells were painted.
    ///
    /// Released samples and uninitialized contexts paint nothing.
    pub fn brush(&mut self, sample: PointerSample) -> usize {
        if !sample.active || !self.is_initialized() {
            return 0;
        }
        let seed = self.rng.random::<u64>();
        let BrushParams { mode, radius } = self.config.brush;
        let Some(grid) = self.grid.as_mut() else {
            return 0;
        };
        let painted = brush::apply(grid, (sample.x, sample.y), radius, mode, seed);
        if painted > 0 {
            debug!(painted, x = sample.x, y = sample.y, "brush applied");
        }
        painted
    }

    /// One render tick: apply queued pointer samples, then run as many
    /// generations as the cadence schedules.
    ///
    /// Uninitialized contexts discard queued samples and do not count
    /// the frame.
    pub fn tick(&mut self) -> TickReport {
        let samples = self.pointer.drain();
        if !self.is_initialized() {
            return TickReport::default();
        }

        let mut brush_strokes = 0;
        for sample in samples {
            if sample.active {
                self.brush(sample);
                brush_strokes += 1;
            }
        }

        let (frame, steps) = self.cadence.advance();
        for _ in 0..steps {
            self.step();
        }
        TickReport {
            frame,
            steps,
            brush_strokes,
        }
    }
}

impl fmt::Debug for SimulationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationContext")
            .field("grid_size", &self.config.grid_size)
            .field("selected", &self.selected)
            .field("initialized", &self.is_initialized())
            .field("frame", &self.cadence.frame_count())
            .field("running", &self.cadence.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moore_core::RuleCodeError;
    use moore_test_utils::{all_ones_code, identity_code};

    fn seeded() -> SimConfig {
        SimConfig {
            grid_size: 16,
            seed: Some(7),
            step: StepParams::deterministic(),
            steps_per_frame: 0,
            ..Default::default()
        }
    }

    #[test]
    fn new_context_is_uninitialized() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        assert!(!ctx.is_initialized());
        assert!(!ctx.step());
        assert_eq!(ctx.brush(PointerSample::pressed(0.5, 0.5)), 0);
        assert_eq!(ctx.tick(), TickReport::default());
        assert!(ctx.cells().is_none());
        assert!(ctx.intensities().is_none());
        assert_eq!(ctx.cadence().frame_count(), 0);
    }

    #[test]
    fn rule_without_grid_is_still_uninitialized() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        ctx.load_rule(&all_ones_code()).unwrap();
        assert!(!ctx.step());
        ctx.reset_state().unwrap();
        assert!(ctx.step());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = SimConfig {
            steps_per_frame: 9,
            ..seeded()
        };
        assert_eq!(
            SimulationContext::new(cfg).unwrap_err(),
            ConfigError::StepsPerFrameOutOfRange { value: 9 }
        );
    }

    #[test]
    fn invalid_code_keeps_current_rule() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        ctx.load_rule(&identity_code()).unwrap();
        let err = ctx.load_rule("01x").unwrap_err();
        assert_eq!(
            err,
            ContextError::Rule(RuleError::InvalidRuleCode(RuleCodeError::WrongLength {
                len: 3
            }))
        );
        assert_eq!(ctx.rule(), Some(&RuleTable::identity()));
    }

    #[test]
    fn toggle_then_reset_rule() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        assert_eq!(ctx.toggle_rule(0), Err(ContextError::NoRuleLoaded));
        assert_eq!(ctx.reset_rule(), Err(ContextError::NoRuleLoaded));

        ctx.load_rule(&identity_code()).unwrap();
        ctx.toggle_rule(0).unwrap();
        assert!(ctx.rule().unwrap().lookup(0));
        assert!(matches!(
            ctx.toggle_rule(512),
            Err(ContextError::Rule(RuleError::IndexOutOfRange { index: 512 }))
        ));
        ctx.reset_rule().unwrap();
        assert_eq!(ctx.rule(), Some(&RuleTable::identity()));
    }

    #[test]
    fn library_selection() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        let mut lib = RuleLibrary::new();
        lib.insert("identity", &identity_code()).unwrap();
        lib.insert("fill", &all_ones_code()).unwrap();
        ctx.set_library(lib);

        ctx.select_rule("fill").unwrap();
        assert_eq!(ctx.selected_rule(), Some("fill"));
        assert_eq!(ctx.rule(), Some(&RuleTable::constant(true)));

        assert!(matches!(
            ctx.select_rule("nope"),
            Err(ContextError::Rule(RuleError::UnknownRule { .. }))
        ));
        assert_eq!(ctx.selected_rule(), Some("fill"));
    }

    #[test]
    fn add_rule_selects_it() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        ctx.add_rule(" mine ", &format!("  {}\n", identity_code()))
            .unwrap();
        assert_eq!(ctx.selected_rule(), Some("mine"));
        assert_eq!(ctx.library().len(), 1);
        assert_eq!(ctx.rule(), Some(&RuleTable::identity()));

        assert!(ctx.add_rule("bad", "0").is_err());
        assert_eq!(ctx.library().len(), 1);
        assert_eq!(ctx.selected_rule(), Some("mine"));
    }

    #[test]
    fn grid_size_change_resets() {
        let mut ctx = SimulationContext::with_rule(seeded(), RuleTable::identity()).unwrap();
        ctx.set_grid_size(5).unwrap();
        assert_eq!(ctx.grid().unwrap().size(), 5);
        assert_eq!(ctx.cells().unwrap().len(), 25);

        let err = ctx.set_grid_size(0).unwrap_err();
        assert!(matches!(err, ContextError::Config(ConfigError::Grid(_))));
        assert_eq!(ctx.grid().unwrap().size(), 5);
        assert_eq!(ctx.config().grid_size, 5);
    }

    #[test]
    fn init_mode_change_resets() {
        let mut ctx = SimulationContext::with_rule(seeded(), RuleTable::identity()).unwrap();
        assert_eq!(ctx.grid().unwrap().population(), 0);
        ctx.set_init_mode(FillMode::One).unwrap();
        assert_eq!(ctx.grid().unwrap().population(), 256);
    }

    #[test]
    fn pointer_samples_brush_before_steps() {
        let mut ctx = SimulationContext::with_rule(seeded(), RuleTable::identity()).unwrap();
        ctx.set_brush_params(BrushParams {
            mode: FillMode::One,
            radius: 2.0,
        })
        .unwrap();
        let tx = ctx.pointer_sender();
        tx.send(PointerSample::released(0.5, 0.5));
        tx.send(PointerSample::pressed(0.5, 0.5));

        let report = ctx.tick();
        assert_eq!(report.brush_strokes, 1);
        assert_eq!(report.steps, 1);
        // Identity rule preserves the painted state through the step.
        assert_eq!(ctx.grid().unwrap().population(), 256);
    }

    #[test]
    fn pause_stops_scheduling() {
        let mut ctx = SimulationContext::with_rule(seeded(), RuleTable::identity()).unwrap();
        assert!(!ctx.toggle_running());
        let report = ctx.tick();
        assert_eq!(report, TickReport { frame: 1, steps: 0, brush_strokes: 0 });
        assert_eq!(ctx.grid().unwrap().generation(), 0);
        assert!(ctx.toggle_running());
        assert_eq!(ctx.tick().steps, 1);
    }

    #[test]
    fn control_setters_validate() {
        let mut ctx = SimulationContext::new(seeded()).unwrap();
        assert!(ctx
            .set_step_params(StepParams {
                update_prob: 2.0,
                ..Default::default()
            })
            .is_err());
        assert_eq!(ctx.config().step, StepParams::deterministic());
        assert!(ctx.set_steps_per_frame(-7).is_err());
        assert_eq!(ctx.config().steps_per_frame, 0);
        ctx.set_steps_per_frame(2).unwrap();
        assert_eq!(ctx.cadence().label(), "4x");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let cfg = SimConfig {
                seed: Some(42),
                init_mode: FillMode::Random,
                step: StepParams::default(),
                ..seeded()
            };
            let mut ctx = SimulationContext::with_rule(cfg, RuleTable::identity()).unwrap();
            for _ in 0..5 {
                ctx.step();
            }
            ctx.grid().unwrap().state_hash()
        };
        assert_eq!(run(), run());
    }
}

//! Moore: stochastic rule-table cellular automata on toroidal grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Moore sub-crates. For most users, adding `moore` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use moore::prelude::*;
//!
//! // A 32×32 grid that fills with ones in a single generation.
//! let config = SimConfig {
//!     grid_size: 32,
//!     seed: Some(7),
//!     step: StepParams::deterministic(),
//!     steps_per_frame: 2,
//!     ..SimConfig::default()
//! };
//! let mut ctx = SimulationContext::with_rule(config, RuleTable::constant(true)).unwrap();
//!
//! let report = ctx.tick();
//! assert_eq!(report.steps, 4);
//! assert_eq!(ctx.grid().unwrap().population(), 32 * 32);
//!
//! // Flip one entry: the empty neighbourhood now maps to 0.
//! ctx.toggle_rule(0).unwrap();
//! assert!(!ctx.rule().unwrap().lookup(0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`rules`] | `moore-core` | Rule tables, rule library, fill modes, per-cell randomness |
//! | [`grid`] | `moore-grid` | Double-buffered state grid and toroidal addressing |
//! | [`engine`] | `moore-engine` | Step kernel, brush, cadence, simulation context |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Rule tables, the rule library, and deterministic randomness (`moore-core`).
///
/// [`rules::RuleTable`] is the 512-entry transition table;
/// [`rules::random`] holds the stateless per-cell draws.
pub use moore_core as rules;

/// State storage (`moore-grid`).
///
/// [`grid::StateGrid`] owns the two cell buffers; [`grid::Torus`]
/// resolves wrapped neighbour addresses.
pub use moore_grid as grid;

/// Simulation engine (`moore-engine`).
///
/// [`engine::SimulationContext`] is the entry point for driving an
/// automaton from a render loop.
pub use moore_engine as engine;

/// Common imports for typical Moore usage.
///
/// ```rust
/// use moore::prelude::*;
/// ```
pub mod prelude {
    // Rules
    pub use moore_core::{FillMode, RuleLibrary, RuleRecord, RuleTable, RULE_SIZE};

    // Grid
    pub use moore_grid::StateGrid;

    // Engine
    pub use moore_engine::{
        BrushParams, CadenceController, Execution, PointerSample, PointerSender, SimConfig,
        SimulationContext, StepParams, TickReport,
    };

    // Errors
    pub use moore_core::{RuleCodeError, RuleError};
    pub use moore_engine::{ConfigError, ContextError};
    pub use moore_grid::GridError;
}

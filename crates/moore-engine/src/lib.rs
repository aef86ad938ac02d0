//! Simulation engine for stochastic Moore-neighbourhood automata.
//!
//! Provides [`SimulationContext`], the single owned value that holds the
//! rule, the grid, the cadence, and the user controls, plus the pieces it
//! composes: the parallel [`StepKernel`], the circular [`brush`], and the
//! [`CadenceController`] that maps render ticks to generations.
//!
//! The render loop drives the engine with [`SimulationContext::tick`].
//! Pointer input arrives from other threads through a [`PointerSender`]
//! and is drained at the start of each tick.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod brush;
pub mod cadence;
pub mod config;
pub mod context;
pub mod input;
pub mod kernel;
pub mod render;

pub use cadence::CadenceController;
pub use config::{BrushParams, ConfigError, Execution, SimConfig, StepParams, BRUSH_RADII};
pub use context::{ContextError, SimulationContext, TickReport};
pub use input::{PointerSample, PointerSender};
pub use kernel::StepKernel;

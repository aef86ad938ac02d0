//! Benchmark profiles for the Moore automaton engine.
//!
//! Provides pre-built [`SimConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells), default noise
//! - [`stress_profile`]: 512x512 grid (~262K cells)
//! - [`reference_rule`]: a dense, non-trivial rule table

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use moore_core::{FillMode, RuleTable};
use moore_engine::{Execution, SimConfig, SimulationContext, StepParams};

/// 100x100 grid, random initial state, default stochastic controls.
pub fn reference_profile(seed: u64, execution: Execution) -> SimConfig {
    SimConfig {
        grid_size: 100,
        seed: Some(seed),
        init_mode: FillMode::Random,
        step: StepParams::default(),
        steps_per_frame: 0,
        execution,
        ..SimConfig::default()
    }
}

/// 512x512 grid; same controls as [`reference_profile`].
pub fn stress_profile(seed: u64, execution: Execution) -> SimConfig {
    SimConfig {
        grid_size: 512,
        ..reference_profile(seed, execution)
    }
}

/// Life-like rule: born on 3 live neighbours, survives on 2 or 3.
pub fn reference_rule() -> RuleTable {
    RuleTable::from_fn(|i| {
        let centre = i & 16 != 0;
        let neighbours = (i & !16).count_ones();
        matches!((centre, neighbours), (true, 2) | (_, 3))
    })
}

/// An initialized context for `config` running [`reference_rule`].
///
/// Panics if `config` is invalid; profiles from this crate always are valid.
pub fn context(config: SimConfig) -> SimulationContext {
    SimulationContext::with_rule(config, reference_rule())
        .expect("benchmark profile must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_valid() {
        for execution in [Execution::Serial, Execution::Parallel] {
            assert!(reference_profile(1, execution).validate().is_ok());
            assert!(stress_profile(1, execution).validate().is_ok());
        }
    }

    #[test]
    fn reference_rule_births_on_three() {
        let rule = reference_rule();
        assert!(rule.lookup(0b111));
        assert!(!rule.lookup(0b11));
        assert!(rule.lookup(16 | 0b11));
        assert!(!rule.lookup(16));
    }
}

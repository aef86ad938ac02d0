//! Core types for the Moore cellular-automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the 512-entry [`RuleTable`], the named [`RuleLibrary`], the
//! seed-addressable [`random`] source used for every stochastic
//! decision, the shared [`FillMode`], and the rule error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod mode;
pub mod random;
pub mod rule;

pub use error::{RuleCodeError, RuleError};
pub use library::{RuleLibrary, RuleRecord};
pub use mode::FillMode;
pub use random::Stream;
pub use rule::{RuleTable, RULE_SIZE};

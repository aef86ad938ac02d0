//! Double-buffered toroidal state storage for Moore automata.
//!
//! [`StateGrid`] owns two equally sized cell buffers. A generation reads
//! the *current* buffer and writes the *next* one, then the roles swap.
//! [`Torus`] provides the wrap-around addressing used for neighbour
//! access, and [`hash`] fingerprints grid state for determinism checks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod hash;
pub mod torus;

pub use error::GridError;
pub use grid::StateGrid;
pub use torus::Torus;

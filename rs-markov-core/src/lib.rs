//! Markov chain text generation library.
//!
//! This crate provides order-N Markov text generators including:
//! - Character-level and word-level models
//! - An on-demand scanning successor lookup and a precomputed one
//! - Seedable, reproducible random walks
//! - Index diagnostics and small corpus I/O helpers
//!
//! Models are single-threaded values: each instance owns its corpus,
//! index and random source, with no process-wide state.

/// Error type shared by every fallible operation.
pub mod error;

/// Grams, successor indexes, models and their configuration.
pub mod model;

/// I/O utilities (corpus loading, console formatting).
pub mod io;

pub use error::{MarkovError, Result};

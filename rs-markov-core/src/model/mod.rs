//! Top-level module for the Markov text generation system.
//!
//! This module provides order-N Markov chain generators, including:
//! - Token units (`Token`, implemented for characters and words)
//! - Fixed-length context windows (`Gram`)
//! - Interchangeable successor lookup strategies (`ScanIndex`, `MapIndex`)
//! - The random walk itself (`MarkovModel`, `TextGenerator`)
//! - Variant selection (`ModelConfig`)

/// Model configuration and variant factory.
pub mod config;

/// Fixed-length context window over a token sequence.
///
/// Used both as successor index key and as the current state of a walk.
pub mod gram;

/// Markov walk over a trained corpus.
///
/// Owns corpus, successor index and random source; exposes the
/// `TextGenerator` interface shared by every variant.
pub mod markov;

/// Successor lookup strategies and index diagnostics.
///
/// Scanning and precomputed strategies return the same successors,
/// the second one trading setup time for O(1) lookups.
pub mod successor;

/// Token units: characters and whitespace-delimited words.
pub mod token;

pub use config::{ModelConfig, Strategy, Unit};
pub use gram::Gram;
pub use markov::{
	CharMapModel, CharScanModel, MarkovModel, TextGenerator, WordMapModel, WordScanModel,
};
pub use successor::{IndexStats, MapIndex, ScanIndex, SuccessorIndex};
pub use token::Token;

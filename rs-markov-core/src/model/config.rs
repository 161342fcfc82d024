use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{MarkovError, Result};
use super::markov::{CharMapModel, CharScanModel, TextGenerator, WordMapModel, WordScanModel};

/// Token unit a model works on.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
	Char,
	Word,
}

/// Successor lookup strategy.
///
/// # Variants
/// - `Scan`: rescan the corpus at every step, no setup cost
/// - `Map`: build a gram -> successors map once per training text
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
	Scan,
	Map,
}

impl FromStr for Unit {
	type Err = MarkovError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"char" | "chars" | "character" => Ok(Unit::Char),
			"word" | "words" => Ok(Unit::Word),
			_ => Err(MarkovError::UnknownUnit(s.to_owned())),
		}
	}
}

impl FromStr for Strategy {
	type Err = MarkovError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"scan" | "naive" => Ok(Strategy::Scan),
			"map" | "indexed" => Ok(Strategy::Map),
			_ => Err(MarkovError::UnknownStrategy(s.to_owned())),
		}
	}
}

impl fmt::Display for Unit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Unit::Char => "char",
			Unit::Word => "word",
		})
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Strategy::Scan => "scan",
			Strategy::Map => "map",
		})
	}
}

/// Settings selecting and initializing a model variant.
///
/// # Invariants
/// - `order >= 1`, enforced by `new` and `set_order`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	/// Unit of the corpus tokens.
	pub unit: Unit,

	/// How successors are looked up.
	pub strategy: Strategy,

	/// Gram length.
	order: usize,

	/// Seed of the random source, `None` draws one from the thread rng.
	pub seed: Option<u64>,
}

impl Default for ModelConfig {
	/// Word-level, precomputed map, order 2, unseeded.
	fn default() -> Self {
		Self { unit: Unit::Word, strategy: Strategy::Map, order: 2, seed: None }
	}
}

impl ModelConfig {
	/// # Errors
	/// Returns `InvalidOrder` if `order == 0`.
	pub fn new(unit: Unit, strategy: Strategy, order: usize) -> Result<Self> {
		let mut config = Self { unit, strategy, ..Self::default() };
		config.set_order(order)?;
		Ok(config)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// # Errors
	/// Returns `InvalidOrder` if `order == 0`.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order == 0 {
			return Err(MarkovError::InvalidOrder(order));
		}
		self.order = order;
		Ok(())
	}

	/// Builds an untrained model of the configured variant.
	///
	/// The model is reseeded with `seed` when one is set.
	pub fn build(&self) -> Result<Box<dyn TextGenerator>> {
		let mut model: Box<dyn TextGenerator> = match (self.unit, self.strategy) {
			(Unit::Char, Strategy::Scan) => Box::new(CharScanModel::new(self.order)?),
			(Unit::Char, Strategy::Map) => Box::new(CharMapModel::new(self.order)?),
			(Unit::Word, Strategy::Scan) => Box::new(WordScanModel::new(self.order)?),
			(Unit::Word, Strategy::Map) => Box::new(WordMapModel::new(self.order)?),
		};
		if let Some(seed) = self.seed {
			model.set_random(seed);
		}
		Ok(model)
	}
}

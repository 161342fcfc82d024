use std::borrow::Cow;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{MarkovError, Result};
use super::gram::Gram;
use super::successor::{IndexStats, MapIndex, ScanIndex, SuccessorIndex};
use super::token::{self, Token};

/// Common interface of every Markov text generator variant.
///
/// Character and word models, scanning and precomputed, are all driven
/// through these operations so a caller can pick a variant at runtime.
pub trait TextGenerator: fmt::Display {
	/// Tokenizes `text` and rebuilds the successor index.
	///
	/// # Errors
	/// Returns `OrderTooLarge` if the corpus does not hold more tokens than
	/// the model order. The model is left untrained in that case.
	fn set_training(&mut self, text: &str) -> Result<()>;

	/// Reseeds the random source. Same seed, corpus, order and length give
	/// the same text.
	fn set_random(&mut self, seed: u64);

	/// Generates up to `length` units (characters or words) of text.
	///
	/// The output is shorter than `length` only when the walk reached a
	/// context that was never followed by anything in the corpus.
	///
	/// # Errors
	/// Returns `Untrained` if no training text was set.
	fn random_text(&mut self, length: usize) -> Result<String>;

	/// Structural summary of the successor index.
	fn stats(&self) -> Result<IndexStats>;
}

/// Order-N Markov chain over tokens of type `T`, looking successors up
/// through the strategy `I`.
///
/// The model exclusively owns its corpus, index and random source. It is
/// not thread-safe: callers sharing an instance must serialize access.
///
/// # Invariants
/// - `order >= 1`
/// - When `corpus` is set it holds more than `order` tokens and `index`
///   was rebuilt from it
#[derive(Debug)]
pub struct MarkovModel<T, I> {
	order: usize,
	corpus: Option<Vec<T>>,
	index: I,
	rng: StdRng,
}

/// Character-level model rescanning the corpus at each step.
pub type CharScanModel = MarkovModel<char, ScanIndex>;
/// Character-level model with a precomputed successor map.
pub type CharMapModel = MarkovModel<char, MapIndex<char>>;
/// Word-level model rescanning the corpus at each step.
pub type WordScanModel = MarkovModel<String, ScanIndex>;
/// Word-level model with a precomputed successor map.
pub type WordMapModel = MarkovModel<String, MapIndex<String>>;

impl<T: Token, I: SuccessorIndex<T>> MarkovModel<T, I> {
	/// Creates an untrained model of the given order, seeded from the
	/// thread random generator.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(MarkovError::InvalidOrder(order));
		}
		Ok(Self {
			order,
			corpus: None,
			index: I::default(),
			rng: StdRng::from_rng(&mut rand::rng()),
		})
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Tokenized training corpus.
	///
	/// # Errors
	/// Returns `Untrained` if no training text was set.
	pub fn corpus(&self) -> Result<&[T]> {
		self.corpus.as_deref().ok_or(MarkovError::Untrained)
	}

	/// Successors of `gram` according to the configured strategy.
	pub fn follows(&self, gram: &Gram<T>) -> Result<Cow<'_, [T]>> {
		let corpus = self.corpus()?;
		Ok(self.index.follows(corpus, gram))
	}

	/// Generates text starting from the gram at offset `start`.
	///
	/// `length` counts every emitted unit, the initial gram included. When
	/// `length` is smaller than the order, the initial gram is cut short.
	///
	/// # Errors
	/// - `Untrained` if no training text was set
	/// - `InvalidStart` if no full gram starts at `start`
	pub fn text_from(&mut self, start: usize, length: usize) -> Result<String> {
		let order = self.order;
		let corpus = self.corpus.as_deref().ok_or(MarkovError::Untrained)?;
		let max = corpus.len() - order;
		if start > max {
			return Err(MarkovError::InvalidStart { start, max });
		}

		let mut context = Gram::new(corpus, start, order)?;
		let mut out = String::new();
		if length < order {
			token::render(&context.tokens()[..length], &mut out);
			return Ok(out);
		}
		context.render_to(&mut out);

		for emitted in order..length {
			let follows = self.index.follows(corpus, &context);
			if follows.is_empty() {
				debug!(emitted, requested = length, context = %context, "no successor, stopping early");
				break;
			}

			let next = follows[self.rng.random_range(0..follows.len())].clone();
			trace!(context = %context, candidates = follows.len(), next = ?next, "step");
			out.push_str(T::SEPARATOR);
			next.push_to(&mut out);
			context = context.shift_add(next);
		}

		Ok(out)
	}
}

impl<T: Token, I: SuccessorIndex<T>> TextGenerator for MarkovModel<T, I> {
	fn set_training(&mut self, text: &str) -> Result<()> {
		let tokens = T::tokenize(text);

		self.corpus = None;
		if tokens.len() <= self.order {
			self.index = I::default();
			return Err(MarkovError::OrderTooLarge { order: self.order, corpus_len: tokens.len() });
		}

		self.index.rebuild(&tokens, self.order);
		debug!(model = %self, tokens = tokens.len(), "training text set");
		self.corpus = Some(tokens);
		Ok(())
	}

	fn set_random(&mut self, seed: u64) {
		self.rng = StdRng::seed_from_u64(seed);
	}

	fn random_text(&mut self, length: usize) -> Result<String> {
		let max = self.corpus()?.len() - self.order;
		let start = self.rng.random_range(0..=max);
		self.text_from(start, length)
	}

	fn stats(&self) -> Result<IndexStats> {
		let corpus = self.corpus()?;
		Ok(self.index.stats(corpus, self.order))
	}
}

impl<T: Token, I: SuccessorIndex<T>> fmt::Display for MarkovModel<T, I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} model of order {} ({})", T::UNIT, self.order, self.index.name())
	}
}

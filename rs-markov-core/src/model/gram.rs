use std::fmt;

use crate::error::{MarkovError, Result};
use super::token::{self, Token};

/// Fixed-length window of consecutive tokens taken from a corpus.
///
/// A `Gram` is both the key of a successor index and the current state of
/// a Markov walk. Equality and hashing only look at the tokens, never at
/// where in the corpus the window was taken from.
///
/// # Invariants
/// - `tokens` is never empty (order >= 1)
/// - The order never changes, `shift_add` returns a gram of the same order
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gram<T> {
	tokens: Vec<T>,
}

impl<T: Token> Gram<T> {
	/// Creates the gram of order `order` starting at `start` in `tokens`.
	///
	/// # Errors
	/// - `InvalidOrder` if `order == 0`
	/// - `GramOutOfBounds` if `start + order > tokens.len()`
	pub fn new(tokens: &[T], start: usize, order: usize) -> Result<Self> {
		if order == 0 {
			return Err(MarkovError::InvalidOrder(order));
		}
		let end = start
			.checked_add(order)
			.filter(|end| *end <= tokens.len())
			.ok_or(MarkovError::GramOutOfBounds { start, order, len: tokens.len() })?;
		Ok(Self { tokens: tokens[start..end].to_vec() })
	}

	/// Creates a gram owning the given tokens, its order is `tokens.len()`.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `tokens` is empty.
	pub fn from_tokens(tokens: Vec<T>) -> Result<Self> {
		if tokens.is_empty() {
			return Err(MarkovError::InvalidOrder(0));
		}
		Ok(Self { tokens })
	}

	/// Copies a corpus window the caller already bounds-checked.
	pub(crate) fn window(window: &[T]) -> Self {
		debug_assert!(!window.is_empty());
		Self { tokens: window.to_vec() }
	}

	/// Number of tokens in the window.
	pub fn order(&self) -> usize {
		self.tokens.len()
	}

	pub fn tokens(&self) -> &[T] {
		&self.tokens
	}

	/// Oldest token of the window. Never panics, order is >= 1.
	pub fn first(&self) -> &T {
		&self.tokens[0]
	}

	/// Newest token of the window, the last one appended by `shift_add`.
	pub fn last(&self) -> &T {
		&self.tokens[self.tokens.len() - 1]
	}

	/// Returns whether this gram occurs in `corpus` at offset `start`.
	///
	/// Lets the scanning index compare in place without building a gram
	/// for every candidate position.
	pub(crate) fn matches_at(&self, corpus: &[T], start: usize) -> bool {
		corpus
			.get(start..start + self.order())
			.is_some_and(|window| window == self.tokens.as_slice())
	}

	/// Returns the next gram: the first token is dropped and `next` is appended.
	///
	/// The receiver is left untouched.
	pub fn shift_add(&self, next: T) -> Self {
		let mut tokens = Vec::with_capacity(self.tokens.len());
		tokens.extend_from_slice(&self.tokens[1..]);
		tokens.push(next);
		Self { tokens }
	}

	/// Appends the rendered gram to `out`.
	pub(crate) fn render_to(&self, out: &mut String) {
		token::render(&self.tokens, out);
	}
}

impl<T: Token> fmt::Display for Gram<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = String::new();
		self.render_to(&mut out);
		f.write_str(&out)
	}
}

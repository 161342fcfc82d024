use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Errors reported by the Markov models.
///
/// Every variant is a contract violation by the caller. Reaching a context
/// without successors during a walk is a normal end of generation and is
/// never reported through this type.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// Generation (or diagnostics) requested before any training text was set.
	#[error("no training text set, call set_training first")]
	Untrained,

	/// Order must be at least 1.
	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	/// The corpus is too short to hold a gram and at least one successor.
	#[error("order {order} requires more than {order} tokens, corpus has {corpus_len}")]
	OrderTooLarge { order: usize, corpus_len: usize },

	/// A gram was requested past the end of the token sequence.
	#[error("gram of order {order} at offset {start} runs past the end of {len} tokens")]
	GramOutOfBounds { start: usize, order: usize, len: usize },

	/// A generation start offset that cannot hold a full gram.
	#[error("start offset {start} is invalid, must be <= {max}")]
	InvalidStart { start: usize, max: usize },

	#[error("unknown unit '{0}', expected 'char' or 'word'")]
	UnknownUnit(String),

	#[error("unknown strategy '{0}', expected 'scan' or 'map'")]
	UnknownStrategy(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let error = MarkovError::OrderTooLarge { order: 3, corpus_len: 2 };
		assert_eq!(error.to_string(), "order 3 requires more than 3 tokens, corpus has 2");

		let error = MarkovError::GramOutOfBounds { start: 4, order: 2, len: 5 };
		assert_eq!(error.to_string(), "gram of order 2 at offset 4 runs past the end of 5 tokens");
	}
}

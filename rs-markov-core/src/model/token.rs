use std::fmt::Debug;
use std::hash::Hash;

/// Atomic unit of a training corpus.
///
/// Implemented for `char` (character-level models) and `String`
/// (word-level models). A token knows how to split raw text into
/// tokens and how to render itself back into generated text.
pub trait Token: Clone + Eq + Hash + Debug {
	/// Text inserted between two rendered tokens.
	const SEPARATOR: &'static str;

	/// Unit name shown in diagnostics ("char" or "word").
	const UNIT: &'static str;

	/// Splits raw training text into tokens.
	fn tokenize(text: &str) -> Vec<Self>;

	/// Appends the rendered token to `out`.
	fn push_to(&self, out: &mut String);
}

impl Token for char {
	const SEPARATOR: &'static str = "";
	const UNIT: &'static str = "char";

	/// Characters of the trimmed text.
	///
	/// # Notes
	/// - Inner whitespace (including line breaks) is kept as-is.
	fn tokenize(text: &str) -> Vec<Self> {
		text.trim().chars().collect()
	}

	fn push_to(&self, out: &mut String) {
		out.push(*self);
	}
}

impl Token for String {
	const SEPARATOR: &'static str = " ";
	const UNIT: &'static str = "word";

	/// Whitespace-delimited words, runs of whitespace count as one break.
	fn tokenize(text: &str) -> Vec<Self> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	fn push_to(&self, out: &mut String) {
		out.push_str(self);
	}
}

/// Renders a token sequence joined by the token separator.
pub(crate) fn render<T: Token>(tokens: &[T], out: &mut String) {
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			out.push_str(T::SEPARATOR);
		}
		token.push_to(out);
	}
}

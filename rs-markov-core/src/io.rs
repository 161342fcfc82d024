use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Reads a whole text file as a single training corpus.
///
/// - Reads the entire file into memory
/// - Line breaks (`\n` / `\r\n`) become single spaces, so sentences
///   running across lines stay contiguous for character models
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().collect::<Vec<_>>().join(" "))
}

/// Formats generated text for the console.
///
/// Words are laid out left to right; a line is closed as soon as it grows
/// past `width` columns. Runs of whitespace in `text` collapse to one space.
pub fn wrap_words(text: &str, width: usize) -> String {
	let mut out = String::new();
	let mut line_len = 0;

	for word in text.split_whitespace() {
		if line_len > 0 {
			out.push(' ');
			line_len += 1;
		}
		out.push_str(word);
		line_len += word.chars().count();
		if line_len > width {
			out.push('\n');
			line_len = 0;
		}
	}

	if out.ends_with('\n') {
		out.pop();
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wrap_words() {
		assert_eq!(wrap_words("aa bb cc dd", 4), "aa bb\ncc dd");
		assert_eq!(wrap_words("  one   two ", 60), "one two");
		assert_eq!(wrap_words("", 10), "");
	}

	#[test]
	fn test_read_corpus_joins_lines() {
		let path = std::env::temp_dir().join(format!("rs-markov-corpus-{}.txt", std::process::id()));
		std::fs::write(&path, "first line\r\nsecond line\nthird").unwrap();

		let corpus = read_corpus(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(corpus, "first line second line third");
	}

	#[test]
	fn test_read_corpus_missing_file() {
		assert!(read_corpus("./definitely/not/here.txt").is_err());
	}
}

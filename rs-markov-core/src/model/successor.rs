use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::gram::Gram;
use super::token::Token;

/// Strategy answering "which tokens followed this gram in the corpus?".
///
/// Both implementations return the same multiset of successors for the same
/// corpus and gram; duplicates are kept so that a uniform pick over the list
/// follows the observed frequencies. They only differ in where the work is
/// done: at every lookup (`ScanIndex`) or once per training text (`MapIndex`).
pub trait SuccessorIndex<T: Token>: Default {
	/// Short identifier, used in logs and diagnostics.
	fn name(&self) -> &'static str;

	/// Drops all previous state and prepares lookups for `corpus`.
	fn rebuild(&mut self, corpus: &[T], order: usize);

	/// Returns every token observed right after an occurrence of `gram`.
	///
	/// An empty list means the gram was never seen or only occurs at the
	/// very end of the corpus.
	fn follows<'a>(&'a self, corpus: &'a [T], gram: &Gram<T>) -> Cow<'a, [T]>;

	/// Structural summary of the index for `corpus` and `order`.
	fn stats(&self, corpus: &[T], order: usize) -> IndexStats;
}

/// Diagnostic summary of a successor index.
///
/// Two strategies built on the same corpus and order report equal stats.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
	/// Number of distinct grams (keys), terminal grams included.
	pub distinct_grams: usize,
	/// Size of the longest successor list.
	pub largest_successors: usize,
	/// Rendered grams owning a successor list of `largest_successors` entries, sorted.
	pub busiest: Vec<String>,
	/// Sum of all successor list sizes.
	pub total_successors: usize,
}

impl IndexStats {
	/// Builds the summary from every (gram, successor count) pair.
	fn from_counts<'g, T, I>(entries: I) -> Self
	where
		T: Token + 'g,
		I: IntoIterator<Item = (&'g Gram<T>, usize)>,
	{
		let mut stats = Self::default();
		let mut busiest: Vec<&Gram<T>> = Vec::new();

		for (gram, count) in entries {
			stats.distinct_grams += 1;
			stats.total_successors += count;
			if count > stats.largest_successors {
				stats.largest_successors = count;
				busiest.clear();
			}
			if count == stats.largest_successors {
				busiest.push(gram);
			}
		}

		stats.busiest = busiest.iter().map(|gram| gram.to_string()).collect();
		stats.busiest.sort();
		stats
	}
}

impl fmt::Display for IndexStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "distinct grams: {}", self.distinct_grams)?;
		writeln!(f, "total successors: {}", self.total_successors)?;
		write!(f, "largest successor list: {}", self.largest_successors)?;
		for gram in &self.busiest {
			write!(f, "\n  '{}'", gram)?;
		}
		Ok(())
	}
}

/// On-demand strategy: every lookup rescans the whole corpus.
///
/// Holds no state, `rebuild` is free and each `follows` call is
/// O(corpus length).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanIndex;

impl ScanIndex {
	/// First offset `>= from` where `gram` occurs in `corpus`.
	fn index_of<T: Token>(corpus: &[T], gram: &Gram<T>, from: usize) -> Option<usize> {
		let last = corpus.len().checked_sub(gram.order())?;
		(from..=last).find(|&start| gram.matches_at(corpus, start))
	}
}

impl<T: Token> SuccessorIndex<T> for ScanIndex {
	fn name(&self) -> &'static str {
		"scan"
	}

	fn rebuild(&mut self, _corpus: &[T], _order: usize) {}

	/// Collects the successor of every occurrence, restarting the search
	/// one token past the previous match so overlapping occurrences count.
	fn follows<'a>(&'a self, corpus: &'a [T], gram: &Gram<T>) -> Cow<'a, [T]> {
		let mut follows = Vec::new();
		let mut from = 0;
		while let Some(start) = Self::index_of(corpus, gram, from) {
			match corpus.get(start + gram.order()) {
				Some(next) => follows.push(next.clone()),
				None => break,
			}
			from = start + 1;
		}
		Cow::Owned(follows)
	}

	/// Enumerates distinct grams in corpus order and scans for each one.
	///
	/// O(L²), meant for diagnostics only.
	fn stats(&self, corpus: &[T], order: usize) -> IndexStats {
		if order == 0 {
			return IndexStats::default();
		}

		let mut seen = HashSet::new();
		let grams: Vec<Gram<T>> = corpus
			.windows(order)
			.map(Gram::window)
			.filter(|gram| seen.insert(gram.clone()))
			.collect();

		let counts: Vec<usize> = grams
			.iter()
			.map(|gram| self.follows(corpus, gram).len())
			.collect();
		IndexStats::from_counts(grams.iter().zip(counts))
	}
}

/// Precomputed strategy: one pass over the corpus builds a map from every
/// gram to its successors, each lookup hashes the gram once.
///
/// # Invariants
/// - Every gram of the corpus is a key, the final one with an empty list
/// - Each (position, successor) pair of the corpus is recorded exactly once
#[derive(Clone, Debug)]
pub struct MapIndex<T> {
	map: HashMap<Gram<T>, Vec<T>>,
}

impl<T> Default for MapIndex<T> {
	fn default() -> Self {
		Self { map: HashMap::new() }
	}
}

impl<T: Token> MapIndex<T> {
	/// Number of keys currently indexed.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl<T: Token> SuccessorIndex<T> for MapIndex<T> {
	fn name(&self) -> &'static str {
		"map"
	}

	fn rebuild(&mut self, corpus: &[T], order: usize) {
		let started = Instant::now();
		self.map.clear();
		if order == 0 {
			return;
		}

		for (start, window) in corpus.windows(order).enumerate() {
			let follows = self.map.entry(Gram::window(window)).or_default();
			if let Some(next) = corpus.get(start + order) {
				follows.push(next.clone());
			}
		}

		debug!(
			grams = self.map.len(),
			tokens = corpus.len(),
			order,
			elapsed_us = started.elapsed().as_micros() as u64,
			"successor map rebuilt"
		);
	}

	fn follows<'a>(&'a self, _corpus: &'a [T], gram: &Gram<T>) -> Cow<'a, [T]> {
		Cow::Borrowed(self.map.get(gram).map(Vec::as_slice).unwrap_or(&[]))
	}

	fn stats(&self, _corpus: &[T], _order: usize) -> IndexStats {
		IndexStats::from_counts(self.map.iter().map(|(gram, follows)| (gram, follows.len())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chars(text: &str) -> Vec<char> {
		text.chars().collect()
	}

	fn gram(text: &str) -> Gram<char> {
		Gram::from_tokens(chars(text)).unwrap()
	}

	fn sorted<T: Ord + Clone>(list: &[T]) -> Vec<T> {
		let mut list = list.to_vec();
		list.sort();
		list
	}

	#[test]
	fn test_scan_finds_every_occurrence() {
		let corpus = chars("abab");
		let scan = ScanIndex;
		assert_eq!(&*scan.follows(&corpus, &gram("a")), &['b', 'b']);
		assert_eq!(&*scan.follows(&corpus, &gram("b")), &['a']);
		assert!(scan.follows(&corpus, &gram("z")).is_empty());
	}

	#[test]
	fn test_scan_overlapping_occurrences() {
		let corpus = chars("aaaa");
		let scan = ScanIndex;
		assert_eq!(&*scan.follows(&corpus, &gram("aa")), &['a', 'a']);
	}

	#[test]
	fn test_scan_gram_longer_than_corpus() {
		let corpus = chars("ab");
		assert!(ScanIndex.follows(&corpus, &gram("abc")).is_empty());
	}

	#[test]
	fn test_map_keeps_terminal_gram() {
		let corpus = chars("abcab");
		let mut map = MapIndex::default();
		map.rebuild(&corpus, 2);

		assert_eq!(map.len(), 3);
		assert_eq!(&*map.follows(&corpus, &gram("ab")), &['c']);
		assert_eq!(&*map.follows(&corpus, &gram("ca")), &['b']);
		assert!(map.follows(&corpus, &gram("zz")).is_empty());
	}

	#[test]
	fn test_map_rebuild_discards_previous_corpus() {
		let mut map = MapIndex::default();
		map.rebuild(&chars("xyz"), 1);
		assert_eq!(map.len(), 3);

		let corpus = chars("aa");
		map.rebuild(&corpus, 1);
		assert_eq!(map.len(), 1);
		assert!(map.follows(&corpus, &gram("x")).is_empty());
	}

	#[test]
	fn test_strategies_agree() {
		let corpus = chars("yes-this-is-a-thin-pretty-pink-thistle");
		for order in 1..=4 {
			let mut map = MapIndex::default();
			map.rebuild(&corpus, order);
			for window in corpus.windows(order) {
				let key = Gram::window(window);
				assert_eq!(
					sorted(&ScanIndex.follows(&corpus, &key)),
					sorted(&map.follows(&corpus, &key)),
					"order {order}, gram '{key}'"
				);
			}
			assert_eq!(ScanIndex.stats(&corpus, order), map.stats(&corpus, order));
		}
	}

	#[test]
	fn test_stats() {
		let corpus = chars("yes-this-is-a-thin-pretty-pink-thistle");
		let mut map = MapIndex::default();
		map.rebuild(&corpus, 2);
		let stats = map.stats(&corpus, 2);

		// "hi" is followed by 's', 'n', 's'
		assert_eq!(stats.largest_successors, 3);
		assert_eq!(stats.busiest, vec!["-t", "hi", "is", "s-", "th"]);
		assert_eq!(stats.distinct_grams, 25);
		assert_eq!(stats.total_successors, corpus.len() - 2);
	}
}

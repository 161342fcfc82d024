use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use rs_markov_core::io::{read_corpus, wrap_words};
use rs_markov_core::model::{IndexStats, ModelConfig, Strategy, TextGenerator, Unit};

/// Generate random text from a Markov chain trained on a corpus.
#[derive(Parser, Debug)]
#[command(name = "rs-markov", version, about)]
pub struct Cli {
	/// Text file used as training corpus
	#[arg(long, short, conflicts_with = "text", required_unless_present = "text")]
	file: Option<PathBuf>,

	/// Training corpus given inline
	#[arg(long, short)]
	text: Option<String>,

	/// Gram length
	#[arg(long, short, default_value_t = 2)]
	order: usize,

	/// Number of characters or words to generate
	#[arg(long, short, default_value_t = 200)]
	length: usize,

	/// Seed of the random source, random when omitted
	#[arg(long, short)]
	seed: Option<u64>,

	/// Token unit: char or word
	#[arg(long, short, default_value = "word")]
	unit: Unit,

	/// Successor lookup: scan or map
	#[arg(long, default_value = "map")]
	strategy: Strategy,

	/// How many texts to generate with the same model
	#[arg(long, default_value_t = 1)]
	runs: usize,

	/// Print index diagnostics as JSON instead of generating
	#[arg(long, conflicts_with = "compare")]
	stats: bool,

	/// Run both strategies with the same seed and report timings
	#[arg(long)]
	compare: bool,

	/// With --compare, also check the scan diagnostics against the map ones.
	/// Rescans the corpus once per distinct gram.
	#[arg(long, requires = "compare")]
	scan_stats: bool,

	/// Wrap output lines after this many columns
	#[arg(long, short)]
	width: Option<usize>,
}

/// Outcome of running both strategies on one corpus.
#[derive(Debug)]
struct Comparison {
	seed: u64,
	timings: Vec<(Strategy, Duration)>,
	same_output: bool,
	map_stats: IndexStats,
	/// `None` unless the scan diagnostics were requested.
	stats_agree: Option<bool>,
}

impl Cli {
	/// Loads the corpus and dispatches to the requested mode.
	pub fn run(self) -> Result<()> {
		let corpus = self.corpus()?;

		if self.compare {
			return self.run_compare(&corpus);
		}

		let mut model = self.build(self.strategy, &corpus)?;
		if self.stats {
			let stats = model.stats()?;
			println!("{}", serde_json::to_string_pretty(&stats)?);
			return Ok(());
		}

		self.run_model(model.as_mut())
	}

	fn corpus(&self) -> Result<String> {
		match (&self.file, &self.text) {
			(Some(path), _) => read_corpus(path)
				.with_context(|| format!("failed to read corpus from {}", path.display())),
			(None, Some(text)) => Ok(text.clone()),
			(None, None) => bail!("either --file or --text is required"),
		}
	}

	/// Builds and trains a model of the configured unit and order.
	fn build(&self, strategy: Strategy, corpus: &str) -> Result<Box<dyn TextGenerator>> {
		let mut config = ModelConfig::new(self.unit, strategy, self.order)?;
		config.seed = self.seed;

		let mut model = config.build()?;
		let started = Instant::now();
		model
			.set_training(corpus)
			.with_context(|| format!("cannot train {}", model))?;
		info!("trained {} in {:?}", model, started.elapsed());
		Ok(model)
	}

	/// Generates `runs` texts and prints them.
	fn run_model(&self, model: &mut dyn TextGenerator) -> Result<()> {
		info!("running with {}", model);
		let started = Instant::now();
		for _ in 0..self.runs {
			let text = model.random_text(self.length)?;
			self.print(&text);
		}
		info!("{} run(s) took {:?}", self.runs, started.elapsed());
		Ok(())
	}

	/// Times scan and map strategies on the same corpus and seed.
	fn run_compare(&self, corpus: &str) -> Result<()> {
		let comparison = self.compare(corpus)?;

		for (strategy, elapsed) in &comparison.timings {
			println!("{:<5} {:?}", strategy.to_string(), elapsed);
		}
		info!("index diagnostics:\n{}", comparison.map_stats);
		if comparison.stats_agree == Some(false) {
			warn!("scan diagnostics differ from the map ones");
		}
		if comparison.same_output {
			println!("same output for both strategies");
		} else {
			warn!("strategies produced different output for seed {}", comparison.seed);
		}
		Ok(())
	}

	/// Generates `runs` texts with each strategy and collects the results.
	///
	/// Scan diagnostics are O(distinct grams x corpus length), they are only
	/// computed when `--scan-stats` is set.
	fn compare(&self, corpus: &str) -> Result<Comparison> {
		let seed = self.seed.unwrap_or(42);
		let mut timings = Vec::new();
		let mut outputs = Vec::new();
		let mut models = Vec::new();

		for strategy in [Strategy::Scan, Strategy::Map] {
			let mut model = self.build(strategy, corpus)?;
			model.set_random(seed);

			let started = Instant::now();
			let texts = (0..self.runs)
				.map(|_| model.random_text(self.length))
				.collect::<rs_markov_core::Result<Vec<_>>>()?;
			timings.push((strategy, started.elapsed()));
			outputs.push(texts);
			models.push(model);
		}

		let map_stats = models[1].stats()?;
		let stats_agree = if self.scan_stats {
			info!("checking scan diagnostics, one corpus pass per distinct gram");
			Some(models[0].stats()? == map_stats)
		} else {
			None
		};

		Ok(Comparison {
			seed,
			timings,
			same_output: outputs[0] == outputs[1],
			map_stats,
			stats_agree,
		})
	}

	fn print(&self, text: &str) {
		match self.width {
			Some(width) => println!("{}", wrap_words(text, width)),
			None => println!("{}", text),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CORPUS: &str = "the cat sat on the mat and the cat ran to the mat";

	fn parse(args: &[&str]) -> Cli {
		Cli::try_parse_from(std::iter::once("rs-markov").chain(args.iter().copied())).unwrap()
	}

	#[test]
	fn test_flag_conflicts() {
		assert!(Cli::try_parse_from(["rs-markov"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "--file", "a.txt", "--text", "abc"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "-t", "abc", "--stats", "--compare"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "-t", "abc", "--scan-stats"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "-t", "abc", "--unit", "bytes"]).is_err());
	}

	#[test]
	fn test_defaults() {
		let cli = parse(&["--text", CORPUS]);
		assert_eq!(cli.order, 2);
		assert_eq!(cli.length, 200);
		assert_eq!(cli.unit, Unit::Word);
		assert_eq!(cli.strategy, Strategy::Map);
		assert!(!cli.stats && !cli.compare && !cli.scan_stats);
	}

	#[test]
	fn test_corpus_from_text_and_file() {
		assert_eq!(parse(&["-t", CORPUS]).corpus().unwrap(), CORPUS);

		let path = std::env::temp_dir().join(format!("rs-markov-cli-{}.txt", std::process::id()));
		std::fs::write(&path, "one\ntwo").unwrap();
		let corpus = parse(&["-f", path.to_str().unwrap()]).corpus();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(corpus.unwrap(), "one two");

		assert!(parse(&["-f", "./no/such/corpus.txt"]).corpus().is_err());
	}

	#[test]
	fn test_compare_skips_scan_stats_by_default() {
		let cli = parse(&["-t", CORPUS, "--compare", "--runs", "3", "-l", "8", "-s", "5"]);
		let comparison = cli.compare(CORPUS).unwrap();

		assert_eq!(comparison.seed, 5);
		assert_eq!(comparison.timings.len(), 2);
		assert!(comparison.same_output);
		assert_eq!(comparison.stats_agree, None);
		assert_eq!(comparison.map_stats.total_successors, 11);
	}

	#[test]
	fn test_compare_with_scan_stats() {
		let cli = parse(&["-t", CORPUS, "--compare", "--scan-stats", "-u", "char", "-o", "3"]);
		let comparison = cli.compare(CORPUS).unwrap();

		assert_eq!(comparison.stats_agree, Some(true));
		assert!(comparison.same_output);
	}
}

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use rs_markov_core::model::{ModelConfig, Strategy, Unit};

const PARAGRAPH: &str = "It was the best of times, it was the worst of times, it was the age of \
	wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch of \
	incredulity, it was the season of Light, it was the season of Darkness, it was the spring \
	of hope, it was the winter of despair, we had everything before us, we had nothing before us.";

/// Generation cost per strategy as the corpus grows: the scan grows with
/// the corpus, the map stays flat.
fn bench_generation(c: &mut Criterion) {
	let mut group = c.benchmark_group("random_text");
	for copies in [1, 8, 64] {
		let corpus = vec![PARAGRAPH; copies].join(" ");
		for strategy in [Strategy::Scan, Strategy::Map] {
			let mut config = ModelConfig::new(Unit::Char, strategy, 3).expect("valid order");
			config.seed = Some(42);
			let mut model = config.build().expect("model");
			model.set_training(&corpus).expect("training");

			group.bench_with_input(BenchmarkId::new(strategy.to_string(), corpus.len()), &corpus, |b, _| {
				b.iter(|| black_box(model.random_text(200).expect("generation")))
			});
		}
	}
	group.finish();
}

/// One-time cost of building the successor map.
fn bench_training(c: &mut Criterion) {
	let corpus = vec![PARAGRAPH; 64].join(" ");
	let mut model = ModelConfig::new(Unit::Word, Strategy::Map, 2)
		.and_then(|config| config.build())
		.expect("model");
	c.bench_function("set_training/word_map", |b| {
		b.iter(|| model.set_training(black_box(&corpus)).expect("training"))
	});
}

criterion_group!(benches, bench_generation, bench_training);
criterion_main!(benches);

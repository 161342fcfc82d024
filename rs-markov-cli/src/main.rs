mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> Result<()> {
	// Logs go to stderr, stdout only carries generated text
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			EnvFilter::from_default_env()
				.add_directive("rs_markov_cli=info".parse()?)
				.add_directive("rs_markov_core=info".parse()?),
		)
		.init();

	Cli::parse().run()
}

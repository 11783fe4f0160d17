use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nfa_determinizer::config::Config;
use nfa_determinizer::description::DEFAULT_EPSILON;
use nfa_determinizer::pipeline;
use nfa_determinizer::symbol::WordSyntax;

/// Converts an epsilon-NFA to a DFA by subset construction
/// and reports which words the DFA accepts.
#[derive(Debug, Parser)]
#[command(name = "determinize", version)]
struct Args {
	/// Automaton description: states, start state, final states, then
	/// `source symbol target` lines.
	nfa: PathBuf,

	/// Word list, one word per line.
	words: PathBuf,

	/// Where to write the DFA description [default: stdout].
	#[arg(long, value_name = "PATH")]
	dfa_output: Option<PathBuf>,

	/// Where to write the verdicts [default: stdout].
	#[arg(long, value_name = "PATH")]
	report_output: Option<PathBuf>,

	/// Symbol that marks an epsilon move.
	#[arg(long, default_value = DEFAULT_EPSILON)]
	epsilon: String,

	/// Split words on whitespace instead of into single characters.
	#[arg(long)]
	tokens: bool,

	/// Log filter, e.g. `debug` or `nfa_determinizer=trace`; overrides `RUST_LOG`.
	#[arg(long, value_name = "FILTER")]
	log_level: Option<String>,
}

fn main() -> Result<()> {
	let args: Args = Args::parse();

	let filter: EnvFilter = match args.log_level.as_deref() {
		Some(directives) => EnvFilter::new(directives),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	let mut config: Config = Config::new(args.nfa, args.words)
		.with_epsilon(args.epsilon)
		.with_word_syntax(if args.tokens {
			WordSyntax::Tokens
		} else {
			WordSyntax::Characters
		});
	config.dfa_output = args.dfa_output;
	config.report_output = args.report_output;

	pipeline::run(&config).with_context(|| format!("failed to determinize {:?}", config.nfa))?;
	Ok(())
}

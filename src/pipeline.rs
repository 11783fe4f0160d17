use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::config::Config;
use crate::description::DescriptionError;
use crate::description::parse_nfa;
use crate::dfa::Dfa;
use crate::dfa::Verdict;
use crate::error::Error;
use crate::nfa::Nfa;
use crate::report::DfaDescription;
use crate::report::Report;
use crate::symbol::Word;
use crate::symbol::parse_word_list;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Summary {
	pub dfa_states: usize,
	pub dfa_transitions: usize,
	pub accepted: usize,
	pub rejected: usize,
}

/// Parses and determinizes an automaton description.
pub fn determinize_description(description: &str, epsilon: &str) -> Result<Dfa, DescriptionError> {
	let nfa: Nfa = parse_nfa(description, epsilon)?;
	Ok(Dfa::determinization(&nfa))
}

/// Reads the automaton, writes its DFA, reads the word list and writes one
/// verdict per word.
pub fn run(config: &Config) -> Result<Summary, Error> {
	let description: String = read(&config.nfa)?;
	let dfa: Dfa = determinize_description(&description, &config.epsilon).map_err(|source| Error::Description {
		path: config.nfa.clone(),
		source,
	})?;

	emit(
		config.dfa_output.as_deref(),
		&DfaDescription(&dfa).to_string(),
	)?;

	let words: Vec<Word> = parse_word_list(&read(&config.words)?, config.word_syntax);
	let verdicts: Vec<Verdict<'_>> = dfa.simulate_all(&words);

	emit(config.report_output.as_deref(), &Report(&verdicts).to_string())?;

	let accepted: usize = verdicts.iter().filter(|verdict| verdict.is_ok()).count();
	let summary: Summary = Summary {
		dfa_states: dfa.len(),
		dfa_transitions: dfa.number_of_transitions(),
		accepted,
		rejected: verdicts.len() - accepted,
	};
	info!(
		"{} DFA states, {} transitions; {} words accepted, {} rejected",
		summary.dfa_states, summary.dfa_transitions, summary.accepted, summary.rejected
	);

	Ok(summary)
}

fn read(path: &Path) -> Result<String, Error> {
	debug!("reading {path:?}");
	std::fs::read_to_string(path).map_err(|source| Error::Read {
		path: path.to_owned(),
		source,
	})
}

fn emit(maybe_path: Option<&Path>, text: &str) -> Result<(), Error> {
	let Some(path): Option<&Path> = maybe_path else {
		return std::io::stdout()
			.lock()
			.write_all(text.as_bytes())
			.map_err(|source| Error::Write {
				path: PathBuf::from("<stdout>"),
				source,
			});
	};

	debug!("writing {path:?}");
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent).map_err(|source| Error::Write {
			path: parent.to_owned(),
			source,
		})?;
	}
	std::fs::write(path, text).map_err(|source| Error::Write {
		path: path.to_owned(),
		source,
	})
}

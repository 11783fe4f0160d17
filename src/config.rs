use std::path::PathBuf;

use crate::description::DEFAULT_EPSILON;
use crate::symbol::WordSyntax;

/// Everything one run of [`crate::pipeline::run`] needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
	pub nfa: PathBuf,
	pub words: PathBuf,
	/// Standard output when `None`.
	pub dfa_output: Option<PathBuf>,
	/// Standard output when `None`.
	pub report_output: Option<PathBuf>,
	pub epsilon: String,
	pub word_syntax: WordSyntax,
}

impl Config {
	pub fn new<N, W>(nfa: N, words: W) -> Self
	where
		N: Into<PathBuf>,
		W: Into<PathBuf>,
	{
		Self {
			nfa: nfa.into(),
			words: words.into(),
			dfa_output: None,
			report_output: None,
			epsilon: DEFAULT_EPSILON.to_owned(),
			word_syntax: WordSyntax::default(),
		}
	}

	pub fn with_dfa_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.dfa_output = Some(path.into());
		self
	}

	pub fn with_report_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
		self.report_output = Some(path.into());
		self
	}

	pub fn with_epsilon<LikeString: Into<String>>(mut self, epsilon: LikeString) -> Self {
		self.epsilon = epsilon.into();
		self
	}

	pub fn with_word_syntax(mut self, word_syntax: WordSyntax) -> Self {
		self.word_syntax = word_syntax;
		self
	}
}

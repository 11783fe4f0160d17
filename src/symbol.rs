use std::borrow::Cow;

/// An atomic input token.
///
/// In the minimal case every symbol is a single character,
/// but nothing below the word list parser relies on that.
#[derive(Debug, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Symbol(Cow<'static, str>);

/// An ordered, possibly empty, sequence of symbols
/// together with the text it was read from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Word {
	literal: String,
	symbols: Vec<Symbol>,
}

/// How a line of the word list is split into symbols.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum WordSyntax {
	/// Every character is one symbol.
	#[default]
	Characters,
	/// Whitespace separated tokens are the symbols.
	Tokens,
}

impl Symbol {
	pub fn new<LikeString>(token: LikeString) -> Self
	where
		LikeString: Into<Cow<'static, str>>,
	{
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<char> for Symbol {
	fn from(ch: char) -> Self {
		Self(Cow::Owned(ch.to_string()))
	}
}

impl From<&str> for Symbol {
	fn from(token: &str) -> Self {
		Self(Cow::Owned(token.to_owned()))
	}
}

impl std::fmt::Display for Symbol {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		fmt.write_str(&self.0)
	}
}

impl Word {
	/// The literal echo is the concatenation of the symbols.
	pub fn new(symbols: Vec<Symbol>) -> Self {
		let literal: String = symbols.iter().map(Symbol::as_str).collect::<String>();
		Self { literal, symbols }
	}

	pub fn from_chars(line: &str) -> Self {
		let literal: &str = line.trim();
		Self {
			literal: literal.to_owned(),
			symbols: literal.chars().map(Symbol::from).collect::<Vec<_>>(),
		}
	}

	pub fn from_tokens(line: &str) -> Self {
		let literal: &str = line.trim();
		Self {
			literal: literal.to_owned(),
			symbols: literal.split_whitespace().map(Symbol::from).collect::<Vec<_>>(),
		}
	}

	pub fn parse(line: &str, syntax: WordSyntax) -> Self {
		match syntax {
			WordSyntax::Characters => Self::from_chars(line),
			WordSyntax::Tokens => Self::from_tokens(line),
		}
	}

	pub fn literal(&self) -> &str {
		&self.literal
	}

	pub fn symbols(&self) -> &[Symbol] {
		&self.symbols
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}
}

impl std::fmt::Display for Word {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		fmt.write_str(&self.literal)
	}
}

/// One word per line; a blank line is the empty word.
pub fn parse_word_list(input: &str, syntax: WordSyntax) -> Vec<Word> {
	input.lines().map(|line| Word::parse(line, syntax)).collect::<Vec<_>>()
}

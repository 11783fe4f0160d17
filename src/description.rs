use nom::Err as NomErr;
use nom::IResult;
use nom::Parser;
use nom::bytes::complete::take_till1;
use nom::character::complete::space0;
use nom::character::complete::space1;
use nom::combinator::all_consuming;
use nom::error::ErrorKind as NomErrorKind;
use nom::error::ParseError;
use nom::multi::separated_list0;
use nom::sequence::delimited;

use crate::nfa::Label;
use crate::nfa::Nfa;
use crate::nfa::NfaBuilder;
use crate::nfa::NfaError;
use crate::symbol::Symbol;

/// Marker the original word lists and automata use for an epsilon move.
pub const DEFAULT_EPSILON: &str = "h";

/// Failure to read an automaton description.
///
/// Either the text does not follow the line layout,
/// or it does but names a state that was never declared.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DescriptionError {
	#[error("line {line}, column {column}: {kind}")]
	Syntax {
		line: usize,
		column: usize,
		kind: DescriptionErrorKind,
	},
	#[error(transparent)]
	Nfa(#[from] NfaError),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum DescriptionErrorKind {
	#[error("missing the line of declared states")]
	MissingStates,
	#[error("missing the start state line")]
	MissingStart,
	#[error("missing the final states line")]
	MissingFinals,
	#[error("expected at least one state")]
	EmptyStateList,
	#[error("expected exactly one start state")]
	ExpectedSingleStart,
	#[error("expected `source symbol target`")]
	MalformedTransition,
	#[error("expected whitespace separated state names")]
	MalformedStateList,
}

#[derive(Debug)]
struct DescriptionParsingError<'a> {
	input: &'a str,
}

impl<'a> ParseError<&'a str> for DescriptionParsingError<'a> {
	fn from_error_kind(input: &'a str, _: NomErrorKind) -> Self {
		Self { input }
	}

	fn append(_: &'a str, _: NomErrorKind, other: Self) -> Self {
		other
	}
}

type ParsingResult<'a, T> = IResult<&'a str, T, DescriptionParsingError<'a>>;

/// Reads the line layout:
///
/// ```text
/// A B          declared states
/// A            start state
/// B            final states (may be blank)
/// A 0 A        one `source symbol target` per line
/// A h B        `epsilon` as the symbol is an epsilon move
/// ```
pub fn parse_nfa(input: &str, epsilon: &str) -> Result<Nfa, DescriptionError> {
	let mut lines = input
		.lines()
		.enumerate()
		.map(|(i, line)| (i + 1, line.trim()));

	let mut builder: NfaBuilder = NfaBuilder::new();

	let (n, text): (usize, &str) = lines
		.next()
		.ok_or_else(|| syntax(1, 1, DescriptionErrorKind::MissingStates))?;
	let states: Vec<&str> = parse_line(n, text, token_list, DescriptionErrorKind::MalformedStateList)?;
	if states.is_empty() {
		return Err(syntax(n, 1, DescriptionErrorKind::EmptyStateList));
	}
	for state in states {
		builder.state(state);
	}

	let (n, text): (usize, &str) = lines
		.next()
		.ok_or_else(|| syntax(2, 1, DescriptionErrorKind::MissingStart))?;
	let start: Vec<&str> = parse_line(n, text, token_list, DescriptionErrorKind::ExpectedSingleStart)?;
	let [start]: [&str; 1] = start
		.try_into()
		.map_err(|_| syntax(n, 1, DescriptionErrorKind::ExpectedSingleStart))?;
	builder.start(start);

	let (n, text): (usize, &str) = lines
		.next()
		.ok_or_else(|| syntax(3, 1, DescriptionErrorKind::MissingFinals))?;
	for state in parse_line(n, text, token_list, DescriptionErrorKind::MalformedStateList)? {
		builder.final_state(state);
	}

	for (n, text) in lines {
		if text.is_empty() {
			continue;
		}
		let (source, symbol, target): (&str, &str, &str) =
			parse_line(n, text, transition, DescriptionErrorKind::MalformedTransition)?;
		let label: Label = if symbol == epsilon {
			Label::Epsilon
		} else {
			Label::Symbol(Symbol::from(symbol))
		};
		builder.labeled(source, label, target);
	}

	Ok(builder.build()?)
}

fn parse_line<'a, T, F>(
	line: usize,
	text: &'a str,
	mut parser: F,
	kind: DescriptionErrorKind,
) -> Result<T, DescriptionError>
where
	F: FnMut(&'a str) -> ParsingResult<'a, T>,
{
	match parser(text) {
		Ok((_, output)) => Ok(output),
		Err(NomErr::Error(err) | NomErr::Failure(err)) => {
			Err(syntax(line, text.len() - err.input.len() + 1, kind))
		},
		Err(NomErr::Incomplete(_)) => Err(syntax(line, text.len() + 1, kind)),
	}
}

fn syntax(line: usize, column: usize, kind: DescriptionErrorKind) -> DescriptionError {
	DescriptionError::Syntax { line, column, kind }
}

fn token(input: &str) -> ParsingResult<'_, &str> {
	take_till1(char::is_whitespace).parse(input)
}

fn token_list(input: &str) -> ParsingResult<'_, Vec<&str>> {
	all_consuming(delimited(space0, separated_list0(space1, token), space0)).parse(input)
}

fn transition(input: &str) -> ParsingResult<'_, (&str, &str, &str)> {
	let (input, (source, _, symbol, _, target)) =
		all_consuming((token, space1, token, space1, token)).parse(input)?;
	Ok((input, (source, symbol, target)))
}

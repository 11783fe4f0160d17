use crate::dfa::Dfa;
use crate::dfa::DfaState;
use crate::dfa::Verdict;

const ACCEPTED: &str = "aceito";
const REJECTED: &str = "nao aceito";

/// Writes a [`Dfa`] in the same line layout [`crate::description::parse_nfa`]
/// reads, naming every state by its concatenated member labels.
pub struct DfaDescription<'dfa>(pub &'dfa Dfa);

/// One `aceito <word>` or `nao aceito <word>` line per verdict.
pub struct Report<'verdicts, 'word>(pub &'verdicts [Verdict<'word>]);

impl std::fmt::Display for DfaDescription<'_> {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let dfa: &Dfa = self.0;
		let names: Vec<String> = dfa.states().iter().map(DfaState::name).collect::<Vec<_>>();

		fmt.write_str(&names.join(" "))?;
		fmt.write_str("\n")?;

		if let Some(start) = names.get(dfa.start()) {
			fmt.write_str(start)?;
		}
		fmt.write_str("\n")?;

		let finals: Vec<&str> = dfa
			.final_states()
			.map(|i| names[i].as_str())
			.collect::<Vec<_>>();
		fmt.write_str(&finals.join(" "))?;
		fmt.write_str("\n")?;

		for (source, state) in dfa.states().iter().enumerate() {
			for (symbol, &target) in state.transitions().iter() {
				fmt.write_fmt(format_args!("{} {symbol} {}\n", names[source], names[target]))?;
			}
		}

		Ok(())
	}
}

impl std::fmt::Display for Verdict<'_> {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let outcome: &str = if self.accepted { ACCEPTED } else { REJECTED };
		fmt.write_fmt(format_args!("{outcome} {}", self.word))
	}
}

impl std::fmt::Display for Report<'_, '_> {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for verdict in self.0.iter() {
			fmt.write_fmt(format_args!("{verdict}\n"))?;
		}
		Ok(())
	}
}

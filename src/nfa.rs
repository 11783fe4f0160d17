use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;

use crate::kernel::Kernel;
use crate::symbol::Symbol;

/// A nondeterministic finite automaton with epsilon moves.
///
/// Only [`NfaBuilder::build`] creates one, and only after checking that every
/// referenced state was declared, so the rest of the crate can index states
/// without further checks. Once built it is never mutated.
#[derive(Debug, Clone)]
pub struct Nfa {
	states: Vec<NfaState>,
	start: NfaIdx,
	/// Every non-epsilon symbol used by some transition.
	alphabet: BTreeSet<Symbol>,
}

#[derive(Debug, Clone)]
pub struct NfaState {
	idx: usize,
	name: String,
	is_final: bool,
	transitions: BTreeMap<Symbol, BTreeSet<NfaIdx>>,
	/// Targets of epsilon moves.
	spontaneous: BTreeSet<NfaIdx>,
}

/// Dense state index.
///
/// Indices are handed out in ascending label order,
/// so sorting by index is sorting by label.
#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NfaIdx(usize);

#[derive(Debug, Clone, Eq, Ord, PartialEq, PartialOrd)]
pub enum Label {
	Epsilon,
	Symbol(Symbol),
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum NfaError {
	#[error("invalid state reference: {state:?} is not a declared state")]
	InvalidStateReference { state: String },
	#[error("no start state was given")]
	MissingStartState,
}

/// Collects an automaton by state labels and validates it in [`Self::build`].
#[derive(Debug, Default)]
pub struct NfaBuilder {
	states: BTreeSet<String>,
	start: Option<String>,
	finals: BTreeSet<String>,
	transitions: Vec<(String, Label, String)>,
}

impl NfaBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state<LikeString>(&mut self, name: LikeString) -> &mut Self
	where
		LikeString: Into<String>,
	{
		self.states.insert(name.into());
		self
	}

	pub fn start<LikeString>(&mut self, name: LikeString) -> &mut Self
	where
		LikeString: Into<String>,
	{
		self.start = Some(name.into());
		self
	}

	pub fn final_state<LikeString>(&mut self, name: LikeString) -> &mut Self
	where
		LikeString: Into<String>,
	{
		self.finals.insert(name.into());
		self
	}

	pub fn transition<S, T>(&mut self, source: S, symbol: Symbol, target: T) -> &mut Self
	where
		S: Into<String>,
		T: Into<String>,
	{
		self.transitions
			.push((source.into(), Label::Symbol(symbol), target.into()));
		self
	}

	pub fn epsilon<S, T>(&mut self, source: S, target: T) -> &mut Self
	where
		S: Into<String>,
		T: Into<String>,
	{
		self.transitions.push((source.into(), Label::Epsilon, target.into()));
		self
	}

	pub fn labeled<S, T>(&mut self, source: S, label: Label, target: T) -> &mut Self
	where
		S: Into<String>,
		T: Into<String>,
	{
		self.transitions.push((source.into(), label, target.into()));
		self
	}

	pub fn build(&self) -> Result<Nfa, NfaError> {
		let indices: BTreeMap<&str, NfaIdx> = self
			.states
			.iter()
			.enumerate()
			.map(|(i, name)| (name.as_str(), NfaIdx(i)))
			.collect::<BTreeMap<_, _>>();
		let lookup = |name: &str| -> Result<NfaIdx, NfaError> {
			indices
				.get(name)
				.copied()
				.ok_or_else(|| NfaError::InvalidStateReference {
					state: name.to_owned(),
				})
		};

		let mut states: Vec<NfaState> = self
			.states
			.iter()
			.enumerate()
			.map(|(idx, name)| NfaState {
				idx,
				name: name.clone(),
				is_final: false,
				transitions: BTreeMap::new(),
				spontaneous: BTreeSet::new(),
			})
			.collect::<Vec<_>>();

		let Some(start): Option<&String> = self.start.as_ref() else {
			return Err(NfaError::MissingStartState);
		};
		let start: NfaIdx = lookup(start.as_str())?;

		for name in self.finals.iter() {
			states[lookup(name.as_str())?.0].is_final = true;
		}

		let mut alphabet: BTreeSet<Symbol> = BTreeSet::new();
		for (source, label, target) in self.transitions.iter() {
			let source: NfaIdx = lookup(source.as_str())?;
			let target: NfaIdx = lookup(target.as_str())?;
			match label {
				Label::Epsilon => {
					states[source.0].spontaneous.insert(target);
				},
				Label::Symbol(symbol) => {
					alphabet.insert(symbol.clone());
					states[source.0]
						.transitions
						.entry(symbol.clone())
						.or_default()
						.insert(target);
				},
			}
		}

		debug!(
			"built NFA with {} states, {} symbols, start {:?}",
			states.len(),
			alphabet.len(),
			self.start
		);

		Ok(Nfa {
			states,
			start,
			alphabet,
		})
	}
}

impl Nfa {
	/// All states reachable from `states` through zero or more epsilon moves.
	///
	/// Breadth first; a state is marked the moment it is discovered,
	/// so it is queued at most once.
	pub fn epsilon_closure<I>(&self, states: I) -> Kernel
	where
		I: IntoIterator<Item = NfaIdx>,
	{
		let mut visited: BTreeSet<NfaIdx> = BTreeSet::new();
		let mut queue: VecDeque<NfaIdx> = VecDeque::new();

		for state in states {
			if state.0 >= self.states.len() {
				debug!("skipping unknown state {state:?} in epsilon closure");
				continue;
			}
			if visited.insert(state) {
				queue.push_back(state);
			}
		}

		while let Some(state) = queue.pop_front() {
			for &next in self[state].spontaneous.iter() {
				if visited.insert(next) {
					queue.push_back(next);
				}
			}
		}

		Kernel::new(visited)
	}

	/// Epsilon closed union of every target reachable from a member of
	/// `kernel` on `symbol`. Empty means there is no transition.
	pub fn step_on_symbol(&self, kernel: &Kernel, symbol: &Symbol) -> Kernel {
		let mut targets: BTreeSet<NfaIdx> = BTreeSet::new();

		for state in kernel.iter() {
			let Some(nfa_state): Option<&NfaState> = self.states.get(state.0) else {
				debug!("skipping unknown state {state:?} in kernel {kernel:?}");
				continue;
			};
			if let Some(next) = nfa_state.transitions.get(symbol) {
				targets.extend(next.iter().copied());
			}
		}

		if targets.is_empty() {
			return Kernel::empty();
		}

		self.epsilon_closure(targets)
	}

	pub fn is_accepting(&self, kernel: &Kernel) -> bool {
		kernel
			.iter()
			.any(|state| self.states.get(state.0).is_some_and(|s| s.is_final))
	}

	/// Runs the automaton directly on a set of states, without building a DFA.
	pub fn simulate(&self, word: &[Symbol]) -> bool {
		let mut state_set: Kernel = self.epsilon_closure([self.start]);

		for (i, symbol) in word.iter().enumerate() {
			trace!("=== step {i}, symbol {symbol}, state set {state_set:?}");
			state_set = self.step_on_symbol(&state_set, symbol);
			if state_set.is_empty() {
				return false;
			}
		}

		self.is_accepting(&state_set)
	}
}

impl Nfa {
	pub fn start(&self) -> NfaIdx {
		self.start
	}

	pub fn alphabet(&self) -> &BTreeSet<Symbol> {
		&self.alphabet
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn states(&self) -> impl Iterator<Item = &NfaState> + '_ {
		self.states.iter()
	}

	pub fn idx_of(&self, name: &str) -> Option<NfaIdx> {
		self.states
			.binary_search_by(|state| state.name.as_str().cmp(name))
			.ok()
			.map(NfaIdx)
	}
}

impl std::ops::Index<NfaIdx> for Nfa {
	type Output = NfaState;

	fn index(&self, i: NfaIdx) -> &Self::Output {
		&self.states[i.0]
	}
}

impl NfaIdx {
	pub fn new(idx: usize) -> Self {
		Self(idx)
	}

	pub fn get(&self) -> usize {
		self.0
	}
}

impl NfaState {
	pub fn idx(&self) -> NfaIdx {
		NfaIdx(self.idx)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_final(&self) -> bool {
		self.is_final
	}

	pub fn transitions(&self) -> &BTreeMap<Symbol, BTreeSet<NfaIdx>> {
		&self.transitions
	}

	pub fn spontaneous(&self) -> &BTreeSet<NfaIdx> {
		&self.spontaneous
	}
}

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;

use rayon::prelude::*;

use crate::kernel::Kernel;
use crate::nfa::Nfa;
use crate::symbol::Symbol;
use crate::symbol::Word;

/// A deterministic automaton whose states are kernels of an [`Nfa`].
///
/// State `0` is the start state. The automaton owns copies of the member
/// labels of every kernel and holds no borrow of the NFA it came from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Dfa {
	states: Vec<DfaState>,
	kernels: BTreeMap<Kernel, usize>,
	alphabet: BTreeSet<Symbol>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DfaState {
	kernel: Kernel,
	labels: Vec<String>,
	is_final: bool,
	transitions: BTreeMap<Symbol, usize>,
}

/// Outcome of evaluating one word.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Verdict<'word> {
	pub word: &'word Word,
	pub accepted: bool,
}

impl Dfa {
	/// Subset construction.
	///
	/// Kernels are processed in FIFO order and the alphabet in ascending
	/// order, so state numbering is the same on every run.
	pub fn determinization(nfa: &Nfa) -> Self {
		let mut dfa: Self = Self {
			states: Vec::new(),
			kernels: BTreeMap::new(),
			alphabet: nfa.alphabet().clone(),
		};

		let initial: Kernel = nfa.epsilon_closure([nfa.start()]);
		dfa.add_state(nfa, initial.clone());

		let mut worklist: VecDeque<Kernel> = VecDeque::from([initial]);
		let mut processed: BTreeSet<Kernel> = BTreeSet::new();

		while let Some(kernel) = worklist.pop_front() {
			if processed.contains(&kernel) {
				continue;
			}
			processed.insert(kernel.clone());

			let i: usize = dfa.kernels[&kernel];
			debug!("=== processing state {i} {:?}", dfa.states[i].labels);

			for symbol in nfa.alphabet().iter() {
				let next: Kernel = nfa.step_on_symbol(&kernel, symbol);
				if next.is_empty() {
					continue;
				}

				let next_idx: usize = match dfa.kernels.get(&next) {
					Some(&existing) => existing,
					None => {
						let idx: usize = dfa.add_state(nfa, next.clone());
						worklist.push_back(next);
						idx
					},
				};
				trace!("- {i} --{symbol}--> {next_idx}");
				dfa.states[i].transitions.insert(symbol.clone(), next_idx);
			}

			if nfa.is_accepting(&kernel) {
				dfa.states[i].is_final = true;
			}
		}

		info!(
			"determinized {} NFA states into {} DFA states",
			nfa.len(),
			dfa.states.len()
		);

		dfa
	}

	fn add_state(&mut self, nfa: &Nfa, kernel: Kernel) -> usize {
		let idx: usize = self.states.len();
		let labels: Vec<String> = kernel
			.iter()
			.map(|state| nfa[state].name().to_owned())
			.collect::<Vec<_>>();
		self.states.push(DfaState {
			kernel: kernel.clone(),
			labels,
			is_final: false,
			transitions: BTreeMap::new(),
		});
		self.kernels.insert(kernel, idx);
		idx
	}
}

impl Dfa {
	/// Walks the automaton; a missing transition rejects without reading
	/// the rest of the word.
	pub fn simulate(&self, word: &[Symbol]) -> bool {
		let mut current_state: usize = 0;

		for (i, symbol) in word.iter().enumerate() {
			match self.transition(current_state, symbol) {
				Some(next) => {
					current_state = next;
				},
				None => {
					trace!("no transition from {current_state} on {symbol} at {i}");
					return false;
				},
			}
		}

		self.states[current_state].is_final
	}

	/// Evaluates every word in parallel; verdicts keep the order of `words`.
	pub fn simulate_all<'word>(&self, words: &'word [Word]) -> Vec<Verdict<'word>> {
		words
			.par_iter()
			.map(|word| Verdict {
				word,
				accepted: self.simulate(word.symbols()),
			})
			.collect::<Vec<_>>()
	}
}

impl Dfa {
	pub fn start(&self) -> usize {
		0
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn alphabet(&self) -> &BTreeSet<Symbol> {
		&self.alphabet
	}

	pub fn states(&self) -> &[DfaState] {
		&self.states
	}

	pub fn transition(&self, state: usize, symbol: &Symbol) -> Option<usize> {
		self.states.get(state)?.transitions.get(symbol).copied()
	}

	pub fn state_for(&self, kernel: &Kernel) -> Option<usize> {
		self.kernels.get(kernel).copied()
	}

	pub fn number_of_transitions(&self) -> usize {
		self.states.iter().map(|state| state.transitions.len()).sum()
	}

	pub fn final_states(&self) -> impl Iterator<Item = usize> + '_ {
		self.states
			.iter()
			.enumerate()
			.filter(|(_, state)| state.is_final)
			.map(|(i, _)| i)
	}
}

impl DfaState {
	pub fn kernel(&self) -> &Kernel {
		&self.kernel
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	/// Member labels concatenated in canonical order.
	pub fn name(&self) -> String {
		self.labels.concat()
	}

	pub fn is_final(&self) -> bool {
		self.is_final
	}

	pub fn transitions(&self) -> &BTreeMap<Symbol, usize> {
		&self.transitions
	}
}

impl Verdict<'_> {
	pub fn is_ok(&self) -> bool {
		self.accepted
	}
}

#[cfg(test)]
mod test {
	use proptest::prelude::*;

	use super::*;
	use crate::nfa::NfaBuilder;
	use crate::nfa::NfaIdx;

	fn scenario() -> Nfa {
		NfaBuilder::new()
			.state("A")
			.state("B")
			.start("A")
			.final_state("B")
			.transition("A", Symbol::from('0'), "A")
			.transition("A", Symbol::from('1'), "B")
			.epsilon("A", "B")
			.build()
			.unwrap()
	}

	fn word(s: &str) -> Vec<Symbol> {
		s.chars().map(Symbol::from).collect::<Vec<_>>()
	}

	#[test]
	fn start_state_is_closure() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		let start: &DfaState = &dfa.states()[dfa.start()];
		assert_eq!(start.labels(), ["A", "B"]);
		assert_eq!(start.name(), "AB");
		assert!(start.is_final());
		assert!(dfa.simulate(&word("")));
	}

	#[test]
	fn symbol_to_final_singleton() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		let next: usize = dfa.transition(dfa.start(), &Symbol::from('1')).unwrap();
		assert_eq!(dfa.states()[next].labels(), ["B"]);
		assert!(dfa.states()[next].is_final());
		assert!(dfa.simulate(&word("1")));
	}

	#[test]
	fn unknown_symbol_rejects() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		assert_eq!(dfa.transition(dfa.start(), &Symbol::from('9')), None);
		assert!(!dfa.simulate(&word("9")));
		assert!(!dfa.simulate(&word("19")));
		assert!(!dfa.simulate(&word("90")));
	}

	#[test]
	fn non_final_singleton_start() {
		let nfa: Nfa = NfaBuilder::new()
			.state("q0")
			.state("q1")
			.start("q0")
			.final_state("q1")
			.transition("q0", Symbol::from('a'), "q1")
			.build()
			.unwrap();
		let dfa: Dfa = Dfa::determinization(&nfa);
		assert_eq!(dfa.states()[0].labels(), ["q0"]);
		assert!(!dfa.states()[0].is_final());
		assert!(!dfa.simulate(&word("")));
		assert!(dfa.simulate(&word("a")));
	}

	#[test]
	fn layout() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		// {A,B} -0-> {A,B}, {A,B} -1-> {B}; {B} has no moves.
		assert_eq!(dfa.len(), 2);
		assert_eq!(dfa.number_of_transitions(), 2);
		assert_eq!(dfa.transition(0, &Symbol::from('0')), Some(0));
		assert_eq!(dfa.transition(0, &Symbol::from('1')), Some(1));
		assert!(dfa.states()[1].transitions().is_empty());
		assert_eq!(dfa.final_states().collect::<Vec<_>>(), vec![0, 1]);
	}

	#[test]
	fn subsets() {
		// Classic "second to last symbol is 1".
		let nfa: Nfa = NfaBuilder::new()
			.state("p")
			.state("q")
			.state("r")
			.start("p")
			.final_state("r")
			.transition("p", Symbol::from('0'), "p")
			.transition("p", Symbol::from('1'), "p")
			.transition("p", Symbol::from('1'), "q")
			.transition("q", Symbol::from('0'), "r")
			.transition("q", Symbol::from('1'), "r")
			.build()
			.unwrap();
		let dfa: Dfa = Dfa::determinization(&nfa);
		assert_eq!(dfa.len(), 4);
		let names: Vec<String> = dfa.states().iter().map(DfaState::name).collect::<Vec<_>>();
		assert_eq!(names, ["p", "pq", "pr", "pqr"]);
		assert!(dfa.simulate(&word("10")));
		assert!(dfa.simulate(&word("0011")));
		assert!(!dfa.simulate(&word("01")));
		assert!(!dfa.simulate(&word("1")));
	}

	#[test]
	fn every_target_is_a_state() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		for state in dfa.states() {
			for &target in state.transitions().values() {
				assert!(target < dfa.len());
			}
			assert_eq!(dfa.state_for(state.kernel()).map(|i| &dfa.states()[i]), Some(state));
		}
	}

	#[test]
	fn deterministic() {
		let nfa: Nfa = scenario();
		assert_eq!(Dfa::determinization(&nfa), Dfa::determinization(&nfa));
	}

	#[test]
	fn batch_preserves_order() {
		let dfa: Dfa = Dfa::determinization(&scenario());
		let words: Vec<Word> = ["", "1", "9", "0001", "11"]
			.iter()
			.map(|s| Word::from_chars(s))
			.collect::<Vec<_>>();
		let verdicts: Vec<Verdict<'_>> = dfa.simulate_all(&words);
		let projection: Vec<(&str, bool)> = verdicts
			.iter()
			.map(|v| (v.word.literal(), v.accepted))
			.collect::<Vec<_>>();
		assert_eq!(
			projection,
			vec![("", true), ("1", true), ("9", false), ("0001", true), ("11", false)]
		);
		assert_eq!(
			verdicts.iter().filter(|v| v.is_ok()).count(),
			3
		);
	}

	#[derive(Debug, Clone)]
	struct RandomNfa {
		states: usize,
		finals: Vec<bool>,
		transitions: Vec<(usize, Option<char>, usize)>,
	}

	impl RandomNfa {
		fn build(&self) -> Nfa {
			let mut builder: NfaBuilder = NfaBuilder::new();
			for i in 0..self.states {
				builder.state(format!("s{i}"));
				if self.finals[i] {
					builder.final_state(format!("s{i}"));
				}
			}
			builder.start("s0");
			for &(source, label, target) in self.transitions.iter() {
				match label {
					Some(ch) => builder.transition(format!("s{source}"), Symbol::from(ch), format!("s{target}")),
					None => builder.epsilon(format!("s{source}"), format!("s{target}")),
				};
			}
			builder.build().unwrap()
		}

		/// Epsilon closure computed as a fixpoint over the raw edge list.
		fn closure(&self, mut set: BTreeSet<usize>) -> BTreeSet<usize> {
			loop {
				let before: usize = set.len();
				for &(source, label, target) in self.transitions.iter() {
					if label.is_none() && set.contains(&source) {
						set.insert(target);
					}
				}
				if set.len() == before {
					return set;
				}
			}
		}

		/// Acceptance straight from the edge list, sharing no code with [`Nfa`].
		fn accepts(&self, word: &[char]) -> bool {
			let mut current: BTreeSet<usize> = self.closure(BTreeSet::from([0]));
			for &ch in word {
				let moved: BTreeSet<usize> = self
					.transitions
					.iter()
					.filter(|&&(source, label, _)| label == Some(ch) && current.contains(&source))
					.map(|&(_, _, target)| target)
					.collect::<BTreeSet<_>>();
				current = self.closure(moved);
			}
			current.iter().any(|&state| self.finals[state])
		}
	}

	fn arb_nfa() -> impl Strategy<Value = RandomNfa> {
		(1usize..=5).prop_flat_map(|states| {
			let label = prop_oneof![Just(None), Just(Some('a')), Just(Some('b'))];
			(
				prop::collection::vec(any::<bool>(), states),
				prop::collection::vec((0..states, label, 0..states), 0..12),
			)
				.prop_map(move |(finals, transitions)| RandomNfa {
					states,
					finals,
					transitions,
				})
		})
	}

	fn arb_word() -> impl Strategy<Value = Vec<char>> {
		prop::collection::vec(prop_oneof![Just('a'), Just('b'), Just('c')], 0..7)
	}

	proptest! {
		#[test]
		fn same_language(random in arb_nfa(), words in prop::collection::vec(arb_word(), 1..8)) {
			let nfa: Nfa = random.build();
			let dfa: Dfa = Dfa::determinization(&nfa);
			for chars in words.iter() {
				let word: Vec<Symbol> = chars.iter().copied().map(Symbol::from).collect::<Vec<_>>();
				prop_assert_eq!(random.accepts(chars), dfa.simulate(&word), "word {:?}", chars);
				prop_assert_eq!(nfa.simulate(&word), dfa.simulate(&word), "word {:?}", chars);
			}
		}

		#[test]
		fn closure_is_idempotent(random in arb_nfa(), seeds in prop::collection::vec(0usize..5, 1..4)) {
			let nfa: Nfa = random.build();
			let seeds: Vec<NfaIdx> = seeds
				.into_iter()
				.filter(|&i| i < nfa.len())
				.map(NfaIdx::new)
				.collect::<Vec<_>>();
			let once: Kernel = nfa.epsilon_closure(seeds);
			let twice: Kernel = nfa.epsilon_closure(once.iter());
			prop_assert_eq!(once, twice);
		}

		#[test]
		fn transitions_exist_iff_step_is_nonempty(random in arb_nfa()) {
			let nfa: Nfa = random.build();
			let dfa: Dfa = Dfa::determinization(&nfa);
			prop_assert!(dfa.len() <= 1 << nfa.len());
			for (i, state) in dfa.states().iter().enumerate() {
				for symbol in nfa.alphabet().iter() {
					let step: Kernel = nfa.step_on_symbol(state.kernel(), symbol);
					match dfa.transition(i, symbol) {
						Some(target) => {
							prop_assert_eq!(dfa.states()[target].kernel(), &step);
						},
						None => {
							prop_assert!(step.is_empty());
						},
					}
				}
				prop_assert_eq!(state.is_final(), nfa.is_accepting(state.kernel()));
			}
		}
	}
}

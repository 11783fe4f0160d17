use crate::nfa::NfaIdx;

/// A set of NFA states in canonical form: sorted and duplicate free.
///
/// Two kernels with the same members are structurally equal no matter in
/// which order the members were discovered, which is what lets a kernel act
/// as the identity of a DFA state.
#[derive(Debug, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Kernel(Vec<NfaIdx>);

impl Kernel {
	pub fn new<I>(states: I) -> Self
	where
		I: IntoIterator<Item = NfaIdx>,
	{
		let mut states: Vec<NfaIdx> = states.into_iter().collect::<Vec<_>>();
		states.sort_unstable();
		states.dedup();
		Self(states)
	}

	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn contains(&self, state: NfaIdx) -> bool {
		self.0.binary_search(&state).is_ok()
	}

	pub fn iter(&self) -> impl Iterator<Item = NfaIdx> + '_ {
		self.0.iter().copied()
	}

	pub fn as_slice(&self) -> &[NfaIdx] {
		&self.0
	}
}

impl FromIterator<NfaIdx> for Kernel {
	fn from_iter<I: IntoIterator<Item = NfaIdx>>(iter: I) -> Self {
		Self::new(iter)
	}
}

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::description::DEFAULT_EPSILON;
use crate::dfa::Dfa;
use crate::dfa::DfaState;
use crate::dfa::Verdict;
use crate::pipeline::determinize_description;
use crate::report::DfaDescription;
use crate::symbol::Word;

pyo3::create_exception!(determinizer, DeterminizerException, PyRuntimeError);
pyo3::create_exception!(determinizer, InvalidAutomatonDescription, DeterminizerException);

#[pyclass]
#[derive(Debug)]
struct Automaton {
	dfa: Dfa,
}

#[pymethods]
impl Automaton {
	#[staticmethod]
	#[pyo3(signature = (description, epsilon = DEFAULT_EPSILON))]
	fn from_description(description: &str, epsilon: &str) -> PyResult<Self> {
		let dfa: Dfa = determinize_description(description, epsilon)
			.map_err(|err| InvalidAutomatonDescription::new_err(err.to_string()))?;
		Ok(Self { dfa })
	}

	/// Every character of `word` is one symbol.
	fn accepts(&self, word: &str) -> bool {
		self.dfa.simulate(Word::from_chars(word).symbols())
	}

	fn accepts_all(&self, py: Python<'_>, words: Vec<String>) -> Vec<bool> {
		let words: Vec<Word> = words.iter().map(|word| Word::from_chars(word)).collect::<Vec<_>>();
		py.detach(|| {
			self.dfa
				.simulate_all(&words)
				.iter()
				.map(|verdict: &Verdict<'_>| verdict.accepted)
				.collect::<Vec<_>>()
		})
	}

	fn states(&self) -> Vec<String> {
		self.dfa.states().iter().map(DfaState::name).collect::<Vec<_>>()
	}

	fn describe(&self) -> String {
		DfaDescription(&self.dfa).to_string()
	}

	fn __len__(&self) -> usize {
		self.dfa.len()
	}
}

#[pymodule]
mod determinizer {
	use pyo3::prelude::*;

	#[pymodule_export]
	use super::Automaton;

	#[pymodule_init]
	fn init(m: &Bound<'_, PyModule>) -> PyResult<()> {
		let py: Python<'_> = m.py();
		m.add("DeterminizerException", py.get_type::<super::DeterminizerException>())?;
		m.add(
			"InvalidAutomatonDescription",
			py.get_type::<super::InvalidAutomatonDescription>(),
		)?;
		Ok(())
	}
}

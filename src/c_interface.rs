use std::ffi::c_char;
use std::marker::PhantomData;
use std::str::Utf8Error;

use crate::dfa::Dfa;
use crate::pipeline::determinize_description;
use crate::symbol::Word;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CSlice<'lifetime, T> {
	pointer: *const T,
	length: usize,
	_lifetime: PhantomData<&'lifetime [T]>,
}

pub type CStringView<'lifetime> = CSlice<'lifetime, c_char>;

/// Returns null if `description` is not UTF-8, is malformed,
/// or references an undeclared state.
#[unsafe(no_mangle)]
unsafe extern "C" fn nfa_determinizer_dfa_from_description(
	description: CStringView<'_>,
	epsilon: CStringView<'_>,
) -> Option<Box<Dfa>> {
	let description: &str = description.as_utf8().ok()?;
	let epsilon: &str = epsilon.as_utf8().ok()?;
	match determinize_description(description, epsilon) {
		Ok(dfa) => Some(Box::new(dfa)),
		Err(err) => {
			debug!("rejecting automaton description: {err}");
			None
		},
	}
}

#[unsafe(no_mangle)]
unsafe extern "C" fn nfa_determinizer_dfa_delete(dfa: Box<Dfa>) {
	std::mem::drop(dfa);
}

/// Every character of `word` is one symbol; invalid UTF-8 is rejected.
#[unsafe(no_mangle)]
unsafe extern "C" fn nfa_determinizer_dfa_accepts(dfa: &Dfa, word: CStringView<'_>) -> bool {
	let Ok(word): Result<&str, Utf8Error> = word.as_utf8() else {
		return false;
	};
	dfa.simulate(Word::from_chars(word).symbols())
}

#[unsafe(no_mangle)]
unsafe extern "C" fn nfa_determinizer_dfa_number_of_states(dfa: &Dfa) -> usize {
	dfa.len()
}

impl<'lifetime, T> CSlice<'lifetime, T> {
	pub fn as_slice(&self) -> &'lifetime [T] {
		if self.length == 0 {
			return &[];
		}
		unsafe { std::slice::from_raw_parts(self.pointer, self.length) }
	}
}

impl<'lifetime> CStringView<'lifetime> {
	pub fn from_utf8(utf8: &'lifetime str) -> Self {
		Self {
			pointer: utf8.as_bytes().as_ptr().cast::<c_char>(),
			length: utf8.len(),
			_lifetime: PhantomData,
		}
	}

	pub fn as_utf8(&self) -> Result<&'lifetime str, Utf8Error> {
		if self.length == 0 {
			return Ok("");
		}
		let bytes: &[u8] = unsafe { std::slice::from_raw_parts(self.pointer.cast::<u8>(), self.length) };
		std::str::from_utf8(bytes)
	}
}

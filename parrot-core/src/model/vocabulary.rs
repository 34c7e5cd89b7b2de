use std::collections::HashMap;

use crate::error::{ParrotError, Result};

/// Reserved token of the initial state (index 0).
pub const START_TOKEN: &str = "$tart";

/// Reserved token of the absorbing terminal state (last index).
pub const STOP_TOKEN: &str = "$top";

/// Ordered set of distinct tokens where position = state index.
///
/// ## Invariants
/// - The first entry is [`START_TOKEN`]
/// - Once sealed, the last entry is [`STOP_TOKEN`]
/// - Every entry appears exactly once and `index` mirrors `tokens`
#[derive(Clone, Debug)]
pub struct Vocabulary {
	/// Tokens in order of first appearance.
	tokens: Vec<String>,
	/// Reverse mapping token -> index, also used as the "seen" set.
	index: HashMap<String, usize>,
}

impl Vocabulary {
	/// Creates an open vocabulary holding only the start sentinel.
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		let mut vocabulary = Self {
			tokens: Vec::with_capacity(capacity),
			index: HashMap::with_capacity(capacity),
		};
		vocabulary.push(START_TOKEN);
		vocabulary
	}

	fn push(&mut self, token: &str) -> usize {
		let id = self.tokens.len();
		self.tokens.push(token.to_owned());
		self.index.insert(token.to_owned(), id);
		id
	}

	/// Registers a token and returns its state index.
	///
	/// First-seen tokens are appended; known tokens keep their index.
	///
	/// # Errors
	/// Returns `ReservedToken` if the token equals a sentinel string.
	pub(crate) fn register(&mut self, token: &str) -> Result<usize> {
		if token == START_TOKEN || token == STOP_TOKEN {
			return Err(ParrotError::ReservedToken(token.to_owned()));
		}
		if let Some(&id) = self.index.get(token) {
			return Ok(id);
		}
		Ok(self.push(token))
	}

	/// Appends the stop sentinel, freezing the vocabulary.
	pub(crate) fn seal(mut self) -> Self {
		self.push(STOP_TOKEN);
		self
	}

	/// Number of states, sentinels included.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Always `false`: the start sentinel is present from creation.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Returns the token of a state, if the index is in range.
	pub fn token(&self, index: usize) -> Option<&str> {
		self.tokens.get(index).map(String::as_str)
	}

	/// Returns the state index of a token.
	///
	/// # Errors
	/// Returns `UnknownToken` if the token was never registered.
	pub fn index_of(&self, token: &str) -> Result<usize> {
		self.index.get(token).copied().ok_or_else(|| ParrotError::UnknownToken(token.to_owned()))
	}

	/// Iterates over tokens in state order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

use super::vocabulary::Vocabulary;
use crate::error::Result;

/// Raw transition counts of a chain under construction.
///
/// Counts are stored column-major: the column of a "from" state is a
/// contiguous run of `size` cells indexed by the "to" state.
///
/// ## Invariants
/// - `counts.len() == size * size`
/// - The last index (`size - 1`) is reserved for the stop sentinel
#[derive(Clone, Debug)]
pub(crate) struct TransitionCounter {
	size: usize,
	counts: Vec<u64>,
}

impl TransitionCounter {
	/// Creates a zero-filled square counter for `size` states.
	pub(crate) fn new(size: usize) -> Self {
		Self { size, counts: vec![0; size * size] }
	}

	pub(crate) fn size(&self) -> usize {
		self.size
	}

	/// Index of the stop sentinel, known before the vocabulary is sealed.
	pub(crate) fn stop(&self) -> usize {
		self.size - 1
	}

	/// Records one observation of `from -> to`.
	pub(crate) fn increment(&mut self, from: usize, to: usize) {
		self.counts[from * self.size + to] += 1;
	}

	/// Number of times `from -> to` was observed.
	#[cfg(test)]
	pub(crate) fn count(&self, to: usize, from: usize) -> u64 {
		self.counts[from * self.size + to]
	}

	/// Counts of every transition out of `from`.
	pub(crate) fn column(&self, from: usize) -> &[u64] {
		&self.counts[from * self.size..(from + 1) * self.size]
	}

	/// Mutable view of the column of a "from" state.
	pub(crate) fn column_mut(&mut self, from: usize) -> &mut [u64] {
		&mut self.counts[from * self.size..(from + 1) * self.size]
	}

	/// Registers the tokens of a sentence and counts its transitions.
	///
	/// Counts `start -> first`, every consecutive pair, then `last -> stop`.
	/// Empty sentences contribute nothing.
	///
	/// # Errors
	/// Returns `ReservedToken` if a token equals a sentinel string.
	pub(crate) fn add_sentence<T: AsRef<str>>(&mut self, vocabulary: &mut Vocabulary, sentence: &[T]) -> Result<()> {
		if sentence.is_empty() {
			return Ok(());
		}

		let mut previous = 0;
		for token in sentence {
			let current = vocabulary.register(token.as_ref())?;
			debug_assert!(current < self.stop(), "vocabulary outgrew the pre-scanned size");
			self.increment(previous, current);
			previous = current;
		}
		self.increment(previous, self.stop());

		Ok(())
	}
}

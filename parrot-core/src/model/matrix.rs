use super::counter::TransitionCounter;
use super::vocabulary::Vocabulary;
use crate::error::{ParrotError, Result};

/// Column-stochastic transition matrix indexed `[to, from]`.
///
/// Column `c` holds the distribution over next states given current state
/// `c`, stored contiguously so a sampler can borrow it as a slice.
///
/// ## Invariants
/// - Every column sums to 1.0 (within floating tolerance)
/// - The stop column is one-hot on the stop state (absorbing)
#[derive(Clone, Debug)]
pub(crate) struct TransitionMatrix {
	size: usize,
	probabilities: Vec<f64>,
}

impl TransitionMatrix {
	/// Normalizes raw counts into per-column probability distributions.
	///
	/// The stop column is first forced to a single self-loop count so the
	/// chain is absorbing at stop.
	///
	/// # Errors
	/// Returns `MalformedModel` for the first state whose column sums to zero.
	/// No fallback distribution is substituted.
	pub(crate) fn normalize(mut counter: TransitionCounter, vocabulary: &Vocabulary) -> Result<Self> {
		let size = counter.size();
		let stop = counter.stop();

		let stop_column = counter.column_mut(stop);
		stop_column.fill(0);
		stop_column[stop] = 1;

		let mut probabilities = Vec::with_capacity(size * size);
		for from in 0..size {
			let column = counter.column(from);
			let total: u64 = column.iter().sum();
			if total == 0 {
				return Err(ParrotError::MalformedModel {
					state: from,
					token: vocabulary.token(from).unwrap_or_default().to_owned(),
				});
			}

			let total = total as f64;
			probabilities.extend(column.iter().map(|&count| count as f64 / total));
		}

		Ok(Self { size, probabilities })
	}

	pub(crate) fn size(&self) -> usize {
		self.size
	}

	/// Distribution over next states given `from`.
	pub(crate) fn column(&self, from: usize) -> &[f64] {
		&self.probabilities[from * self.size..(from + 1) * self.size]
	}

	/// Probability of `from -> to`.
	pub(crate) fn get(&self, to: usize, from: usize) -> f64 {
		self.probabilities[from * self.size + to]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn build(sentences: &[&[&str]], size: usize) -> (TransitionCounter, Vocabulary) {
		let mut vocabulary = Vocabulary::with_capacity(size);
		let mut counter = TransitionCounter::new(size);
		for sentence in sentences {
			counter.add_sentence(&mut vocabulary, sentence).unwrap();
		}
		(counter, vocabulary.seal())
	}

	#[test]
	fn columns_sum_to_one() {
		let (counter, vocabulary) = build(&[&["a", "b", "a"], &["b", "c"], &["a", "c", "c"]], 5);
		let matrix = TransitionMatrix::normalize(counter, &vocabulary).unwrap();

		for from in 0..matrix.size() {
			let sum: f64 = matrix.column(from).iter().sum();
			assert!((sum - 1.0).abs() < 1e-9, "column {from} sums to {sum}");
		}
	}

	#[test]
	fn repeated_token_splits_probability() {
		let (counter, vocabulary) = build(&[&["a", "a", "a"]], 3);
		let matrix = TransitionMatrix::normalize(counter, &vocabulary).unwrap();

		assert!((matrix.get(1, 1) - 2.0 / 3.0).abs() < 1e-12);
		assert!((matrix.get(2, 1) - 1.0 / 3.0).abs() < 1e-12);
		assert_eq!(matrix.get(1, 0), 1.0);
	}

	#[test]
	fn stop_column_is_absorbing() {
		let (counter, vocabulary) = build(&[&["x", "y"]], 4);
		let matrix = TransitionMatrix::normalize(counter, &vocabulary).unwrap();

		assert_eq!(matrix.column(3), &[0.0, 0.0, 0.0, 1.0]);
	}

	#[test]
	fn zero_column_is_malformed() {
		// Sized for one more word than the corpus actually holds
		let (counter, _) = build(&[&["x"]], 4);
		let vocabulary = {
			let mut vocabulary = Vocabulary::with_capacity(4);
			vocabulary.register("x").unwrap();
			vocabulary.register("ghost").unwrap();
			vocabulary.seal()
		};

		match TransitionMatrix::normalize(counter, &vocabulary) {
			Err(ParrotError::MalformedModel { state, token }) => {
				assert_eq!(state, 2);
				assert_eq!(token, "ghost");
			}
			other => panic!("expected MalformedModel, got {other:?}"),
		}
	}
}

use crate::error::{ParrotError, Result};

/// Input parameters for babbling a sentence from a chain model.
///
/// # Responsibilities
/// - Bound the random walk (`max_steps`), unbounded by default
/// - Control how hard generation tries to avoid parroting a training
///   sentence verbatim (`nb_try`)
///
/// # Invariants
/// - `max_steps` is either `None` or strictly positive
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BabbleInput {
	/// Number of extra attempts made when the generated sentence already
	/// exists in the training corpus. 0 accepts the first sentence.
	pub nb_try: usize,

	/// Maximum number of transitions drawn per walk, the final draw into
	/// the stop state included.
	max_steps: Option<usize>,
}

impl BabbleInput {
	/// Creates an input with no step bound and no retry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current step bound.
	pub fn max_steps(&self) -> Option<usize> {
		self.max_steps
	}

	/// Sets the step bound (`None` = unbounded).
	///
	/// # Errors
	/// Returns an error if the bound is zero.
	pub fn set_max_steps(&mut self, max_steps: Option<usize>) -> Result<()> {
		if max_steps == Some(0) {
			return Err(ParrotError::InvalidConfig("max_steps must be greater than 0".to_owned()));
		}
		self.max_steps = max_steps;
		Ok(())
	}
}

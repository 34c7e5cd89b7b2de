use log::warn;
use rand::Rng;

use super::babble_input::BabbleInput;
use super::categorical;
use super::chain::ChainModel;
use crate::error::{ParrotError, Result};

/// Random walk over a trained chain, from the start state to the stop state.
///
/// The model is only read, so any number of samplers may share it; each
/// caller supplies its own random source.
#[derive(Clone, Copy, Debug)]
pub struct Sampler<'a> {
	model: &'a ChainModel,
	max_steps: Option<usize>,
}

impl<'a> Sampler<'a> {
	pub fn new(model: &'a ChainModel, input: &BabbleInput) -> Self {
		Self { model, max_steps: input.max_steps() }
	}

	/// Walks the chain and returns the visited states.
	///
	/// Each step draws the next state from the column of the current one.
	/// The walk ends on the first draw of the stop state, which is not part
	/// of the returned path; the start state never is either. An immediate
	/// draw of stop yields an empty path.
	///
	/// # Errors
	/// - `GenerationTimeout` if `max_steps` draws did not reach stop
	/// - `MalformedModel` if a visited column has no mass
	pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<usize>> {
		let stop = self.model.stop_state();
		let mut current = self.model.start_state();
		let mut path = Vec::new();
		let mut steps = 0;

		loop {
			if let Some(max_steps) = self.max_steps {
				if steps >= max_steps {
					warn!("Walk stopped after {} steps without reaching the stop state", steps);
					return Err(ParrotError::GenerationTimeout { steps });
				}
			}

			let next = self
				.model
				.column(current)
				.and_then(|column| categorical::sample(column, rng))
				.ok_or_else(|| ParrotError::MalformedModel {
					state: current,
					token: self.model.token(current).unwrap_or_default().to_owned(),
				})?;
			steps += 1;

			if next == stop {
				break;
			}
			path.push(next);
			current = next;
		}

		Ok(path)
	}

	/// Walks the chain and maps the path to its tokens.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<&'a str>> {
		let model = self.model;
		Ok(self
			.walk(rng)?
			.into_iter()
			.filter_map(|state| model.token(state))
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::vocabulary::{START_TOKEN, STOP_TOKEN};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn deterministic_sentence_is_reproduced() {
		let model = ChainModel::train(&[vec!["the", "cat", "sat"]]).unwrap();
		let sampler = Sampler::new(&model, &BabbleInput::new());
		let mut rng = StdRng::seed_from_u64(3);

		for _ in 0..100 {
			assert_eq!(sampler.generate(&mut rng).unwrap(), vec!["the", "cat", "sat"]);
		}
	}

	#[test]
	fn walks_terminate_without_sentinels() {
		let corpus = vec![
			vec!["i", "am", "a", "parrot"],
			vec!["a", "parrot", "am", "i"],
			vec!["i", "i", "i"],
			vec!["parrot"],
		];
		let model = ChainModel::train(&corpus).unwrap();
		let sampler = Sampler::new(&model, &BabbleInput::new());
		let mut rng = StdRng::seed_from_u64(10_000);

		for _ in 0..10_000 {
			let path = sampler.walk(&mut rng).unwrap();
			assert!(path.iter().all(|&state| state != model.start_state() && state != model.stop_state()));

			let tokens = sampler.generate(&mut rng).unwrap();
			assert!(!tokens.is_empty());
			assert!(tokens.iter().all(|&t| t != START_TOKEN && t != STOP_TOKEN));
		}
	}

	#[test]
	fn step_bound_times_out() {
		// "the cat sat" needs four draws: three words then stop
		let model = ChainModel::train(&[vec!["the", "cat", "sat"]]).unwrap();
		let mut input = BabbleInput::new();
		let mut rng = StdRng::seed_from_u64(0);

		input.set_max_steps(Some(3)).unwrap();
		let result = Sampler::new(&model, &input).walk(&mut rng);
		assert!(matches!(result, Err(ParrotError::GenerationTimeout { steps: 3 })));

		input.set_max_steps(Some(4)).unwrap();
		assert_eq!(Sampler::new(&model, &input).walk(&mut rng).unwrap(), vec![1, 2, 3]);
	}
}

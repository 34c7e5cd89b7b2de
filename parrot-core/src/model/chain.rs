use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};
use rand::Rng;

use super::babble_input::BabbleInput;
use super::counter::TransitionCounter;
use super::matrix::TransitionMatrix;
use super::sampler::Sampler;
use super::vocabulary::Vocabulary;
use crate::error::Result;
use crate::io::{read_file, split_sentences};

/// First-order Markov chain over words, trained from a corpus of sentences.
///
/// A `ChainModel` bundles the sealed vocabulary with the normalized
/// transition matrix. Both are immutable once training returns, so a model
/// can be shared freely between readers without locking.
///
/// ## State layout
/// - index 0: start sentinel, the only initial state
/// - index `state_count() - 1`: stop sentinel, absorbing
/// - everything between: corpus words in order of first appearance
#[derive(Clone, Debug)]
pub struct ChainModel {
	vocabulary: Vocabulary,
	transitions: TransitionMatrix,
	/// Training sentences joined by single spaces.
	sentences: HashSet<String>,
}

impl ChainModel {
	/// Trains a model from tokenized sentences.
	///
	/// A pre-scan of distinct tokens sizes the matrix; one pass per
	/// sentence then registers new words and counts transitions together.
	/// Empty sentences are skipped.
	///
	/// # Errors
	/// - `ReservedToken` if a token equals a sentinel string
	/// - `MalformedModel` if a non-terminal state has no outgoing transition
	///   (an empty corpus leaves the start state without one)
	pub fn train<S, T>(corpus: &[S]) -> Result<Self>
	where
		S: AsRef<[T]>,
		T: AsRef<str>,
	{
		let unique: HashSet<&str> = corpus
			.iter()
			.flat_map(|sentence| sentence.as_ref().iter().map(|token| token.as_ref()))
			.collect();
		let size = unique.len() + 2;

		let mut vocabulary = Vocabulary::with_capacity(size);
		let mut counter = TransitionCounter::new(size);
		let mut sentences = HashSet::new();

		for sentence in corpus {
			let tokens = sentence.as_ref();
			if tokens.is_empty() {
				continue;
			}
			counter.add_sentence(&mut vocabulary, tokens)?;
			sentences.insert(tokens.iter().map(|token| token.as_ref()).collect::<Vec<&str>>().join(" "));
		}

		let vocabulary = vocabulary.seal();
		let transitions = TransitionMatrix::normalize(counter, &vocabulary)?;
		debug!("Trained chain with {} states from {} distinct sentences", vocabulary.len(), sentences.len());

		Ok(Self { vocabulary, transitions, sentences })
	}

	/// Trains a model from raw text holding one sentence per line.
	///
	/// Blank lines are dropped and words are split on whitespace.
	pub fn from_text(text: &str) -> Result<Self> {
		Self::train(&split_sentences(text))
	}

	/// Reads a UTF-8 corpus file and trains a model from it.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let text = read_file(&filepath)?;
		info!("Training chain from {}", filepath.as_ref().display());
		Self::from_text(&text)
	}

	/// Number of states, sentinels included.
	pub fn state_count(&self) -> usize {
		self.vocabulary.len()
	}

	pub fn start_state(&self) -> usize {
		0
	}

	pub fn stop_state(&self) -> usize {
		self.vocabulary.len() - 1
	}

	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Token of a state, `None` if the index is out of range.
	pub fn token(&self, index: usize) -> Option<&str> {
		self.vocabulary.token(index)
	}

	/// State index of a token.
	///
	/// # Errors
	/// Returns `UnknownToken` if the token is not in the vocabulary.
	pub fn index_of(&self, token: &str) -> Result<usize> {
		self.vocabulary.index_of(token)
	}

	/// Distribution over next states given `from`, `None` if the index is
	/// out of range.
	pub fn column(&self, from: usize) -> Option<&[f64]> {
		(from < self.transitions.size()).then(|| self.transitions.column(from))
	}

	/// Probability of moving from state `from` to state `to`, `None` if
	/// either index is out of range.
	pub fn probability(&self, to: usize, from: usize) -> Option<f64> {
		let size = self.transitions.size();
		(to < size && from < size).then(|| self.transitions.get(to, from))
	}

	/// Reachable next tokens of `token` with their probabilities.
	///
	/// # Errors
	/// Returns `UnknownToken` if the token is not in the vocabulary.
	pub fn next_states(&self, token: &str) -> Result<Vec<(&str, f64)>> {
		let from = self.index_of(token)?;
		Ok(self
			.transitions
			.column(from)
			.iter()
			.enumerate()
			.filter(|(_, probability)| **probability > 0.0)
			.filter_map(|(to, probability)| self.token(to).map(|t| (t, *probability)))
			.collect())
	}

	/// Returns `true` if `sentence` (words joined by single spaces) was
	/// part of the training corpus.
	pub fn contains_sentence(&self, sentence: &str) -> bool {
		self.sentences.contains(sentence)
	}

	/// Generates one sentence as a sequence of tokens.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, input: &BabbleInput) -> Result<Vec<&str>> {
		Sampler::new(self, input).generate(rng)
	}

	/// Generates a sentence joined by single spaces, avoiding training
	/// sentences when possible.
	///
	/// # Behavior
	/// - Retries up to `nb_try` times while the sentence exists in the corpus
	/// - Returns the last attempt if every retry was a duplicate
	/// - A failed retry ends the retries and keeps the last sentence
	///
	/// # Errors
	/// Only a failure of the first attempt is returned.
	pub fn babble<R: Rng + ?Sized>(&self, rng: &mut R, input: &BabbleInput) -> Result<String> {
		let sampler = Sampler::new(self, input);
		let mut sentence = sampler.generate(rng)?.join(" ");
		let mut nb_try = input.nb_try;

		while nb_try > 0 && self.contains_sentence(&sentence) {
			match sampler.generate(rng) {
				Ok(tokens) => sentence = tokens.join(" "),
				Err(e) => {
					debug!("Keeping previous sentence after failed retry: {}", e);
					break;
				}
			}
			nb_try -= 1;
		}

		Ok(sentence)
	}
}

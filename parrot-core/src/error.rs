//! Error types for the parrot library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by training, lookups and generation.
///
/// Nothing in the library silently repairs a model: a state whose
/// transition column cannot be normalized, a token outside the vocabulary
/// or a walk that never reaches the stop state are all reported to the
/// caller of the failing operation.
#[derive(Error, Debug)]
pub enum ParrotError {
	/// A non-terminal state has no outgoing transition after counting.
	#[error("Malformed model: state {state} ('{token}') has no outgoing transition")]
	MalformedModel { state: usize, token: String },

	/// Lookup of a token that is not in the vocabulary.
	#[error("Unknown token: {0}")]
	UnknownToken(String),

	/// The random walk did not reach the stop state within the step bound.
	#[error("Generation timeout: stop state not reached after {steps} steps")]
	GenerationTimeout { steps: usize },

	/// The corpus contains one of the reserved sentinel strings.
	#[error("Reserved token found in corpus: {0}")]
	ReservedToken(String),

	/// Invalid configuration value
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("Model {0} not found")]
	UnknownModel(String),

	#[error("Model {0} already loaded")]
	ModelAlreadyLoaded(String),

	/// I/O error with file context
	#[error("I/O error for {path}: {err}")]
	Io {
		path: PathBuf,
		#[source]
		err: std::io::Error,
	},
}

/// Result type alias for parrot operations.
pub type Result<T> = std::result::Result<T, ParrotError>;

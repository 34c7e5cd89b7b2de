//! First-order Markov chain text generation ("parrot speak").
//!
//! This crate learns word transitions from a corpus of sentences and
//! babbles new, statistically similar sentences:
//! - Vocabulary discovery with reserved start/stop sentinel states
//! - Transition counting and column normalization
//! - Random walks from the start state to the absorbing stop state
//! - A registry of named models loaded from a directory of corpora
//!
//! Only the high-level API is exposed publicly. Counting and numeric
//! helpers are kept internal so a model can only be built through training.

/// Markov chain construction and sampling.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{ParrotError, Result};

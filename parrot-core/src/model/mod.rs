//! Top-level module for the Markov chain system.
//!
//! This module provides:
//! - Vocabulary discovery with reserved sentinel states (`Vocabulary`)
//! - The trained, immutable chain (`ChainModel`)
//! - Random walks over a chain (`Sampler`)
//! - Generation parameters (`BabbleInput`)
//! - A registry of named models (`Parrot`)

/// Ordered vocabulary where position = state index.
///
/// Owns the start/stop sentinel tokens.
pub mod vocabulary;

/// Raw transition counts accumulated while reading sentences.
///
/// Not exposed.
mod counter;

/// Column normalization of counts into a column-stochastic matrix.
///
/// Not exposed.
mod matrix;

/// Single-trial categorical draw over a probability vector.
mod categorical;

/// Trained chain model: vocabulary + normalized transitions.
pub mod chain;

/// Random walk from the start state to the absorbing stop state.
pub mod sampler;

/// Generation parameters (step bound, duplicate avoidance).
pub mod babble_input;

/// Named models loaded from a directory of corpora.
pub mod parrot;

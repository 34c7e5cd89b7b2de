use std::collections::HashMap;
use std::path::Path;

use rand::Rng;

use super::babble_input::BabbleInput;
use super::chain::ChainModel;
use crate::error::{ParrotError, Result};
use crate::io;

/// Registry of named chain models, one per corpus file.
///
/// # Responsibilities
/// - Load every `.txt` corpus of a directory as a `ChainModel`
/// - Look models up by name (file stem)
/// - Babble from a named model
#[derive(Debug, Default)]
pub struct Parrot {
	models: HashMap<String, ChainModel>,
}

impl Parrot {
	/// Creates a parrot by training on every `.txt` corpus in a directory.
	///
	/// # Parameters
	/// - `filepath`: Path to a directory containing corpus files.
	///   Both `"folder"` and `"folder/"` are accepted.
	///
	/// # Errors
	/// - Returns an error if the path is not a directory.
	/// - Returns an error if a corpus fails to load or train.
	///
	/// # Notes
	/// - Only files directly contained in the directory are loaded
	///   (subdirectories are ignored).
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let mut parrot = Self::default();

		let path = filepath.as_ref();
		let folder = io::normalize_folder(&path.to_string_lossy());

		if !folder.is_dir() {
			return Err(ParrotError::InvalidConfig(format!("Expected a directory, got: {}", folder.display())));
		}

		for file in io::list_files(&folder, "txt")? {
			parrot.load_model(folder.join(&file))?;
		}

		Ok(parrot)
	}

	/// Returns the loaded model names, sorted.
	pub fn get_model_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.models.keys().cloned().collect();
		names.sort();
		names
	}

	/// Trains a model from a corpus file and registers it under its file stem.
	///
	/// # Errors
	/// Returns an error if the name is already taken, or if reading or
	/// training fails.
	pub fn load_model<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
		let key = io::get_filename(&filepath)?;
		if self.models.contains_key(&key) {
			return Err(ParrotError::ModelAlreadyLoaded(key));
		}
		let model = ChainModel::from_file(&filepath)?;
		self.models.insert(key, model);
		Ok(())
	}

	/// Registers an already trained model.
	///
	/// # Errors
	/// Returns an error if the name is already taken.
	pub fn insert_model(&mut self, name: &str, model: ChainModel) -> Result<()> {
		if self.models.contains_key(name) {
			return Err(ParrotError::ModelAlreadyLoaded(name.to_owned()));
		}
		self.models.insert(name.to_owned(), model);
		Ok(())
	}

	/// Returns a model by name.
	///
	/// # Errors
	/// Returns `UnknownModel` if no model has this name.
	pub fn model(&self, name: &str) -> Result<&ChainModel> {
		self.models.get(name).ok_or_else(|| ParrotError::UnknownModel(name.to_owned()))
	}

	/// Babbles one sentence from the named model.
	pub fn speak<R: Rng + ?Sized>(&self, name: &str, rng: &mut R, input: &BabbleInput) -> Result<String> {
		self.model(name)?.babble(rng, input)
	}
}

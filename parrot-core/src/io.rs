use std::fs;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::error::{ParrotError, Result};

/// Reads a UTF-8 text file into memory.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	fs::read_to_string(path).map_err(|err| ParrotError::Io { path: path.to_path_buf(), err })
}

/// Splits raw text into tokenized sentences.
///
/// - One sentence per line (`\n` / `\r\n`)
/// - Words are whitespace-delimited
/// - Blank lines are dropped
pub(crate) fn split_sentences(text: &str) -> Vec<Vec<&str>> {
	text.lines()
		.map(|line| line.split_whitespace().collect::<Vec<_>>())
		.filter(|words| !words.is_empty())
		.collect()
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/yoda.txt"` → `"yoda"`
/// - `"yoda.txt"` → `"yoda"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let path = input_path.as_ref();
	let stem = path.file_stem().ok_or_else(|| ParrotError::Io {
		path: path.to_path_buf(),
		err: io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"),
	})?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	let to_error = |err| ParrotError::Io { path: dir.to_path_buf(), err };
	let mut files = Vec::new();

	for entry in fs::read_dir(dir).map_err(to_error)? {
		let path = entry.map_err(to_error)?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

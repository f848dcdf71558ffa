use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use caret::{Fallback, WordList, WordSource};
use derive_more::From;
use thiserror::Error;

/// The name of the built-in word list
pub const DEFAULT_LIST: &str = "english";

#[derive(Debug, From, Error)]
pub enum SourceError {
    #[error("Failed to read word lists directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to read word list: {0}")]
    ReadFile(std::io::Error),

    #[error("Unknown word list '{0}'")]
    #[from(skip)]
    Unknown(String),
}

/// Read every `*.txt` file in `from_dir` as a word list named after the file.
///
/// Words are separated by whitespace. The directory is created if it is missing.
pub fn get_word_lists(from_dir: &Path) -> Result<BTreeMap<String, WordList>, SourceError> {
    if !from_dir.exists() {
        std::fs::create_dir_all(from_dir)?;
    }

    let files = from_dir
        .read_dir()
        .map_err(|error| SourceError::ReadDirectory {
            directory: from_dir.to_path_buf(),
            error,
        })?;

    let mut lists = BTreeMap::new();

    for entry in files {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }

        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let content = std::fs::read_to_string(&path)?;
        let list = WordList::new(name, content.split_whitespace());
        tracing::debug!(name, words = list.len(), "loaded word list");
        lists.insert(name.to_owned(), list);
    }

    Ok(lists)
}

/// Build the word source for a list name
///
/// User lists fall back to the built-in list if they cannot produce words. `None` selects
/// the built-in list, unless a user list shadows its name.
pub fn word_source(
    lists: &BTreeMap<String, WordList>,
    name: Option<&str>,
) -> Result<Box<dyn WordSource>, SourceError> {
    let name = name.unwrap_or(DEFAULT_LIST);

    match lists.get(name) {
        Some(list) => Ok(Box::new(Fallback::new(list.clone(), WordList::english()))),
        None if name == DEFAULT_LIST => Ok(Box::new(WordList::english())),
        None => Err(SourceError::Unknown(name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_txt_lists_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("animals.txt"), "Cat dog\n  bird\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "not a list").unwrap();

        let lists = get_word_lists(dir.path()).unwrap();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists["animals"].words(), ["cat", "dog", "bird"]);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lists");

        let lists = get_word_lists(&nested).unwrap();
        assert!(lists.is_empty());
        assert!(nested.exists());
    }

    #[test]
    fn test_word_source_selection() {
        let mut lists = BTreeMap::new();
        lists.insert("tiny".to_owned(), WordList::new("tiny", ["one"]));
        lists.insert("empty".to_owned(), WordList::new("empty", Vec::<String>::new()));

        let mut tiny = word_source(&lists, Some("tiny")).unwrap();
        assert_eq!(tiny.generate(2).unwrap(), ["one", "one"]);

        // An unusable list falls back to the built-in words
        let mut empty = word_source(&lists, Some("empty")).unwrap();
        assert_eq!(empty.generate(3).unwrap().len(), 3);

        let default = word_source(&lists, None).unwrap();
        assert_eq!(default.name(), DEFAULT_LIST);

        assert!(matches!(
            word_source(&lists, Some("missing")),
            Err(SourceError::Unknown(_))
        ));
    }
}

//! Word lists and Arabic normalization.
//!
//! The dictionary holds two immutable sets loaded at startup: a pool of
//! pickable 3-letter center words and a larger validity set used to test
//! whether a candidate word is legal. Both are read-only after loading and
//! can be shared by reference across all rooms without synchronization.

use std::{collections::HashSet, fs, path::Path};

use rand::seq::IndexedRandom;
use thiserror::Error;

use super::WORD_LEN;

/// The playable Arabic letters. Card faces and center-word letters are drawn
/// from this set.
pub const ALPHABET: [char; 29] = [
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ', 'ع',
    'غ', 'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي', 'ى',
];

/// Errors that can occur while loading word lists.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("validity word list is empty after normalization")]
    EmptyValiditySet,
    #[error("center word pool is empty after normalization")]
    EmptyCenterPool,
}

/// Canonicalize an Arabic word the same way the offline list-preparation
/// script does: strip diacritics and tatweel, fold hamza-carrier variants,
/// and drop whitespace. Runtime lookups must agree with the prepared lists.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}' => None,
            'أ' | 'إ' | 'آ' => Some('ا'),
            'ؤ' => Some('و'),
            'ئ' => Some('ى'),
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}

/// Two immutable word sets: a candidate pool of pickable center words and a
/// larger validity set.
#[derive(Debug)]
pub struct Dictionary {
    center_words: Vec<String>,
    valid: HashSet<String>,
}

impl Dictionary {
    /// Load the dictionary from two newline-delimited word lists.
    pub fn load(
        center_path: impl AsRef<Path>,
        valid_path: impl AsRef<Path>,
    ) -> Result<Self, DictionaryError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| DictionaryError::Io {
                path: path.display().to_string(),
                source,
            })
        };
        let center = read(center_path.as_ref())?;
        let valid = read(valid_path.as_ref())?;
        Self::from_word_lists(&center, &valid)
    }

    /// Build the dictionary from in-memory newline-delimited word lists.
    ///
    /// Entries are normalized, filtered to exactly [`WORD_LEN`] letters, and
    /// deduplicated. Center words not present in the validity set are
    /// dropped, which keeps the invariant that the center word is always a
    /// legal word.
    pub fn from_word_lists(center: &str, valid: &str) -> Result<Self, DictionaryError> {
        let valid: HashSet<String> = valid
            .lines()
            .map(normalize)
            .filter(|w| w.chars().count() == WORD_LEN)
            .collect();
        if valid.is_empty() {
            return Err(DictionaryError::EmptyValiditySet);
        }

        let mut seen = HashSet::new();
        let mut center_words = Vec::new();
        let mut dropped = 0usize;
        for word in center.lines().map(normalize) {
            if word.chars().count() != WORD_LEN || !seen.insert(word.clone()) {
                continue;
            }
            if valid.contains(&word) {
                center_words.push(word);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("dropped {dropped} center words missing from the validity set");
        }
        if center_words.is_empty() {
            return Err(DictionaryError::EmptyCenterPool);
        }

        log::info!(
            "dictionary loaded: {} center words, {} valid words",
            center_words.len(),
            valid.len()
        );
        Ok(Self {
            center_words,
            valid,
        })
    }

    /// Whether the given string is a legal word. The input is normalized
    /// before lookup.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.valid.contains(&normalize(word))
    }

    /// Pick a center word uniformly at random from the candidate pool.
    pub fn pick_center_word(&self) -> &str {
        self.center_words
            .choose(&mut rand::rng())
            .expect("center pool is non-empty by construction")
    }

    pub fn center_word_count(&self) -> usize {
        self.center_words.len()
    }

    pub fn valid_word_count(&self) -> usize {
        self.valid.len()
    }
}

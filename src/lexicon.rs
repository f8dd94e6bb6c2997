//! A word list built on [`Tree`]. It stores words only, no definitions, and answers word and
//! prefix queries.
//!
//! # Examples
//!
//! ```
//! use avl_bst::Lexicon;
//!
//! let mut lexicon: Lexicon = vec!["Apple", "apricot", "banana"].into_iter().collect();
//!
//! assert!(lexicon.contains_word("APPLE"));
//! assert!(lexicon.contains_prefix("ap"));
//! assert!(!lexicon.contains_prefix("c"));
//!
//! assert!(lexicon.remove("apple"));
//! assert_eq!(lexicon.iter().collect::<Vec<_>>(), ["apricot", "banana"]);
//! ```

use std::iter::FromIterator;

use crate::iter::Iter;
use crate::tree::Tree;

/// A case-insensitive set of words. Words are stored lowercased and iterate alphabetically.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: Tree<String>,
}

impl Lexicon {
    /// An empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct words.
    pub fn len(&self) -> usize {
        self.words.size()
    }

    /// Whether there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Adds `word`. Returns `false` if it was already present.
    pub fn add(&mut self, word: &str) -> bool {
        self.words.add(word.to_lowercase())
    }

    /// Removes `word`. Returns whether it was present.
    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&word.to_lowercase())
    }

    /// Whether `word` has been added.
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Whether any word starts with `prefix`. Every word starts with the empty prefix, so that
    /// only holds for a non-empty lexicon.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        // Words sharing a prefix sort right after the prefix itself.
        self.words
            .ceiling(&prefix)
            .map_or(false, |word| word.starts_with(&prefix))
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// The words in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// The tree the words are stored in.
    pub fn words(&self) -> &Tree<String> {
        &self.words
    }
}

impl<'a> Extend<&'a str> for Lexicon {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.add(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for Lexicon {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        lexicon.extend(iter);
        lexicon
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_case_insensitive() {
        let mut lexicon = Lexicon::new();

        assert!(lexicon.add("Doughnut"));
        assert!(!lexicon.add("DOUGHNUT"));
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.contains_word("doughnut"));
        assert!(!lexicon.contains_word("dough"));
    }

    #[test]
    fn prefixes() {
        let lexicon: Lexicon = vec!["fruit", "fry", "ball"].into_iter().collect();

        assert!(lexicon.contains_prefix("fru"));
        assert!(lexicon.contains_prefix("FRUIT"));
        assert!(lexicon.contains_prefix("b"));
        assert!(lexicon.contains_prefix(""));
        assert!(!lexicon.contains_prefix("fruits"));
        assert!(!lexicon.contains_prefix("a"));
        assert!(!lexicon.contains_prefix("z"));
    }

    #[test]
    fn empty_lexicon_has_no_prefixes() {
        let lexicon = Lexicon::new();

        assert!(lexicon.is_empty());
        assert!(!lexicon.contains_prefix(""));
    }

    #[test]
    fn clear_and_iterate() {
        let mut lexicon: Lexicon = vec!["b", "a"].into_iter().collect();
        assert_eq!((&lexicon).into_iter().collect::<Vec<_>>(), ["a", "b"]);

        lexicon.clear();
        assert_eq!(lexicon.iter().count(), 0);
        assert!(lexicon.words().is_empty());
    }
}

//! Records stored in the index.
//!
//! The index only needs two things from a record: the key it is ordered by and a
//! translation it can be searched by. Anything that can hand out those two strings
//! implements [`Record`]; [`Saying`] is the record this crate ships with.

use std::fmt;

/// A value that can be stored in a [`Tree`][crate::avl::Tree].
///
/// Ordering and uniqueness inside the tree are decided by [`key`][Record::key]
/// alone. Two records with the same key are duplicates no matter what their
/// translations say.
pub trait Record {
    /// The string the index is ordered by.
    fn key(&self) -> &str;

    /// The string searched by
    /// [`find_by_translation_substring`][crate::avl::Tree::find_by_translation_substring].
    fn translation(&self) -> &str;
}

/// A Hawaiian saying paired with its English translation.
///
/// # Examples
///
/// ```
/// use sayings::{Record, Saying};
///
/// let saying = Saying::new("aloha", "love, hello, goodbye");
///
/// assert_eq!(saying.key(), "aloha");
/// assert_eq!(saying.translation(), "love, hello, goodbye");
/// assert_eq!(saying.to_string(), "aloha: love, hello, goodbye");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Saying {
    hawaiian: String,
    english: String,
}

impl Saying {
    /// Pairs a Hawaiian phrase with its English translation.
    pub fn new(hawaiian: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            hawaiian: hawaiian.into(),
            english: english.into(),
        }
    }

    /// The Hawaiian phrase.
    pub fn hawaiian(&self) -> &str {
        &self.hawaiian
    }

    /// The English translation.
    pub fn english(&self) -> &str {
        &self.english
    }
}

impl Record for Saying {
    fn key(&self) -> &str {
        &self.hawaiian
    }

    fn translation(&self) -> &str {
        &self.english
    }
}

impl fmt::Display for Saying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.hawaiian, self.english)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_the_hawaiian_phrase() {
        let saying = Saying::new("mahalo nui", "thank you very much");

        assert_eq!(saying.key(), saying.hawaiian());
        assert_eq!(saying.translation(), saying.english());
    }

    #[test]
    fn keys_compare_independently_of_translation() {
        let a = Saying::new("ohana", "family");
        let b = Saying::new("ohana", "relatives");

        // Distinct values, but the same key as far as the index is concerned.
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
    }
}

use thiserror::Error as ThisError;

/// Result type used by fallible index operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by [`Tree`][crate::avl::Tree] mutations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A record with this key is already stored. The tree was not modified.
    #[error("a saying with key {key:?} is already present")]
    DuplicateKey {
        /// The rejected key.
        key: String,
    },
}

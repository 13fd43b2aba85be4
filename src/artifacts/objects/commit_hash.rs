//! Commit identifier as supplied by the commit source
//!
//! Unlike an on-disk object id, a commit hash handed to the layout engine is not
//! validated: sources may deliver full 40-character hashes, abbreviated hashes or
//! synthetic ids, and the engine only ever compares them for equality.

use serde::{Deserialize, Serialize};

/// Length of the abbreviated form shown next to graph rows
pub const SHORT_HASH_LENGTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitHash(String);

impl CommitHash {
    /// Get abbreviated form of the hash
    ///
    /// Hashes shorter than the abbreviation length are returned whole.
    pub fn to_short_hash(&self) -> &str {
        match self.0.char_indices().nth(SHORT_HASH_LENGTH) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl AsRef<str> for CommitHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitHash {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CommitHash {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CommitHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_takes_first_seven_characters() {
        let hash = CommitHash::from("0123456789abcdef0123456789abcdef01234567");
        assert_eq!(hash.to_short_hash(), "0123456");
    }

    #[test]
    fn short_hash_of_short_input_is_the_input() {
        assert_eq!(CommitHash::from("abc").to_short_hash(), "abc");
        assert_eq!(CommitHash::from("").to_short_hash(), "");
    }
}

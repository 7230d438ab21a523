//! Error type for positional structural operations.
//!
//! Every operation returning [`Error`] validates before mutating: on failure
//! nothing changes and no change event is fired.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An index addressed past the end of a collection.
    #[error("{collection} index {index} is out of bounds (length {len})")]
    IndexOutOfBounds {
        /// Which collection was addressed, e.g. `"atoms"`.
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// A full multiplier list did not match the number of set members.
    #[error("expected {expected} multipliers but {actual} were supplied")]
    MultiplierCountMismatch { expected: usize, actual: usize },
}

impl Error {
    pub fn index_out_of_bounds(collection: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            collection,
            index,
            len,
        }
    }

    pub fn multiplier_count_mismatch(expected: usize, actual: usize) -> Self {
        Self::MultiplierCountMismatch { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_collection() {
        let err = Error::index_out_of_bounds("bonds", 4, 2);
        assert_eq!(err.to_string(), "bonds index 4 is out of bounds (length 2)");
        let err = Error::multiplier_count_mismatch(3, 1);
        assert_eq!(err.to_string(), "expected 3 multipliers but 1 were supplied");
    }
}

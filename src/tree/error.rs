use crate::maybestd::fmt;

/// An error that occurred while building a tree or reading from one.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TreeError {
    /// No records were provided. A tree without leaves has no root.
    InvalidInput,
    /// The requested position lies outside of the array it was looked up in
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// The length of the array that was indexed
        len: usize,
    },
    /// The leaf was dropped from its level before reaching the root, so no proof of it exists.
    /// Only trees built with [`crate::OddLevelPolicy::DropLast`] can drop leaves.
    LeafNotCommitted {
        /// The index of the dropped leaf
        index: usize,
    },
    /// The leaf index does not fit in the `u32` carried by a [`crate::Proof`]
    TreeTooLarge,
    /// A flattened array does not have the shape implied by its leaf count and policy
    MalformedArray {
        /// The number of hashes the shape requires
        expected: usize,
        /// The number of hashes provided
        len: usize,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidInput => f.write_str("cannot build a tree from zero records"),
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for {} hashes", index, len)
            }
            TreeError::LeafNotCommitted { index } => {
                write!(f, "leaf {} is not committed to by the root", index)
            }
            TreeError::TreeTooLarge => f.write_str("leaf index does not fit in a proof"),
            TreeError::MalformedArray { expected, len } => {
                write!(f, "expected {} hashes, found {}", expected, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TreeError {}

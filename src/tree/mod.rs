//! Implements a flattened binary merkle tree: construction, indexed access and
//! single-leaf membership proofs.

/// Defines the builder which hashes records into a tree.
pub mod builder;
/// Defines errors that might arise while building or querying a tree.
pub mod error;
/// Defines the flattened, immutable array of tree hashes.
pub mod hash_array;
/// Defines proofs on the tree.
pub mod proof;
/// Utilities for computing the shape of a tree from its leaf count.
pub mod utils;
/// Defines the stand-alone proof verifier.
pub mod verifier;

use crate::hasher::MerkleHash;

pub use builder::{OddLevelPolicy, TreeBuilder};
pub use error::TreeError;
pub use hash_array::HashArray;
pub use proof::Proof;
pub use verifier::ProofVerifier;

/// Builds the hash array of `records` with the given hasher, duplicating the last node of
/// any level with an odd number of nodes.
///
/// Fails with [`TreeError::InvalidInput`] if `records` is empty.
pub fn build<M, R>(hasher: &M, records: &[R]) -> Result<HashArray<M>, TreeError>
where
    M: MerkleHash + Clone,
    R: AsRef<[u8]>,
{
    let mut builder = TreeBuilder::with_hasher(hasher.clone());
    builder.push_records(records);
    builder.build()
}

/// Checks that `record` sits at `index` in the tree committed to by `root`, using the sibling
/// path `proof` (leaf level first).
///
/// Never fails: a wrong record, index, root or a malformed proof all yield `false`.
pub fn verify<M, R>(
    hasher: &M,
    record: &R,
    index: usize,
    root: &M::Output,
    proof: &[M::Output],
) -> bool
where
    M: MerkleHash,
    R: AsRef<[u8]> + ?Sized,
{
    verifier::verify_with(hasher, record.as_ref(), index, root, proof)
}

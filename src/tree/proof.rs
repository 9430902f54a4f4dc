use super::verifier::ProofVerifier;
use crate::hasher::MerkleHash;
use crate::maybestd::vec::Vec;

/// A proof that a single leaf occurs at a given index of a tree.
///
/// Holds one sibling hash per level, from the leaf level up to (but excluding) the root.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof<M: MerkleHash> {
    /// The siblings to be used to build the path to the root.
    pub siblings: Vec<M::Output>,
    /// The index of the leaf covered by the proof.
    pub index: u32,
}

impl<M: MerkleHash> Default for Proof<M> {
    fn default() -> Self {
        Self {
            siblings: Default::default(),
            index: Default::default(),
        }
    }
}

impl<M> Proof<M>
where
    M: MerkleHash + Default,
{
    /// Verify that `record` is the leaf at this proof's index of the tree with the given root
    pub fn verify<R: AsRef<[u8]> + ?Sized>(&self, record: &R, root: &M::Output) -> bool {
        self.verify_with_hasher(record, root, &M::default())
    }

    /// Verify that `leaf_hash` is the leaf at this proof's index of the tree with the given root
    pub fn verify_leaf_hash(&self, leaf_hash: M::Output, root: &M::Output) -> bool {
        ProofVerifier::<M>::new().verify_leaf_hash(
            leaf_hash,
            self.index as usize,
            root,
            self.siblings(),
        )
    }
}

impl<M> Proof<M>
where
    M: MerkleHash,
{
    /// Creates a proof for the leaf at `index` from its sibling path
    pub fn new(index: u32, siblings: Vec<M::Output>) -> Self {
        Self { siblings, index }
    }

    /// Verify that `record` is the leaf at this proof's index, using the given hasher
    pub fn verify_with_hasher<R: AsRef<[u8]> + ?Sized>(
        &self,
        record: &R,
        root: &M::Output,
        hasher: &M,
    ) -> bool {
        super::verifier::verify_with(
            hasher,
            record.as_ref(),
            self.index as usize,
            root,
            self.siblings(),
        )
    }

    /// Returns the siblings provided as part of the proof.
    pub fn siblings(&self) -> &[M::Output] {
        &self.siblings
    }

    /// Returns the index of the leaf covered by the proof.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Returns the number of levels the proof climbs, i.e. the depth of the tree it was
    /// issued for.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Returns true if the proof has no siblings. Such a proof only verifies a tree with a
    /// single leaf.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

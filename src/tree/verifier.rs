use super::proof::Proof;
use crate::hasher::{encode_packed, MerkleHash};

/// Checks membership proofs against a claimed root.
///
/// The verifier never sees the tree. It recomputes the root from a leaf and its sibling path:
/// at each level an even index means the running hash is the left child and an odd index
/// means it is the right child, then the index is halved. Any mismatch is reported as `false`,
/// including proofs of the wrong length.
#[derive(Debug, Default, Clone)]
pub struct ProofVerifier<M> {
    hasher: M,
}

impl<M> ProofVerifier<M>
where
    M: MerkleHash + Default,
{
    /// Constructs a verifier with a default hasher
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<M> ProofVerifier<M>
where
    M: MerkleHash,
{
    /// Constructs a verifier with the given hasher
    pub fn with_hasher(hasher: M) -> Self {
        Self { hasher }
    }

    /// Returns the hasher used by this verifier
    pub fn hasher(&self) -> &M {
        &self.hasher
    }

    /// Checks that `record` is the leaf at `index` of the tree committed to by `root`
    pub fn verify<R: AsRef<[u8]> + ?Sized>(
        &self,
        record: &R,
        index: usize,
        root: &M::Output,
        proof: &[M::Output],
    ) -> bool {
        verify_with(&self.hasher, record.as_ref(), index, root, proof)
    }

    /// Checks that the already hashed leaf sits at `index` of the tree committed to by `root`
    pub fn verify_leaf_hash(
        &self,
        leaf_hash: M::Output,
        index: usize,
        root: &M::Output,
        proof: &[M::Output],
    ) -> bool {
        &self.compute_root(leaf_hash, index, proof) == root
    }

    /// Checks a bundled [`Proof`] for `record`
    pub fn verify_proof<R: AsRef<[u8]> + ?Sized>(
        &self,
        record: &R,
        root: &M::Output,
        proof: &Proof<M>,
    ) -> bool {
        self.verify(record, proof.index() as usize, root, proof.siblings())
    }

    /// Recomputes the root implied by a leaf hash, its index and its sibling path
    pub fn compute_root(
        &self,
        leaf_hash: M::Output,
        index: usize,
        proof: &[M::Output],
    ) -> M::Output {
        climb(&self.hasher, leaf_hash, index, proof)
    }
}

fn climb<M: MerkleHash>(
    hasher: &M,
    leaf_hash: M::Output,
    mut index: usize,
    proof: &[M::Output],
) -> M::Output {
    let mut running = leaf_hash;
    for sibling in proof {
        running = if index % 2 == 0 {
            hasher.hash_nodes(&running, sibling)
        } else {
            hasher.hash_nodes(sibling, &running)
        };
        index /= 2;
    }
    running
}

pub(crate) fn verify_with<M: MerkleHash>(
    hasher: &M,
    record: &[u8],
    index: usize,
    root: &M::Output,
    proof: &[M::Output],
) -> bool {
    let leaf_hash = hasher.hash_leaf(encode_packed(record));
    &climb(hasher, leaf_hash, index, proof) == root
}

use super::builder::OddLevelPolicy;
use super::error::TreeError;
use super::proof::Proof;
use super::utils::{ancestor_index, compute_level_widths};
use crate::hasher::MerkleHash;
use crate::maybestd::{fmt, marker::PhantomData, vec::Vec};

/// The complete, immutable state of a built tree.
///
/// Hashes are laid out level by level: the leaves in input order, then each internal level
/// from left to right, ending with the root. For a power of two number of leaves `n` the array
/// holds exactly `2n - 1` hashes.
///
/// ```ascii
///          6
///        /   \
///       4     5
///      / \   / \
///     0   1 2   3
/// ```
pub struct HashArray<M: MerkleHash> {
    hashes: Vec<M::Output>,
    level_widths: Vec<usize>,
    policy: OddLevelPolicy,
    _hasher: PhantomData<M>,
}

impl<M: MerkleHash> HashArray<M> {
    /// Assembles a hash array from its flattened levels. `level_widths` must be non-empty, end
    /// with a level of width one, and sum to `hashes.len()`.
    pub(crate) fn from_levels(
        hashes: Vec<M::Output>,
        level_widths: Vec<usize>,
        policy: OddLevelPolicy,
    ) -> Self {
        debug_assert_eq!(level_widths.iter().sum::<usize>(), hashes.len());
        debug_assert_eq!(level_widths.last(), Some(&1));
        Self {
            hashes,
            level_widths,
            policy,
            _hasher: PhantomData,
        }
    }

    /// Rebuilds a hash array from hashes previously obtained through [`HashArray::into_vec`]
    /// or [`HashArray::as_slice`].
    ///
    /// Only the shape is checked: `hashes` must hold exactly as many hashes as a tree of
    /// `leaf_count` leaves has under `policy`. The hashes themselves are trusted.
    pub fn from_hashes(
        leaf_count: usize,
        policy: OddLevelPolicy,
        hashes: Vec<M::Output>,
    ) -> Result<Self, TreeError> {
        if leaf_count == 0 {
            return Err(TreeError::InvalidInput);
        }
        let level_widths = compute_level_widths(leaf_count, policy);
        let expected = level_widths.iter().sum::<usize>();
        if hashes.len() != expected {
            return Err(TreeError::MalformedArray {
                expected,
                len: hashes.len(),
            });
        }
        Ok(Self::from_levels(hashes, level_widths, policy))
    }

    /// Returns the root of the tree
    pub fn root(&self) -> &M::Output {
        &self.hashes[self.hashes.len() - 1]
    }

    /// Returns the hash stored at `index`, or [`TreeError::IndexOutOfRange`] if the array is
    /// shorter than that.
    pub fn hash_at(&self, index: usize) -> Result<&M::Output, TreeError> {
        self.hashes.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.hashes.len(),
        })
    }

    /// Returns the total number of hashes in the array
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Always false: a built tree holds at least its root
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Returns the number of leaves the tree was built from
    pub fn leaf_count(&self) -> usize {
        self.level_widths[0]
    }

    /// Returns the number of levels above the leaves, which is also the length of every
    /// proof issued by a tree built with [`OddLevelPolicy::DuplicateLast`].
    pub fn depth(&self) -> usize {
        self.level_widths.len() - 1
    }

    /// Returns the policy the tree was built with
    pub fn policy(&self) -> OddLevelPolicy {
        self.policy
    }

    /// Returns the leaf hashes
    pub fn leaves(&self) -> &[M::Output] {
        &self.hashes[..self.leaf_count()]
    }

    /// Returns the hashes of a single level, where level 0 holds the leaves
    pub fn level(&self, level: usize) -> Option<&[M::Output]> {
        let width = *self.level_widths.get(level)?;
        let start = self.level_start(level);
        Some(&self.hashes[start..start + width])
    }

    /// Iterates over the levels of the tree, from the leaves up to the root
    pub fn levels(&self) -> impl Iterator<Item = &[M::Output]> + '_ {
        (0..self.level_widths.len()).filter_map(move |level| self.level(level))
    }

    /// Returns every hash in the array
    pub fn as_slice(&self) -> &[M::Output] {
        &self.hashes
    }

    /// Consumes the tree, returning the flattened hashes
    pub fn into_vec(self) -> Vec<M::Output> {
        self.hashes
    }

    fn level_start(&self, level: usize) -> usize {
        self.level_widths[..level].iter().sum()
    }

    /// Creates a proof of inclusion for the leaf at `index`: the siblings of the leaf and of
    /// each of its ancestors, leaf level first.
    ///
    /// Example: consider the following tree with leaves [C, D, E, F]
    /// ```ascii
    ///          root
    ///        /      \
    ///       A        B
    ///      / \      /  \
    ///     C   D    E    F
    ///
    /// ```
    ///
    /// `prove(2)` returns the siblings [F, A].
    pub fn prove(&self, index: usize) -> Result<Proof<M>, TreeError> {
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(TreeError::IndexOutOfRange {
                index,
                len: leaf_count,
            });
        }
        let leaf_index = proof_index(index)?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut level_start = 0;
        for (level, &width) in self.level_widths.iter().enumerate() {
            let position = ancestor_index(index, level);
            // Under DropLast an ancestor can fall off the end of its level
            if position >= width {
                return Err(TreeError::LeafNotCommitted { index });
            }
            if width == 1 {
                break;
            }
            let sibling = match position ^ 1 {
                sibling if sibling < width => sibling,
                _ if self.policy == OddLevelPolicy::DuplicateLast => position,
                _ => return Err(TreeError::LeafNotCommitted { index }),
            };
            siblings.push(self.hashes[level_start + sibling].clone());
            level_start += width;
        }

        Ok(Proof::new(leaf_index, siblings))
    }
}

fn proof_index(index: usize) -> Result<u32, TreeError> {
    u32::try_from(index).map_err(|_| TreeError::TreeTooLarge)
}

impl<M: MerkleHash> Clone for HashArray<M> {
    fn clone(&self) -> Self {
        Self {
            hashes: self.hashes.clone(),
            level_widths: self.level_widths.clone(),
            policy: self.policy,
            _hasher: PhantomData,
        }
    }
}

impl<M: MerkleHash> PartialEq for HashArray<M> {
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy
            && self.level_widths == other.level_widths
            && self.hashes == other.hashes
    }
}

impl<M: MerkleHash> Eq for HashArray<M> {}

impl<M: MerkleHash> fmt::Debug for HashArray<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashArray")
            .field("hashes", &self.hashes)
            .field("level_widths", &self.level_widths)
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Keccak256Hasher, TreeBuilder};

    type Tree = HashArray<Keccak256Hasher>;

    fn tree_of(records: &[&str], policy: OddLevelPolicy) -> Tree {
        let mut builder = TreeBuilder::<Keccak256Hasher>::new().with_policy(policy);
        builder.push_records(records);
        builder.build().unwrap()
    }

    #[test]
    fn test_hash_at_bounds() {
        let tree = tree_of(&["a", "b", "c", "d"], OddLevelPolicy::DuplicateLast);
        assert!(tree.hash_at(6).is_ok());
        assert_eq!(
            tree.hash_at(7),
            Err(TreeError::IndexOutOfRange { index: 7, len: 7 })
        );
        assert_eq!(tree.hash_at(6).unwrap(), tree.root());
    }

    #[test]
    fn test_levels() {
        let tree = tree_of(&["a", "b", "c", "d", "e"], OddLevelPolicy::DuplicateLast);
        let widths: Vec<usize> = tree.levels().map(|level| level.len()).collect();
        assert_eq!(widths, [5, 3, 2, 1]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.level(0).unwrap(), tree.leaves());
        assert_eq!(tree.level(3).unwrap(), &[*tree.root()]);
        assert!(tree.level(4).is_none());
        assert_eq!(tree.clone().into_vec().len(), tree.len());
    }

    #[test]
    fn test_prove_matches_layout() {
        let tree = tree_of(
            &[
                "TX1: Maria => Alice",
                "TX2: Alice => Shara",
                "TX3: Alice => Elisabeth",
                "TX4: Elisabeth => Jovana",
            ],
            OddLevelPolicy::DuplicateLast,
        );
        let proof = tree.prove(2).unwrap();
        assert_eq!(proof.index(), 2);
        assert_eq!(
            proof.siblings(),
            &[*tree.hash_at(3).unwrap(), *tree.hash_at(4).unwrap()]
        );

        let proof = tree.prove(0).unwrap();
        assert_eq!(
            proof.siblings(),
            &[*tree.hash_at(1).unwrap(), *tree.hash_at(5).unwrap()]
        );
    }

    #[test]
    fn test_prove_duplicated_node_is_own_sibling() {
        let tree = tree_of(&["a", "b", "c"], OddLevelPolicy::DuplicateLast);
        let proof = tree.prove(2).unwrap();
        assert_eq!(
            proof.siblings(),
            &[*tree.hash_at(2).unwrap(), *tree.hash_at(3).unwrap()]
        );
    }

    #[test]
    fn test_prove_out_of_range() {
        let tree = tree_of(&["a", "b", "c"], OddLevelPolicy::DuplicateLast);
        assert_eq!(
            tree.prove(3).unwrap_err(),
            TreeError::IndexOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn test_prove_dropped_leaf() {
        let tree = tree_of(&["a", "b", "c", "d", "e", "f"], OddLevelPolicy::DropLast);
        // Levels are [6, 3, 1]: leaves 4 and 5 are dropped on the way up
        assert!(tree.prove(3).is_ok());
        assert_eq!(
            tree.prove(4).unwrap_err(),
            TreeError::LeafNotCommitted { index: 4 }
        );
        assert_eq!(
            tree.prove(5).unwrap_err(),
            TreeError::LeafNotCommitted { index: 5 }
        );
    }

    #[test]
    fn test_proof_index_limit() {
        assert_eq!(proof_index(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            proof_index(u32::MAX as usize + 1),
            Err(TreeError::TreeTooLarge)
        );
    }

    #[test]
    fn test_from_hashes_restores_tree() {
        for policy in [OddLevelPolicy::DuplicateLast, OddLevelPolicy::DropLast] {
            let tree = tree_of(&["a", "b", "c", "d", "e"], policy);
            let restored = Tree::from_hashes(5, policy, tree.clone().into_vec()).unwrap();
            assert_eq!(restored, tree);
            assert_eq!(restored.prove(1), tree.prove(1));
        }
    }

    #[test]
    fn test_from_hashes_rejects_bad_shape() {
        let tree = tree_of(&["a", "b", "c"], OddLevelPolicy::DuplicateLast);
        let hashes = tree.into_vec();

        assert_eq!(
            Tree::from_hashes(3, OddLevelPolicy::DropLast, hashes.clone()).unwrap_err(),
            TreeError::MalformedArray {
                expected: 4,
                len: 6
            }
        );
        assert_eq!(
            Tree::from_hashes(4, OddLevelPolicy::DuplicateLast, hashes).unwrap_err(),
            TreeError::MalformedArray {
                expected: 7,
                len: 6
            }
        );
        assert_eq!(
            Tree::from_hashes(0, OddLevelPolicy::DuplicateLast, Vec::new()).unwrap_err(),
            TreeError::InvalidInput
        );
    }

    #[test]
    fn test_single_leaf_proof_is_empty() {
        let tree = tree_of(&["a"], OddLevelPolicy::DuplicateLast);
        assert!(tree.prove(0).unwrap().siblings().is_empty());
        assert_eq!(tree.depth(), 0);
    }
}

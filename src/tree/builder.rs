use super::error::TreeError;
use super::hash_array::HashArray;
use super::utils::{compute_tree_size, parent_width};
use crate::hasher::{encode_packed, MerkleHash};
use crate::maybestd::{boxed::Box, vec::Vec};

type BoxedVisitor<M> = Box<dyn Fn(&<M as MerkleHash>::Output) + Send>;

/// Decides what happens to the last node of a level holding an odd number of nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddLevelPolicy {
    /// The unpaired node is hashed together with a copy of itself. The copy is not stored.
    #[default]
    DuplicateLast,
    /// The unpaired node is left out of the level above, so the leaves below it are not
    /// committed to by the root. Only useful to reproduce roots issued by older deployments.
    DropLast,
}

/// Hashes an ordered list of records into a [`HashArray`].
///
/// Records are hashed into leaves as soon as they are pushed. Internal levels are only
/// computed by [`TreeBuilder::build`], which may be called any number of times.
pub struct TreeBuilder<M>
where
    M: MerkleHash,
{
    leaves: Vec<M::Output>,
    hasher: M,
    policy: OddLevelPolicy,
    visitor: BoxedVisitor<M>,
}

impl<M: MerkleHash + Default> Default for TreeBuilder<M> {
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<M> TreeBuilder<M>
where
    M: MerkleHash + Default,
{
    /// Constructs an empty builder with a default hasher
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<M> TreeBuilder<M>
where
    M: MerkleHash,
{
    /// Constructs an empty builder with the given hasher
    pub fn with_hasher(hasher: M) -> Self {
        Self {
            leaves: Vec::new(),
            hasher,
            policy: OddLevelPolicy::default(),
            visitor: Box::new(|_| {}),
        }
    }

    /// Sets the policy used for levels with an odd number of nodes
    pub fn with_policy(mut self, policy: OddLevelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers a callback which is invoked with every hash produced by [`TreeBuilder::build`],
    /// in the order the hashes are laid out in the resulting array.
    pub fn with_visitor(mut self, visitor: impl Fn(&M::Output) + Send + 'static) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Appends a record to the tree, hashing its packed encoding into a leaf
    pub fn push_record<R: AsRef<[u8]> + ?Sized>(&mut self, record: &R) {
        let leaf = self.hasher.hash_leaf(encode_packed(record));
        self.push_leaf_hash(leaf);
    }

    /// Appends every record yielded by `records`, in order
    pub fn push_records<I>(&mut self, records: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for record in records {
            self.push_record(&record);
        }
    }

    /// Appends a pre-hashed leaf to the tree
    pub fn push_leaf_hash(&mut self, leaf_hash: M::Output) {
        self.leaves.push(leaf_hash);
    }

    /// Returns the leaf hashes pushed so far
    pub fn leaves(&self) -> &[M::Output] {
        &self.leaves
    }

    /// Returns the number of leaves pushed so far
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Returns true if no leaves have been pushed
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Returns the configured odd level policy
    pub fn policy(&self) -> OddLevelPolicy {
        self.policy
    }

    /// Returns the hasher used by this builder
    pub fn hasher(&self) -> &M {
        &self.hasher
    }

    /// Computes every level of the tree and returns the flattened hashes.
    ///
    /// Leaves come first, in insertion order, followed by each internal level from left to
    /// right. The last hash is the root. Fails with [`TreeError::InvalidInput`] if no leaves
    /// have been pushed.
    pub fn build(&self) -> Result<HashArray<M>, TreeError> {
        if self.leaves.is_empty() {
            return Err(TreeError::InvalidInput);
        }

        let mut hashes = Vec::with_capacity(compute_tree_size(self.leaves.len(), self.policy));
        let mut level_widths = Vec::new();
        for leaf in &self.leaves {
            (self.visitor)(leaf);
            hashes.push(leaf.clone());
        }

        let mut level_start = 0;
        let mut width = self.leaves.len();
        level_widths.push(width);
        while width > 1 {
            let parent_start = hashes.len();
            let parents = parent_width(width, self.policy);
            for pair in 0..parents {
                let left = level_start + 2 * pair;
                // Under DropLast every parent has two children, so this only triggers for
                // DuplicateLast
                let right = if 2 * pair + 1 < width { left + 1 } else { left };
                let parent = self.hasher.hash_nodes(&hashes[left], &hashes[right]);
                (self.visitor)(&parent);
                hashes.push(parent);
            }
            level_start = parent_start;
            width = parents;
            level_widths.push(width);
        }

        Ok(HashArray::from_levels(hashes, level_widths, self.policy))
    }
}

use super::builder::OddLevelPolicy;
use crate::maybestd::vec::Vec;

/// Returns the number of nodes on the level above one holding `width` nodes
pub fn parent_width(width: usize, policy: OddLevelPolicy) -> usize {
    match policy {
        OddLevelPolicy::DuplicateLast => width.div_ceil(2),
        OddLevelPolicy::DropLast => width / 2,
    }
}

/// Computes the width of every level of a tree with `leaf_count` leaves, leaves first and
/// root last. Returns an empty vector for an empty tree.
pub fn compute_level_widths(leaf_count: usize, policy: OddLevelPolicy) -> Vec<usize> {
    let mut widths = Vec::new();
    if leaf_count == 0 {
        return widths;
    }
    let mut width = leaf_count;
    widths.push(width);
    while width > 1 {
        width = parent_width(width, policy);
        widths.push(width);
    }
    widths
}

/// Computes the total number of hashes stored for a tree with `leaf_count` leaves.
/// For a power of two this is always `2 * leaf_count - 1`.
pub fn compute_tree_size(leaf_count: usize, policy: OddLevelPolicy) -> usize {
    compute_level_widths(leaf_count, policy).iter().sum()
}

/// Returns the position, within `level`, of the ancestor of the leaf at `leaf_idx`
pub fn ancestor_index(leaf_idx: usize, level: usize) -> usize {
    leaf_idx >> level
}

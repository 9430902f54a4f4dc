#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
//! # flat-merkle
//!
//! A binary merkle tree stored as a single flattened array of hashes: the leaves first,
//! then every internal level in order, with the root as the final element.
//!
//! Trees are built once with a [`TreeBuilder`] and never mutated. Membership of a record
//! is checked with a [`ProofVerifier`], which needs nothing but the claimed root, the
//! record, its index and the sibling path. At each level the parity of the index decides
//! whether the running hash is the left or the right child.
//!
//! ```
//! use flat_merkle::{build, verify, Keccak256Hasher};
//!
//! let records = ["TX1: Maria => Alice", "TX2: Alice => Shara", "TX3: Alice => Elisabeth"];
//! let tree = build(&Keccak256Hasher, &records).unwrap();
//! let proof = tree.prove(2).unwrap();
//!
//! assert!(verify(&Keccak256Hasher, records[2], 2, tree.root(), proof.siblings()));
//! assert!(!verify(&Keccak256Hasher, records[2], 1, tree.root(), proof.siblings()));
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

mod maybestd {
    #[cfg(not(feature = "std"))]
    pub use alloc::{boxed, vec};
    pub use core::{fmt, hash, marker};
    #[cfg(feature = "std")]
    pub use std::{boxed, vec};
}

/// Hash functions which can be plugged into the tree, and the canonical record encoding.
pub mod hasher;
/// The tree builder, the flattened hash array and membership proofs.
pub mod tree;

pub use crate::hasher::{encode_packed, FnHasher, Keccak256Hasher, MerkleHash, Sha256Hasher};
pub use crate::tree::{
    build, verify, HashArray, OddLevelPolicy, Proof, ProofVerifier, TreeBuilder, TreeError,
};

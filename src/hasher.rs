use crate::maybestd::{fmt::Debug, hash::Hash};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// The length of a hash in bytes
pub const HASH_LEN: usize = 32;

/// A trait for hashing data into a merkle tree.
///
/// Leaves and internal nodes are hashed without domain separation: an internal node is the
/// hash of its two children's bytes, left first. Every deployment must fix one implementation,
/// since changing it invalidates all previously issued roots and proofs.
pub trait MerkleHash {
    /// The output of this hasher.
    #[cfg(all(not(feature = "serde"), not(feature = "borsh")))]
    type Output: Debug + PartialEq + Eq + Clone + Default + Hash;

    /// The output of this hasher.
    #[cfg(all(feature = "serde", not(feature = "borsh")))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + serde::Serialize
        + serde::de::DeserializeOwned;

    /// The output of this hasher.
    #[cfg(all(feature = "borsh", not(feature = "serde")))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + borsh::BorshSerialize
        + borsh::BorshDeserialize;

    /// The output of this hasher.
    #[cfg(all(feature = "borsh", feature = "serde"))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + borsh::BorshSerialize
        + borsh::BorshDeserialize
        + serde::Serialize
        + serde::de::DeserializeOwned;

    /// Hashes the canonical encoding of a record into a leaf.
    fn hash_leaf(&self, data: &[u8]) -> Self::Output;
    /// Hashes two digests into their parent, `left || right`.
    fn hash_nodes(&self, left: &Self::Output, right: &Self::Output) -> Self::Output;
}

/// Returns the canonical encoding of a single string or byte-string record.
///
/// This is the packed encoding of one dynamic argument (Solidity's `abi.encodePacked(string)`):
/// the raw bytes, with no length prefix, padding or type tag.
pub fn encode_packed<R: AsRef<[u8]> + ?Sized>(record: &R) -> &[u8] {
    record.as_ref()
}

fn concat(left: &[u8; HASH_LEN], right: &[u8; HASH_LEN]) -> [u8; 2 * HASH_LEN] {
    let mut out = [0u8; 2 * HASH_LEN];
    out[..HASH_LEN].copy_from_slice(left);
    out[HASH_LEN..].copy_from_slice(right);
    out
}

fn keccak256(bytes: &[u8]) -> [u8; HASH_LEN] {
    Keccak256::digest(bytes).into()
}

fn sha256(bytes: &[u8]) -> [u8; HASH_LEN] {
    Sha256::digest(bytes).into()
}

/// A keccak-256 hasher over packed encodings. This is the hash the reference deployment uses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Keccak256Hasher
    }

    /// Returns `keccak256(encode_packed(record))`, the leaf hash of a record.
    pub fn make_hash<R: AsRef<[u8]> + ?Sized>(&self, record: &R) -> [u8; HASH_LEN] {
        self.hash_leaf(encode_packed(record))
    }
}

impl MerkleHash for Keccak256Hasher {
    type Output = [u8; HASH_LEN];

    fn hash_leaf(&self, data: &[u8]) -> Self::Output {
        keccak256(data)
    }

    fn hash_nodes(&self, left: &Self::Output, right: &Self::Output) -> Self::Output {
        keccak256(&concat(left, right))
    }
}

/// A sha256 hasher with the same packed, undomained layout as [`Keccak256Hasher`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Sha256Hasher
    }
}

impl MerkleHash for Sha256Hasher {
    type Output = [u8; HASH_LEN];

    fn hash_leaf(&self, data: &[u8]) -> Self::Output {
        sha256(data)
    }

    fn hash_nodes(&self, left: &Self::Output, right: &Self::Output) -> Self::Output {
        sha256(&concat(left, right))
    }
}

/// Adapts a plain function from bytes to a 32 byte digest into a [`MerkleHash`].
///
/// Leaves are hashed as `f(data)` and internal nodes as `f(left || right)`.
#[derive(Clone, Copy)]
pub struct FnHasher(fn(&[u8]) -> [u8; HASH_LEN]);

impl FnHasher {
    /// Wraps the given hash function
    pub fn new(f: fn(&[u8]) -> [u8; HASH_LEN]) -> Self {
        Self(f)
    }
}

impl Debug for FnHasher {
    fn fmt(&self, f: &mut crate::maybestd::fmt::Formatter<'_>) -> crate::maybestd::fmt::Result {
        f.write_str("FnHasher")
    }
}

impl MerkleHash for FnHasher {
    type Output = [u8; HASH_LEN];

    fn hash_leaf(&self, data: &[u8]) -> Self::Output {
        (self.0)(data)
    }

    fn hash_nodes(&self, left: &Self::Output, right: &Self::Output) -> Self::Output {
        (self.0)(&concat(left, right))
    }
}

pub mod claim_tree;
pub mod error;
pub mod hasher;
pub mod proof;

pub use claim_tree::{create_claim_tree, create_claim_tree_from_rows, ClaimTree};
pub use error::{ClaimTreeError, ClaimTreeResult};
pub use hasher::AirdropHasher;
pub use proof::{
    batch_verify_proofs, extract_root_from_proof, generate_proof_for_leaf, verify_claim_proof,
};

// Re-export leaf and proof types from the airdrop protocol
pub use airdrop_protocol::{ClaimLeaf, ClaimProof, Hash};

// Re-export key types from rs-merkle for convenience
pub use rs_merkle::{MerkleProof, MerkleTree};

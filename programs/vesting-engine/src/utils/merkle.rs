//! Leaf encoding and sorted-pair proof verification for the bulk commitment.
//!
//! leaf = H(H(preimage)), node = H(min(a, b) || max(a, b)), H = BLAKE3.
//! Hashing the leaf twice keeps a 64-byte internal node from ever being
//! accepted as a leaf preimage.
//!
//! Off-chain tree builders must encode the 80-byte preimage in this order:
//!
//! | offset | bytes | field |
//! |---|---|---|
//! | 0 | 32 | beneficiary |
//! | 32 | 8 | start, i64 LE |
//! | 40 | 8 | cliff_duration, i64 LE |
//! | 48 | 8 | duration, i64 LE |
//! | 56 | 8 | slice_length, u64 LE |
//! | 64 | 8 | amount, u64 LE |
//! | 72 | 1 | revokable, 0 or 1 |
//! | 73 | 7 | zero |
//!
//! `amount` precedes `revokable` so the struct has no interior padding.

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::state::ScheduleTerms;

pub type Hash32 = [u8; 32];

/// Canonical leaf preimage, little-endian integers, no implicit padding.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct LeafPreimage {
    beneficiary: [u8; 32],
    start: i64,
    cliff_duration: i64,
    duration: i64,
    slice_length: u64,
    amount: u64,
    revokable: u8,
    _padding: [u8; 7],
}

impl LeafPreimage {
    fn new(beneficiary: &Pubkey, terms: &ScheduleTerms) -> Self {
        Self {
            beneficiary: beneficiary.to_bytes(),
            start: terms.start.to_le(),
            cliff_duration: terms.cliff_duration.to_le(),
            duration: terms.duration.to_le(),
            slice_length: terms.slice_length.to_le(),
            amount: terms.amount.to_le(),
            revokable: terms.revokable as u8,
            _padding: [0u8; 7],
        }
    }
}

pub fn leaf_hash(beneficiary: &Pubkey, terms: &ScheduleTerms) -> Hash32 {
    let preimage = LeafPreimage::new(beneficiary, terms);
    let inner = blake3::hash(bytemuck::bytes_of(&preimage));
    *blake3::hash(inner.as_bytes()).as_bytes()
}

pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = blake3::Hasher::new();
    hasher.update(lo);
    hasher.update(hi);
    *hasher.finalize().as_bytes()
}

pub fn compute_root(leaf: &Hash32, proof: &[Hash32]) -> Hash32 {
    proof
        .iter()
        .fold(*leaf, |node, sibling| hash_pair(&node, sibling))
}

pub fn verify(proof: &[Hash32], root: &Hash32, leaf: &Hash32) -> bool {
    compute_root(leaf, proof) == *root
}

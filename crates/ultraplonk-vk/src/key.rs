//! Verification key parsing for the UltraPlonk binary format
//!
//! ## Wire layout (big-endian throughout)
//!
//! - [0..4]: circuit_type as u32, must be 2
//! - [4..8]: circuit_size as u32, must be a power of two
//! - [8..12]: num_public_inputs as u32
//! - [12..16]: commitment_count as u32, must be 23
//! - then 23 entries: label_len (u32) + label (UTF-8) + G1 point (64 bytes, x || y)
//! - then contains_recursive_proof (1 byte, 0 or 1, must be 0)
//! - then recursive_proof_indices (4 bytes, value discarded)
//!
//! Trailing bytes after the last field are ignored.

use crate::cursor::ByteCursor;
use crate::errors::VkError;
use crate::labels::{CommitmentLabel, NUM_COMMITMENTS};
use base64ct::{Base64, Encoding};

/// Circuit type tag identifying an UltraPlonk key
pub const CIRCUIT_TYPE_ULTRAPLONK: u32 = 2;

/// A G1 point on the proving curve, big-endian 256-bit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct G1Point {
    pub x: [u8; 32],
    pub y: [u8; 32],
}

const G1_ZERO: G1Point = G1Point {
    x: [0u8; 32],
    y: [0u8; 32],
};

/// Parsed UltraPlonk verification key
///
/// Constructed once by [`VerificationKey::from_bytes`] or
/// [`VerificationKey::from_base64`] and read-only thereafter.
/// `commitments` holds exactly one point per label, indexed by
/// [`CommitmentLabel::index`], regardless of wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub circuit_type: u32,
    pub circuit_size: u32,
    pub num_public_inputs: u32,
    pub commitments: [G1Point; NUM_COMMITMENTS],
    pub contains_recursive_proof: bool,
    /// Present on the wire but semantically discarded; always 0 after decode
    pub recursive_proof_indices: u32,
}

impl VerificationKey {
    /// Parse a VK from its base64 encoding.
    pub fn from_base64(text: &str) -> Result<Self, VkError> {
        let bytes = Base64::decode_vec(text.trim()).map_err(|_| VkError::InvalidBase64)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a VK from raw bytes, enforcing every format invariant in
    /// wire order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VkError> {
        let mut cur = ByteCursor::new(bytes);

        let circuit_type = cur.read_u32_be()?;
        if circuit_type != CIRCUIT_TYPE_ULTRAPLONK {
            return Err(VkError::UnsupportedCircuitType {
                found: circuit_type,
            });
        }

        let circuit_size = cur.read_u32_be()?;
        // Exact bit-count check; a floating-point log2 misclassifies
        // values near large powers of two. Zero is rejected.
        if !circuit_size.is_power_of_two() {
            return Err(VkError::InvalidCircuitSize { found: circuit_size });
        }

        let num_public_inputs = cur.read_u32_be()?;

        let commitment_count = cur.read_u32_be()?;
        if commitment_count as usize != NUM_COMMITMENTS {
            return Err(VkError::CommitmentCountMismatch {
                found: commitment_count,
            });
        }

        let mut commitments = [G1_ZERO; NUM_COMMITMENTS];
        let mut seen = [false; NUM_COMMITMENTS];
        for _ in 0..NUM_COMMITMENTS {
            let label_len = cur.read_u32_be()? as usize;
            let label_offset = cur.offset();
            let text = cur.read_utf8(label_len)?;
            let label = CommitmentLabel::parse(text).ok_or_else(|| VkError::UnknownLabel {
                label: text.to_owned(),
                offset: label_offset,
            })?;
            if seen[label.index()] {
                return Err(VkError::DuplicateLabel {
                    label: text.to_owned(),
                    offset: label_offset,
                });
            }
            seen[label.index()] = true;
            commitments[label.index()] = read_g1(&mut cur)?;
        }

        // The count matched and duplicates error above, but the full-set
        // invariant is checked explicitly.
        let filled = seen.iter().filter(|present| **present).count();
        if filled != NUM_COMMITMENTS {
            return Err(VkError::CommitmentCountMismatch {
                found: filled as u32,
            });
        }

        let contains_recursive_proof = cur.read_bool()?;
        if contains_recursive_proof {
            return Err(VkError::RecursiveProofUnsupported);
        }

        // On-wire recursive proof indices are discarded
        cur.skip(4)?;

        Ok(VerificationKey {
            circuit_type,
            circuit_size,
            num_public_inputs,
            commitments,
            contains_recursive_proof: false,
            recursive_proof_indices: 0,
        })
    }

    /// Look up the commitment for a label.
    pub fn commitment(&self, label: CommitmentLabel) -> &G1Point {
        &self.commitments[label.index()]
    }
}

fn read_g1(cur: &mut ByteCursor<'_>) -> Result<G1Point, VkError> {
    let mut x = [0u8; 32];
    x.copy_from_slice(cur.read_bytes(32)?);
    let mut y = [0u8; 32];
    y.copy_from_slice(cur.read_bytes(32)?);
    Ok(G1Point { x, y })
}

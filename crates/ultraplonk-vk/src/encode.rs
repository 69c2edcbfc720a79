//! Canonical fixed-order encoding of a verification key
//!
//! On-chain consumers depend on this order, not the order labels were
//! written in the binary VK.

use crate::key::VerificationKey;
use crate::labels::NUM_COMMITMENTS;

/// Number of 256-bit fields in the canonical vector:
/// 3 header fields, an (x, y) pair per commitment, the recursive flag
/// and the recursive proof indices.
pub const NUM_CANONICAL_FIELDS: usize = 3 + NUM_COMMITMENTS * 2 + 2;

fn u32_field(value: u32) -> [u8; 32] {
    let mut field = [0u8; 32];
    field[28..].copy_from_slice(&value.to_be_bytes());
    field
}

/// The fixed-order field vector derived from a verification key.
pub fn canonical_fields(vk: &VerificationKey) -> [[u8; 32]; NUM_CANONICAL_FIELDS] {
    let mut fields = [[0u8; 32]; NUM_CANONICAL_FIELDS];
    fields[0] = u32_field(vk.circuit_type);
    fields[1] = u32_field(vk.circuit_size);
    fields[2] = u32_field(vk.num_public_inputs);
    // `commitments` is stored in canonical label order already
    for (i, point) in vk.commitments.iter().enumerate() {
        fields[3 + 2 * i] = point.x;
        fields[3 + 2 * i + 1] = point.y;
    }
    fields[NUM_CANONICAL_FIELDS - 2] = u32_field(vk.contains_recursive_proof as u32);
    fields[NUM_CANONICAL_FIELDS - 1] = u32_field(vk.recursive_proof_indices);
    fields
}

/// `0x`-prefixed hex encoding of the canonical field vector, each field
/// zero-padded to 64 hex digits.
pub fn canonical_hex(vk: &VerificationKey) -> String {
    let fields = canonical_fields(vk);
    let mut out = String::with_capacity(2 + NUM_CANONICAL_FIELDS * 64);
    out.push_str("0x");
    for field in &fields {
        out.push_str(&hex::encode(field));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::G1Point;
    use crate::labels::CommitmentLabel;

    fn sample_vk() -> VerificationKey {
        let mut commitments = [G1Point {
            x: [0u8; 32],
            y: [0u8; 32],
        }; NUM_COMMITMENTS];
        for (i, point) in commitments.iter_mut().enumerate() {
            point.x[31] = i as u8;
            point.y[0] = 0x80;
        }
        VerificationKey {
            circuit_type: 2,
            circuit_size: 4096,
            num_public_inputs: 7,
            commitments,
            contains_recursive_proof: false,
            recursive_proof_indices: 0,
        }
    }

    #[test]
    fn test_field_count() {
        assert_eq!(NUM_CANONICAL_FIELDS, 51);
        assert_eq!(canonical_fields(&sample_vk()).len(), 51);
    }

    #[test]
    fn test_header_fields_are_padded_u32() {
        let fields = canonical_fields(&sample_vk());
        assert_eq!(&fields[0][..28], &[0u8; 28]);
        assert_eq!(&fields[0][28..], &2u32.to_be_bytes());
        assert_eq!(&fields[1][28..], &4096u32.to_be_bytes());
        assert_eq!(&fields[2][28..], &7u32.to_be_bytes());
    }

    #[test]
    fn test_commitment_pairs_follow_canonical_order() {
        let vk = sample_vk();
        let fields = canonical_fields(&vk);
        for label in CommitmentLabel::ALL {
            let i = label.index();
            assert_eq!(fields[3 + 2 * i], vk.commitments[i].x);
            assert_eq!(fields[3 + 2 * i + 1], vk.commitments[i].y);
        }
    }

    #[test]
    fn test_trailer_fields() {
        let fields = canonical_fields(&sample_vk());
        assert_eq!(fields[49], [0u8; 32]); // recursive flag
        assert_eq!(fields[50], [0u8; 32]); // recursive proof indices
    }

    #[test]
    fn test_hex_shape() {
        let hex = canonical_hex(&sample_vk());
        assert_eq!(hex.len(), 3266);
        assert!(hex.starts_with("0x"));
        assert!(hex[2..].bytes().all(|b| b.is_ascii_hexdigit()));
    }
}

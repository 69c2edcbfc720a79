//! UltraPlonk verification key decoding
//!
//! Parses the binary VK format produced by the UltraPlonk toolchain into a
//! validated [`VerificationKey`], and re-encodes it as the canonical
//! fixed-order field vector on-chain consumers expect. Decoding enforces
//! every structural invariant of the wire format; re-encoding order is
//! fixed and independent of the order labels appeared on the wire.

mod cursor;
mod encode;
mod errors;
mod key;
mod labels;

pub use cursor::ByteCursor;
pub use encode::{canonical_fields, canonical_hex, NUM_CANONICAL_FIELDS};
pub use errors::VkError;
pub use key::{G1Point, VerificationKey, CIRCUIT_TYPE_ULTRAPLONK};
pub use labels::{CommitmentLabel, NUM_COMMITMENTS};

//! Error types for verification key decoding

use thiserror::Error;

/// Verification key decoding errors
///
/// All variants are fatal to the decode call that produced them; where
/// feasible they carry the byte offset at which detection occurred.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VkError {
    #[error("truncated input at offset {offset}: wanted {wanted} more bytes")]
    Truncated { offset: usize, wanted: usize },

    #[error("invalid bool byte {value:#04x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },

    #[error("invalid UTF-8 in commitment label at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("invalid base64 input")]
    InvalidBase64,

    #[error("unsupported circuit type {found} (expected 2)")]
    UnsupportedCircuitType { found: u32 },

    #[error("circuit size {found} is not a power of two")]
    InvalidCircuitSize { found: u32 },

    #[error("expected 23 commitments, found {found}")]
    CommitmentCountMismatch { found: u32 },

    #[error("unknown commitment label {label:?} at offset {offset}")]
    UnknownLabel { label: String, offset: usize },

    #[error("duplicate commitment label {label:?} at offset {offset}")]
    DuplicateLabel { label: String, offset: usize },

    #[error("recursive proofs are not supported")]
    RecursiveProofUnsupported,
}

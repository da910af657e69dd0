//! Deployment parameters and fixed layout constants.
//!
//! The layout constants describe byte formats that must never change for a
//! given deployment (generator state, block size, nonce size). The values in
//! [`EnclaveConfig`] are the knobs a deployment may choose, and are checked
//! by [`EnclaveConfig::validate`] before an enclave context is built.

use serde::{Deserialize, Serialize};

/// Length of the per-signature nonce drawn from the stream generator.
pub const NONCE_LEN: usize = 40;

/// Length of the serialized generator state (key, IV, counter).
pub const STATE_LEN: usize = 56;

/// Length of the key and IV portion of the generator state.
pub const KEY_IV_LEN: usize = 48;

/// Size of one ChaCha20 output block.
pub const BLOCK_LEN: usize = 64;

/// Number of blocks produced by a single refill.
pub const BLOCKS_PER_REFILL: usize = 8;

/// Size of the generator output buffer.
pub const OUTPUT_BUFFER_LEN: usize = BLOCK_LEN * BLOCKS_PER_REFILL;

/// Capacity reserved for the encoded public key.
pub const PUBLIC_KEY_CAPACITY: usize = 3000;

/// Capacity reserved for the encoded private key.
pub const PRIVATE_KEY_CAPACITY: usize = 6000;

/// Largest signature the boundary will ever write.
pub const MAX_SIGNATURE_LEN: usize = 2049;

/// Lattice degree exponents accepted by the boundary (512 and 1024).
pub const SUPPORTED_LOGN: [u32; 2] = [9, 10];

/// How signatures are encoded by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureEncoding {
    /// Compressed and padded to a fixed length for the degree.
    Static,
    /// Compressed, variable length.
    Compressed,
}

/// What `generate_keypair` does when a key pair is already installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RekeyPolicy {
    /// Refuse with `InvalidState`; the first key pair is kept for the
    /// lifetime of the enclave.
    #[default]
    Reject,
    /// Generate a new pair and wipe the old one, but only once the new pair
    /// has been produced successfully.
    Replace,
}

/// Signature scheme instance: lattice degree and signature encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeParams {
    /// Base-2 logarithm of the lattice degree (9 => 512, 10 => 1024).
    pub logn: u32,
    /// Signature encoding.
    pub encoding: SignatureEncoding,
}

impl SchemeParams {
    /// Lattice degree `2^logn`.
    pub fn degree(&self) -> usize {
        1usize << self.logn
    }
}

impl Default for SchemeParams {
    /// Degree 512 with fixed-length signatures.
    fn default() -> Self {
        Self {
            logn: 9,
            encoding: SignatureEncoding::Static,
        }
    }
}

/// Enclave deployment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclaveConfig {
    /// Scheme used for key generation and signing.
    pub scheme: SchemeParams,
    /// Required capacity of the caller's signature buffer.
    pub max_signature_len: usize,
    /// Behavior of a second `generate_keypair` call.
    pub rekey: RekeyPolicy,
    /// Emit message and public key bytes through the diagnostic sink.
    pub trace_payloads: bool,
}

impl Default for EnclaveConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeParams::default(),
            max_signature_len: MAX_SIGNATURE_LEN,
            rekey: RekeyPolicy::default(),
            trace_payloads: false,
        }
    }
}

/// Errors reported by [`EnclaveConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported lattice degree exponent {0}")]
    UnsupportedDegree(u32),

    #[error("signature encoding {0:?} is not supported by this engine")]
    UnsupportedEncoding(SignatureEncoding),

    #[error("signature buffer of {configured} bytes cannot hold {required}-byte signatures")]
    SignatureBufferTooSmall { configured: usize, required: usize },

    #[error("signature buffer of {0} bytes exceeds the maximum signature length")]
    SignatureBufferTooLarge(usize),
}

impl EnclaveConfig {
    /// Checks the scheme-independent limits.
    ///
    /// Engine-specific checks (encoding support, signature size for the
    /// chosen degree) are done by the engine when the enclave is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_LOGN.contains(&self.scheme.logn) {
            return Err(ConfigError::UnsupportedDegree(self.scheme.logn));
        }

        if self.max_signature_len > MAX_SIGNATURE_LEN {
            return Err(ConfigError::SignatureBufferTooLarge(self.max_signature_len));
        }

        if self.max_signature_len == 0 {
            return Err(ConfigError::SignatureBufferTooSmall {
                configured: 0,
                required: 1,
            });
        }

        Ok(())
    }
}

//! Signing engine interface.
//!
//! The lattice mathematics (key generation, sampling, signature encoding)
//! lives behind these traits. The boundary only sees two short-lived
//! contexts:
//!
//! - a [`KeyGenContext`], which draws randomness from the enclave's
//!   [`StreamGenerator`] and writes encoded keys into caller buffers
//! - a [`SignerContext`], which is loaded with a private key, started with
//!   a nonce, fed the message and asked for the signature
//!
//! Contexts are released by dropping them. The boundary drops every
//! context it creates on every exit path, successful or not.
//!
//! [`falcon::FnDsaEngine`] adapts the `fn-dsa` crate to this interface.

use crate::config::{ConfigError, NONCE_LEN, SchemeParams};
use crate::rng::StreamGenerator;

pub mod falcon;

pub use falcon::FnDsaEngine;

/// Errors reported by a signing engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine could not allocate a context")]
    OutOfMemory,

    #[error("unsupported scheme parameters (logn {logn})")]
    UnsupportedParams { logn: u32 },

    #[error("output buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },

    #[error("private key could not be decoded")]
    InvalidKey,

    #[error("no private key loaded")]
    MissingKey,

    #[error("signing was not started with a nonce")]
    NotStarted,

    #[error("engine failure: {0}")]
    Failed(String),
}

/// Encoded lengths written by a successful key generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyLengths {
    pub private: usize,
    pub public: usize,
}

/// A signature scheme implementation.
pub trait SigningEngine {
    type KeyGen: KeyGenContext;
    type Signer: SignerContext;

    /// Rejects scheme parameters this engine cannot serve, or a signature
    /// buffer too small for its signatures.
    fn check_params(&self, params: &SchemeParams, max_signature_len: usize)
    -> Result<(), ConfigError>;

    /// Allocates a key generation context.
    ///
    /// [`EngineError::OutOfMemory`] means the context could not be
    /// allocated and the call may be retried.
    fn keygen_context(&self, params: &SchemeParams) -> Result<Self::KeyGen, EngineError>;

    /// Allocates a signing context.
    fn signer_context(&self, params: &SchemeParams) -> Result<Self::Signer, EngineError>;
}

/// Key pair generation context.
pub trait KeyGenContext {
    /// Generates a key pair, writing the encoded keys to the start of each
    /// buffer.
    fn generate(
        &mut self,
        rng: &mut StreamGenerator,
        private_key: &mut [u8],
        public_key: &mut [u8],
    ) -> Result<KeyLengths, EngineError>;
}

/// Signature generation context.
pub trait SignerContext {
    /// Loads the encoded private key.
    fn set_private_key(&mut self, private_key: &[u8]) -> Result<(), EngineError>;

    /// Starts a new signature with a fresh nonce.
    fn start(&mut self, nonce: &[u8; NONCE_LEN]);

    /// Appends message bytes.
    fn update(&mut self, data: &[u8]);

    /// Writes the signature and returns its length.
    fn generate(&mut self, signature: &mut [u8]) -> Result<usize, EngineError>;
}

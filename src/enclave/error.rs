use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::entropy::EntropyError;

use super::keystore::TrustState;

/// Caller contract violations detected before any cryptographic work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("{0} pointer is null")]
    NullPointer(&'static str),

    #[error("signature buffer holds {provided} bytes, {required} required")]
    SignatureBufferTooSmall { provided: usize, required: usize },
}

/// Errors returned by the trust boundary.
#[derive(Debug, thiserror::Error)]
pub enum EnclaveError {
    /// No entropy provider could seed the generator. Not recoverable within
    /// this process.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] EntropyError),

    /// A key generation or signing context could not be allocated. The
    /// caller may retry.
    #[error("could not allocate a {0} context")]
    ResourceExhausted(&'static str),

    #[error("key generation failed: {0}")]
    KeyGenFailed(#[source] EngineError),

    #[error("signing failed: {0}")]
    SignFailed(#[source] EngineError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    #[error("operation not allowed while {0}")]
    InvalidState(TrustState),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

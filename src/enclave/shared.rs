use std::sync::{Mutex, MutexGuard};

use super::boundary::Enclave;
use super::error::EnclaveError;
use super::keystore::TrustState;
use crate::diagnostics::DiagnosticSink;
use crate::engine::SigningEngine;

/// An [`Enclave`] behind a mutex, for callers on several threads.
///
/// Each boundary call holds the lock for its whole duration, so key
/// installation and generator refills are never observed half done.
pub struct SharedEnclave<E: SigningEngine, D: DiagnosticSink> {
    inner: Mutex<Enclave<E, D>>,
}

impl<E: SigningEngine, D: DiagnosticSink> SharedEnclave<E, D> {
    pub fn new(enclave: Enclave<E, D>) -> Self {
        Self {
            inner: Mutex::new(enclave),
        }
    }

    /// See [`Enclave::generate_keypair`].
    pub fn generate_keypair(&self) -> Result<(), EnclaveError> {
        self.lock()?.generate_keypair()
    }

    /// See [`Enclave::sign`].
    pub fn sign(&self, message: &[u8], signature: &mut [u8]) -> Result<usize, EnclaveError> {
        self.lock()?.sign(message, signature)
    }

    /// Current trust state.
    pub fn state(&self) -> Result<TrustState, EnclaveError> {
        Ok(self.lock()?.state())
    }

    /// Copy of the public key, once generated.
    pub fn public_key(&self) -> Result<Option<Vec<u8>>, EnclaveError> {
        Ok(self.lock()?.public_key().map(<[u8]>::to_vec))
    }

    /// Unwraps the enclave.
    pub fn into_inner(self) -> Result<Enclave<E, D>, EnclaveError> {
        self.inner.into_inner().map_err(|poisoned| {
            EnclaveError::InvalidState(poisoned.into_inner().state())
        })
    }

    // A call that panicked while holding the lock may have left the key
    // store or generator half updated; refuse further use.
    fn lock(&self) -> Result<MutexGuard<'_, Enclave<E, D>>, EnclaveError> {
        self.inner.lock().map_err(|poisoned| {
            log::warn!("enclave lock poisoned, refusing call");
            EnclaveError::InvalidState(poisoned.get_ref().state())
        })
    }
}

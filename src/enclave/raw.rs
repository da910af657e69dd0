//! Raw-parts entry points.
//!
//! These mirror the shape of the calls that cross the isolation boundary:
//! pointers and lengths coming from untrusted memory and a status code going
//! back. Null pointers and empty lengths are rejected here, before any slice
//! is built; everything else is delegated to [`Enclave`].

use core::slice;

use super::boundary::Enclave;
use super::error::{EnclaveError, ParamError};
use crate::diagnostics::DiagnosticSink;
use crate::engine::SigningEngine;

/// Status code returned across the boundary.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryStatus {
    Success = 0,
    InvalidParameter = 1,
    InvalidState = 2,
    ResourceExhausted = 3,
    KeyGenFailed = 4,
    SignFailed = 5,
    EntropyUnavailable = 6,
    InvalidConfig = 7,
}

impl From<&EnclaveError> for BoundaryStatus {
    fn from(err: &EnclaveError) -> Self {
        match err {
            EnclaveError::EntropyUnavailable(_) => BoundaryStatus::EntropyUnavailable,
            EnclaveError::ResourceExhausted(_) => BoundaryStatus::ResourceExhausted,
            EnclaveError::KeyGenFailed(_) => BoundaryStatus::KeyGenFailed,
            EnclaveError::SignFailed(_) => BoundaryStatus::SignFailed,
            EnclaveError::InvalidParameter(_) => BoundaryStatus::InvalidParameter,
            EnclaveError::InvalidState(_) => BoundaryStatus::InvalidState,
            EnclaveError::Config(_) => BoundaryStatus::InvalidConfig,
        }
    }
}

impl<T> From<&Result<T, EnclaveError>> for BoundaryStatus {
    fn from(result: &Result<T, EnclaveError>) -> Self {
        match result {
            Ok(_) => BoundaryStatus::Success,
            Err(err) => err.into(),
        }
    }
}

/// Key generation entry point.
pub fn generate_keypair_raw<E, D>(enclave: &mut Enclave<E, D>) -> BoundaryStatus
where
    E: SigningEngine,
    D: DiagnosticSink,
{
    (&enclave.generate_keypair()).into()
}

/// Signing entry point.
///
/// On success the signature is written to `sig` and its length to
/// `*sig_len`. On failure `*sig_len` is left untouched.
///
/// # Safety
///
/// When non-null, `msg` must be valid for reads of `msg_len` bytes, `sig`
/// must be valid for writes of `sig_cap` bytes, and `sig_len` must be valid
/// for a `usize` write. The message and signature regions must not
/// overlap.
pub unsafe fn sign_raw<E, D>(
    enclave: &mut Enclave<E, D>,
    sig: *mut u8,
    sig_cap: usize,
    sig_len: *mut usize,
    msg: *const u8,
    msg_len: usize,
) -> BoundaryStatus
where
    E: SigningEngine,
    D: DiagnosticSink,
{
    let rejected = if sig.is_null() {
        Some(ParamError::NullPointer("signature"))
    } else if sig_len.is_null() {
        Some(ParamError::NullPointer("signature length"))
    } else if msg.is_null() {
        Some(ParamError::NullPointer("message"))
    } else if msg_len == 0 {
        Some(ParamError::EmptyMessage)
    } else {
        None
    };

    if let Some(err) = rejected {
        return (&enclave.reject_parameter(err)).into();
    }

    // SAFETY: pointers are non-null and the caller guarantees their extent.
    let message = unsafe { slice::from_raw_parts(msg, msg_len) };
    let signature = unsafe { slice::from_raw_parts_mut(sig, sig_cap) };

    match enclave.sign(message, signature) {
        Ok(len) => {
            // SAFETY: non-null and valid for writes per the contract above.
            unsafe { sig_len.write(len) };
            BoundaryStatus::Success
        }
        Err(err) => (&err).into(),
    }
}

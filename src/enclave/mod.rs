//! Trust boundary.
//!
//! The only two operations an untrusted caller can request are key pair
//! generation and signing. Both run against an owned [`Enclave`] context
//! holding the configuration, the signing engine, the stream generator and
//! the [`KeyStore`]. The private key never leaves this module.
//!
//! ```text
//! Uninitialized --generate_keypair ok-------> KeyReady
//! Uninitialized --generate_keypair failed---> Uninitialized
//! Uninitialized --sign----------------------> InvalidState
//! KeyReady      --generate_keypair----------> KeyReady (Reject: refused,
//!                                                       Replace: new pair)
//! KeyReady      --sign----------------------> KeyReady
//! ```
//!
//! - [`boundary`]: the [`Enclave`] context and its operations
//! - [`raw`]: pointer/length entry points returning [`BoundaryStatus`]
//! - [`SharedEnclave`]: mutex-serialized access for several callers

pub mod boundary;
mod error;
pub mod keystore;
pub mod raw;
mod shared;

pub use boundary::Enclave;
pub use error::{EnclaveError, ParamError};
pub use keystore::{KeyBlob, KeyPair, KeyStore, TrustState};
pub use raw::{BoundaryStatus, generate_keypair_raw, sign_raw};
pub use shared::SharedEnclave;

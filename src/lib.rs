//! Randomness and trust boundary for a lattice signature enclave
//!
//! This crate provides the pieces of a Falcon / FN-DSA signing enclave that
//! decide whether its signatures are safe: where the randomness comes from,
//! how it is expanded, and what an untrusted caller is allowed to ask for.
//!
//! The lattice mathematics itself is consumed through the [`engine`]
//! traits; an adapter over the `fn-dsa` crate is included.
//!
//! # Module overview
//!
//! - `entropy`
//!   Platform entropy. An ordered chain of providers (random device, OS
//!   API, CPU instruction) where the first provider to fill the whole
//!   request wins. Partial output is never accepted as seed material.
//!
//! - `rng`
//!   Deterministic expansion. Entropy is absorbed by SHAKE-256 into a
//!   56-byte generator state (key, IV, block counter) which drives a
//!   ChaCha20 stream generator. For a given state the output stream is
//!   identical on every host and for every read pattern.
//!
//! - `engine`
//!   The signing engine interface: short-lived key generation and signing
//!   contexts, plus the FN-DSA adapter.
//!
//! - `enclave`
//!   The trust boundary. An owned [`Enclave`] context exposes
//!   `generate_keypair` and `sign`, validates every argument before doing
//!   any cryptographic work, keeps the single key pair in a [`KeyStore`]
//!   and draws a fresh 40-byte nonce for every signature.
//!
//! - `diagnostics`
//!   The one-way trace channel out of the enclave. Its failures are logged
//!   and otherwise ignored.
//!
//! - `config`
//!   Layout constants and the deployment configuration (lattice degree,
//!   signature encoding, signature buffer size, rekey policy).
//!
//! # Design goals
//!
//! - No global state: everything lives in one owned context
//! - Byte order fixed to little-endian wherever words meet bytes
//! - Secrets wiped on drop
//! - Fail fast, with no partial side effects on rejected calls
//!
//! [`Enclave`]: enclave::Enclave
//! [`KeyStore`]: enclave::KeyStore

mod os;

pub mod config;
pub mod diagnostics;
pub mod enclave;
pub mod engine;
pub mod entropy;
pub mod rng;

pub use config::EnclaveConfig;
pub use enclave::{Enclave, EnclaveError, SharedEnclave, TrustState};
pub use engine::FnDsaEngine;
pub use entropy::EntropyChain;
pub use rng::StreamGenerator;

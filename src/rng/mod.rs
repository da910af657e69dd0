//! Random number generation module
//!
//! Deterministic randomness for key generation and signing:
//!
//! - [`seed`]: SHAKE-256 expansion of entropy into a [`GeneratorState`]
//! - `chacha20`: the ChaCha20 block function in the generator layout
//! - [`stream`]: the buffered [`StreamGenerator`] built on top of both
//!
//! Platform entropy is acquired by [`crate::entropy`]; everything in this
//! module is a pure function of the seed it is given.

pub(crate) mod chacha20;
pub mod seed;
pub mod stream;

pub use seed::{GeneratorState, SeedExpander};
pub use stream::{SEED_ENTROPY_LEN, StreamGenerator};

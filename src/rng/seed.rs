//! Seed expansion into generator state.
//!
//! Raw entropy is absorbed into a SHAKE-256 sponge, optionally followed by
//! an auxiliary seed (used to make runs reproducible), and exactly
//! [`STATE_LEN`] bytes are squeezed out. Those bytes are decoded as
//! little-endian words:
//!
//! ```text
//! bytes  0..32  key   (8 x u32)
//! bytes 32..48  IV    (4 x u32)
//! bytes 48..52  counter, low half
//! bytes 52..56  counter, high half
//! ```

use core::fmt;

use sha3::Shake256;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use zeroize::Zeroize;

use crate::config::{KEY_IV_LEN, STATE_LEN};

/// Key, IV and block counter of the stream generator.
///
/// The words are always decoded from and encoded to little-endian bytes, so
/// a state built from a given byte string behaves the same on every host.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratorState {
    key_iv: [u32; 12],
    counter: u64,
}

impl GeneratorState {
    /// Decodes a state from its 56-byte serialized form.
    pub fn from_bytes(bytes: &[u8; STATE_LEN]) -> Self {
        let mut key_iv = [0u32; 12];
        key_iv
            .iter_mut()
            .zip(bytes[..KEY_IV_LEN].chunks_exact(4))
            .for_each(|(w, b)| *w = u32::from_le_bytes([b[0], b[1], b[2], b[3]]));

        let lo = u32::from_le_bytes([bytes[48], bytes[49], bytes[50], bytes[51]]);
        let hi = u32::from_le_bytes([bytes[52], bytes[53], bytes[54], bytes[55]]);

        Self {
            key_iv,
            counter: u64::from(lo) | (u64::from(hi) << 32),
        }
    }

    /// Encodes the state into its 56-byte serialized form.
    pub fn to_bytes(&self) -> [u8; STATE_LEN] {
        let mut out = [0u8; STATE_LEN];
        out[..KEY_IV_LEN]
            .chunks_exact_mut(4)
            .zip(&self.key_iv)
            .for_each(|(b, w)| b.copy_from_slice(&w.to_le_bytes()));
        out[KEY_IV_LEN..].copy_from_slice(&self.counter.to_le_bytes());
        out
    }

    /// Expands `entropy` (and an optional auxiliary seed) into a state.
    pub fn expand(entropy: &[u8], aux_seed: Option<&[u8]>) -> Self {
        let mut expander = SeedExpander::new();
        expander.absorb(entropy);
        if let Some(aux) = aux_seed {
            expander.absorb(aux);
        }
        expander.finish()
    }

    /// Current block counter.
    ///
    /// The counter wraps to zero after `u64::MAX`. From a seeded state that
    /// takes 2^64 blocks, so within one generator's lifetime it only ever
    /// increases.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub(crate) fn key_iv(&self) -> &[u32; 12] {
        &self.key_iv
    }

    /// Returns the counter for the next block and steps it forward.
    pub(crate) fn next_counter(&mut self) -> u64 {
        let current = self.counter;
        self.counter = self.counter.wrapping_add(1);
        current
    }
}

impl fmt::Debug for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorState")
            .field("key_iv", &"<redacted>")
            .field("counter", &self.counter)
            .finish()
    }
}

impl Drop for GeneratorState {
    fn drop(&mut self) {
        self.key_iv.zeroize();
        self.counter.zeroize();
    }
}

/// SHAKE-256 sponge used to turn entropy into a [`GeneratorState`].
///
/// Input may be absorbed in any number of calls; the squeeze happens once,
/// in [`SeedExpander::finish`].
#[derive(Clone, Default)]
pub struct SeedExpander {
    sponge: Shake256,
}

impl SeedExpander {
    /// Creates an empty sponge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs more seed material.
    pub fn absorb(&mut self, data: &[u8]) {
        self.sponge.update(data);
    }

    /// Squeezes exactly [`STATE_LEN`] bytes and decodes them as a state.
    pub fn finish(self) -> GeneratorState {
        let mut raw = [0u8; STATE_LEN];
        self.sponge.finalize_xof().read(&mut raw);

        let state = GeneratorState::from_bytes(&raw);
        raw.zeroize();
        state
    }
}

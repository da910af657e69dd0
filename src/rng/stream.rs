//! ChaCha20-based stream generator
//!
//! The generator expands a [`GeneratorState`] into an unbounded byte
//! stream. Output is produced [`BLOCKS_PER_REFILL`] blocks at a time into an
//! internal buffer; reads consume the buffer from a cursor and trigger a
//! refill as soon as it is exhausted.
//!
//! For a fixed state the stream is a pure function of that state: it does
//! not depend on the host, nor on how reads are batched. Reading 100 bytes
//! at once yields the same bytes as reading 60 and then 40.
//!
//! The block counter advances by one for each block produced and is never
//! rewound, so no two blocks of one generator share an input state.

use core::fmt;

use fn_dsa::{CryptoRng, RngCore, RngError};
use zeroize::Zeroize;

use super::chacha20;
use super::seed::GeneratorState;
use crate::config::{BLOCK_LEN, OUTPUT_BUFFER_LEN};
use crate::entropy::{EntropyChain, EntropyError};

/// Number of entropy bytes drawn from the platform to seed a generator.
pub const SEED_ENTROPY_LEN: usize = 32;

/// Deterministic random byte generator used for key generation and
/// signature nonces.
pub struct StreamGenerator {
    state: GeneratorState,

    /// Buffered output; bytes before `ptr` have been handed out.
    buf: [u8; OUTPUT_BUFFER_LEN],

    /// Next unconsumed byte in `buf`. Always `< OUTPUT_BUFFER_LEN` between
    /// calls.
    ptr: usize,
}

impl StreamGenerator {
    /// Initializes the generator from `state` and fills the first buffer.
    pub fn new(state: GeneratorState) -> Self {
        let mut generator = Self {
            state,
            buf: [0u8; OUTPUT_BUFFER_LEN],
            ptr: 0,
        };
        generator.refill();
        generator
    }

    /// Expands `entropy` (and an optional auxiliary seed) and initializes
    /// a generator from the result.
    pub fn from_seed(entropy: &[u8], aux_seed: Option<&[u8]>) -> Self {
        Self::new(GeneratorState::expand(entropy, aux_seed))
    }

    /// Seeds a generator from the first entropy provider that succeeds.
    pub fn from_entropy(chain: &mut EntropyChain) -> Result<Self, EntropyError> {
        Self::from_entropy_with_seed(chain, None)
    }

    /// Seeds a generator from platform entropy followed by an auxiliary
    /// seed.
    pub fn from_entropy_with_seed(
        chain: &mut EntropyChain,
        aux_seed: Option<&[u8]>,
    ) -> Result<Self, EntropyError> {
        let mut entropy = [0u8; SEED_ENTROPY_LEN];
        chain.fill(&mut entropy)?;

        let generator = Self::from_seed(&entropy, aux_seed);
        entropy.zeroize();

        Ok(generator)
    }

    /// Regenerates the whole output buffer and resets the cursor.
    ///
    /// One block is produced per [`BLOCK_LEN`] bytes of buffer, each with
    /// its own counter value.
    pub fn refill(&mut self) {
        for chunk in self.buf.chunks_exact_mut(BLOCK_LEN) {
            let counter = self.state.next_counter();
            chunk.copy_from_slice(&chacha20::block(self.state.key_iv(), counter));
        }
        self.ptr = 0;

        log::trace!("generator refilled, next block counter {}", self.state.counter());
    }

    /// Fills `dst` with the next bytes of the stream.
    pub fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut offset = 0;

        while offset < dst.len() {
            let take = (OUTPUT_BUFFER_LEN - self.ptr).min(dst.len() - offset);
            dst[offset..offset + take].copy_from_slice(&self.buf[self.ptr..self.ptr + take]);

            offset += take;
            self.ptr += take;

            if self.ptr == OUTPUT_BUFFER_LEN {
                self.refill();
            }
        }
    }

    /// Counter value the next produced block will use. Wraps like
    /// [`GeneratorState::counter`].
    pub fn counter(&self) -> u64 {
        self.state.counter()
    }

    /// Number of bytes still available before the next refill.
    pub fn buffered(&self) -> usize {
        OUTPUT_BUFFER_LEN - self.ptr
    }
}

impl fmt::Debug for StreamGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamGenerator")
            .field("state", &self.state)
            .field("buffered", &self.buffered())
            .finish()
    }
}

impl Drop for StreamGenerator {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

impl RngCore for StreamGenerator {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        StreamGenerator::fill_bytes(self, &mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        StreamGenerator::fill_bytes(self, &mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        StreamGenerator::fill_bytes(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        StreamGenerator::fill_bytes(self, dest);
        Ok(())
    }
}

impl CryptoRng for StreamGenerator {}

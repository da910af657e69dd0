//! ChaCha20 block function in the generator layout.
//!
//! The permutation is the standard 20-round ChaCha core. The input layout
//! differs from RFC 8439: words 4..12 carry the 256-bit key, words 12..16
//! carry a 128-bit IV, and the 64-bit block counter is XORed into the last
//! two IV words instead of occupying a word of its own. With an all-zero
//! key, IV and counter the first block is therefore identical to the RFC
//! keystream block for the all-zero key and nonce.
//!
//! Every conversion between words and bytes is little-endian, so the output
//! for a given state does not depend on the host.

use crate::config::BLOCK_LEN;

/// ChaCha20 constant words, `"expand 32-byte k"` read as little-endian
/// `u32` values.
const CHACHA20_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Performs one ChaCha20 quarter round on four words of the state.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies 10 double rounds (4 column + 4 diagonal quarter rounds each).
fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Computes one 64-byte block.
///
/// # Parameters
/// - `key_iv`: 8 key words followed by 4 IV words
/// - `counter`: 64-bit block counter, XORed into IV words 2 and 3
///
/// Reusing a `(key_iv, counter)` pair reproduces the same block; the caller
/// owns the counter and must never step it backwards.
pub(crate) fn block(key_iv: &[u32; 12], counter: u64) -> [u8; BLOCK_LEN] {
    let mut state = [0u32; 16];

    state[0..4].copy_from_slice(&CHACHA20_CONSTANTS);
    state[4..16].copy_from_slice(key_iv);
    state[14] ^= counter as u32;
    state[15] ^= (counter >> 32) as u32;

    // Preserve the input for feed-forward
    let original = state;

    rounds(&mut state);

    state
        .iter_mut()
        .zip(&original)
        .for_each(|(s, o)| *s = s.wrapping_add(*o));

    let mut out = [0u8; BLOCK_LEN];
    out.chunks_exact_mut(4)
        .zip(&state)
        .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));

    out
}

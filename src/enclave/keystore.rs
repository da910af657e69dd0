//! Key material held inside the enclave.
//!
//! A [`KeyStore`] holds at most one key pair and the [`TrustState`] that
//! says whether it may be used. Private key bytes are only reachable from
//! within the crate; callers outside the enclave can read the public key
//! and nothing else.

use core::fmt;

use zeroize::Zeroize;

use crate::config::{PRIVATE_KEY_CAPACITY, PUBLIC_KEY_CAPACITY};

/// Whether a key pair is available for signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrustState {
    /// No key pair has been generated yet.
    Uninitialized,
    /// A key pair is installed; signing is allowed.
    KeyReady,
}

impl fmt::Display for TrustState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustState::Uninitialized => f.write_str("uninitialized"),
            TrustState::KeyReady => f.write_str("key ready"),
        }
    }
}

/// Fixed-capacity byte blob with an actual length.
///
/// `len() <= CAP` always holds. The whole capacity is wiped on drop.
#[derive(Clone)]
pub struct KeyBlob<const CAP: usize> {
    bytes: Box<[u8; CAP]>,
    len: usize,
}

impl<const CAP: usize> KeyBlob<CAP> {
    /// An empty blob.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0u8; CAP]),
            len: 0,
        }
    }

    /// Maximum number of bytes the blob can hold.
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Number of meaningful bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The meaningful bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The whole buffer, for an engine to write into.
    pub(crate) fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[..]
    }

    /// Records how many bytes were written. Returns `false` and leaves the
    /// blob unchanged if `len` exceeds the capacity.
    pub(crate) fn set_len(&mut self, len: usize) -> bool {
        if len > CAP {
            return false;
        }
        self.len = len;
        true
    }
}

impl<const CAP: usize> Default for KeyBlob<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> Zeroize for KeyBlob<CAP> {
    fn zeroize(&mut self) {
        self.bytes[..].zeroize();
        self.len = 0;
    }
}

impl<const CAP: usize> Drop for KeyBlob<CAP> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const CAP: usize> fmt::Debug for KeyBlob<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBlob")
            .field("len", &self.len)
            .field("capacity", &CAP)
            .finish()
    }
}

/// Encoded public key blob.
pub type PublicKey = KeyBlob<PUBLIC_KEY_CAPACITY>;

/// Encoded private key blob.
pub type PrivateKey = KeyBlob<PRIVATE_KEY_CAPACITY>;

/// A public/private key pair.
#[derive(Debug, Default)]
pub struct KeyPair {
    pub(crate) public: PublicKey,
    pub(crate) private: PrivateKey,
}

impl KeyPair {
    /// Empty blobs ready for an engine to fill.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Holder of the enclave's single key pair.
#[derive(Debug)]
pub struct KeyStore {
    keys: KeyPair,
    state: TrustState,
}

impl KeyStore {
    /// An empty store in [`TrustState::Uninitialized`].
    pub fn new() -> Self {
        Self {
            keys: KeyPair::new(),
            state: TrustState::Uninitialized,
        }
    }

    /// Current trust state.
    pub fn state(&self) -> TrustState {
        self.state
    }

    /// Installs a freshly generated pair, wiping any previous one, and moves
    /// to [`TrustState::KeyReady`].
    ///
    /// A pair with an empty private key is not installed.
    pub(crate) fn install(&mut self, keys: KeyPair) -> bool {
        if keys.private.is_empty() {
            return false;
        }

        // The previous pair is wiped when dropped here
        self.keys = keys;
        self.state = TrustState::KeyReady;
        true
    }

    /// The public key, once a pair is installed.
    pub fn public_key(&self) -> Option<&[u8]> {
        match self.state {
            TrustState::KeyReady => Some(self.keys.public.as_bytes()),
            TrustState::Uninitialized => None,
        }
    }

    /// The private key, once a pair is installed.
    pub(crate) fn private_key(&self) -> Option<&[u8]> {
        match self.state {
            TrustState::KeyReady => Some(self.keys.private.as_bytes()),
            TrustState::Uninitialized => None,
        }
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

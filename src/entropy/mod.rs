//! Platform entropy acquisition.
//!
//! Seeding never trusts a single mechanism. An [`EntropyChain`] holds an
//! ordered list of [`EntropyProvider`]s and returns the output of the first
//! one that fills the whole request:
//!
//! 1. [`DeviceRandom`]: the OS random device (`/dev/urandom`)
//! 2. [`PlatformRandom`]: the OS entropy API (`getrandom`,
//!    `arc4random_buf`, `BCryptGenRandom`)
//! 3. [`HardwareRandom`]: the CPU random instruction (`RDRAND`), the only
//!    source left inside an isolated context
//!
//! A provider either fills the entire buffer or fails; partial output is
//! wiped and never used as seed material.

use core::fmt;
use std::io;

use zeroize::{Zeroize, Zeroizing};

mod device;
mod hardware;
mod platform;

pub use device::DeviceRandom;
pub use hardware::HardwareRandom;
pub use platform::PlatformRandom;

/// The mechanism behind an entropy provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OS random device file.
    Device,
    /// OS entropy API.
    PlatformApi,
    /// CPU random instruction.
    Hardware,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Device => "device",
            ProviderKind::PlatformApi => "platform API",
            ProviderKind::Hardware => "hardware",
        };
        f.write_str(name)
    }
}

/// Entropy acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum EntropyError {
    #[error("{0} entropy is not available on this platform")]
    Unsupported(ProviderKind),

    #[error("{kind} entropy could not supply all {requested} bytes")]
    ShortRead { kind: ProviderKind, requested: usize },

    #[error("{kind} entropy I/O failed: {source}")]
    Io {
        kind: ProviderKind,
        #[source]
        source: io::Error,
    },

    #[error("{kind} entropy reported failure code {code}")]
    Platform { kind: ProviderKind, code: i64 },

    #[error("hardware random instruction did not return data")]
    HardwareFault,

    #[error("no entropy provider could supply {len} bytes")]
    Unavailable { len: usize },
}

/// A source of unpredictable bytes.
pub trait EntropyProvider {
    /// The mechanism this provider uses.
    fn kind(&self) -> ProviderKind;

    /// Fills all of `dest`, or fails.
    ///
    /// On error the content of `dest` is unspecified and must not be used.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Ordered list of providers tried one after the other.
#[derive(Default)]
pub struct EntropyChain {
    providers: Vec<Box<dyn EntropyProvider + Send>>,
}

impl EntropyChain {
    /// Creates a chain with no providers. Filling from it always fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default chain for the current target: device, platform API,
    /// hardware instruction.
    pub fn platform_default() -> Self {
        let mut chain = Self::new();

        #[cfg(unix)]
        chain.push(DeviceRandom::new());

        chain.push(PlatformRandom);
        chain.push(HardwareRandom);
        chain
    }

    /// Appends a provider and returns the chain.
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: EntropyProvider + Send + 'static,
    {
        self.push(provider);
        self
    }

    /// Appends a provider at the lowest priority.
    pub fn push<P>(&mut self, provider: P)
    where
        P: EntropyProvider + Send + 'static,
    {
        self.providers.push(Box::new(provider));
    }

    /// Provider kinds in the order they are tried.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Number of providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Fills `dest` from the first provider that succeeds and returns its
    /// kind.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<ProviderKind, EntropyError> {
        for provider in &mut self.providers {
            let kind = provider.kind();

            match provider.fill(dest) {
                Ok(()) => {
                    log::debug!("seeded {} bytes from {} entropy", dest.len(), kind);
                    return Ok(kind);
                }
                Err(err) => {
                    dest.zeroize();
                    log::warn!("{} entropy provider failed: {}", kind, err);
                }
            }
        }

        Err(EntropyError::Unavailable { len: dest.len() })
    }

    /// Returns `len` fresh entropy bytes, wiped when dropped.
    pub fn acquire(&mut self, len: usize) -> Result<Zeroizing<Vec<u8>>, EntropyError> {
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        self.fill(&mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Debug for EntropyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntropyChain")
            .field("providers", &self.kinds())
            .finish()
    }
}

//! CPU random instruction.
//!
//! Inside an isolated execution context the OS is untrusted and this is the
//! only entropy left. On x86_64 the `RDRAND` instruction is used when the
//! CPU reports it; each 64-bit draw is retried a bounded number of times,
//! as Intel recommends for transient underflow.

use super::{EntropyError, EntropyProvider, ProviderKind};

/// Retries per 64-bit draw before the instruction is considered faulty.
#[cfg(target_arch = "x86_64")]
const RDRAND_RETRIES: usize = 10;

/// Entropy from the CPU random number instruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct HardwareRandom;

impl HardwareRandom {
    /// Whether the current CPU offers a usable random instruction.
    pub fn is_available() -> bool {
        #[cfg(target_arch = "x86_64")]
        {
            std::arch::is_x86_feature_detected!("rdrand")
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            false
        }
    }
}

impl EntropyProvider for HardwareRandom {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Hardware
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if !Self::is_available() {
            return Err(EntropyError::Unsupported(ProviderKind::Hardware));
        }

        #[cfg(target_arch = "x86_64")]
        {
            // SAFETY: RDRAND support was checked above.
            unsafe { rdrand_fill(dest) }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = dest;
            Err(EntropyError::Unsupported(ProviderKind::Hardware))
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand_fill(dest: &mut [u8]) -> Result<(), EntropyError> {
    use core::arch::x86_64::_rdrand64_step;

    for chunk in dest.chunks_mut(8) {
        let mut word = 0u64;
        let mut ok = false;

        for _ in 0..RDRAND_RETRIES {
            if _rdrand64_step(&mut word) == 1 {
                ok = true;
                break;
            }
        }

        if !ok {
            return Err(EntropyError::HardwareFault);
        }

        chunk.copy_from_slice(&word.to_le_bytes()[..chunk.len()]);
    }

    Ok(())
}

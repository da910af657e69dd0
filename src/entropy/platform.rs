use super::{EntropyError, EntropyProvider, ProviderKind};
use crate::os::sys_random;

/// Entropy from the operating system API selected at build time.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformRandom;

impl EntropyProvider for PlatformRandom {
    fn kind(&self) -> ProviderKind {
        ProviderKind::PlatformApi
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        sys_random(dest)
    }
}

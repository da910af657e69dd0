use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::{EntropyError, EntropyProvider, ProviderKind};

/// Reads entropy from an OS random device file.
///
/// The file is opened for each request and closed when the handle goes out
/// of scope, whether the read succeeded or not.
#[derive(Clone, Debug)]
pub struct DeviceRandom {
    path: PathBuf,
}

impl DeviceRandom {
    /// Path of the non-blocking random device on Unix-like systems.
    pub const DEFAULT_PATH: &'static str = "/dev/urandom";

    /// Uses [`DeviceRandom::DEFAULT_PATH`].
    pub fn new() -> Self {
        Self::with_path(Self::DEFAULT_PATH)
    }

    /// Uses a specific device (or file) path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Device path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DeviceRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyProvider for DeviceRandom {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Device
    }

    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if dest.is_empty() {
            return Ok(());
        }

        let mut device = File::open(&self.path).map_err(|source| EntropyError::Io {
            kind: ProviderKind::Device,
            source,
        })?;

        let requested = dest.len();

        // read_exact retries on EINTR
        device.read_exact(dest).map_err(|source| {
            if source.kind() == io::ErrorKind::UnexpectedEof {
                EntropyError::ShortRead {
                    kind: ProviderKind::Device,
                    requested,
                }
            } else {
                EntropyError::Io {
                    kind: ProviderKind::Device,
                    source,
                }
            }
        })
    }
}

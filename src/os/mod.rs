//! Operating system abstraction layer
//!
//! Access to the entropy API of the host operating system. The
//! implementation is selected at compile time; each submodule exposes the
//! same `sys_random` function so [`crate::entropy::PlatformRandom`] stays
//! portable.
//!
//! Targets without a known API get a stub that always reports
//! [`EntropyError::Unsupported`], which lets the entropy chain fall through
//! to the next provider instead of failing to build.

#[cfg(target_os = "macos")]
pub(crate) mod macos;

#[cfg(target_os = "macos")]
pub(crate) use macos::*;

#[cfg(target_os = "linux")]
pub(crate) mod linux;

#[cfg(target_os = "linux")]
pub(crate) use linux::*;

#[cfg(target_os = "windows")]
pub(crate) mod windows;

#[cfg(target_os = "windows")]
pub(crate) use windows::*;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub(crate) fn sys_random(_buf: &mut [u8]) -> Result<(), crate::entropy::EntropyError> {
    Err(crate::entropy::EntropyError::Unsupported(
        crate::entropy::ProviderKind::PlatformApi,
    ))
}

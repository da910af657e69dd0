//! Linux entropy through the `getrandom(2)` system call.
//!
//! `getrandom` reads from the kernel pool directly and needs no file
//! descriptor. Partial reads and `EINTR` are retried until the buffer is
//! full; any other failure is reported to the caller.

use std::io;

use libc::{c_void, getrandom};

use crate::entropy::{EntropyError, ProviderKind};

/// Fills `buf` completely from the kernel entropy pool.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<(), EntropyError> {
    let mut filled = 0;

    while filled < buf.len() {
        let ret = unsafe {
            getrandom(
                buf[filled..].as_mut_ptr() as *mut c_void,
                buf.len() - filled,
                0,
            )
        };

        if ret < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(EntropyError::Io {
                kind: ProviderKind::PlatformApi,
                source: err,
            });
        }

        if ret == 0 {
            return Err(EntropyError::ShortRead {
                kind: ProviderKind::PlatformApi,
                requested: buf.len(),
            });
        }

        filled += ret as usize;
    }

    Ok(())
}

use libc::arc4random_buf;

use crate::entropy::EntropyError;

/// `arc4random_buf` cannot fail and always fills the whole buffer.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<(), EntropyError> {
    unsafe {
        arc4random_buf(buf.as_mut_ptr() as *mut libc::c_void, buf.len());
    }
    Ok(())
}

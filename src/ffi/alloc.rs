//! Memory handed to the host and later returned through `ts3plugin_freeMemory`.
//!
//! The host frees with a bare pointer, so every block carries its size in a
//! header in front of the payload.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::mem::{align_of, size_of};
use std::os::raw::c_char;
use std::ptr;

/// Header size. Also the payload alignment.
const HEADER: usize = 16;

fn layout(total: usize) -> Option<Layout> {
    Layout::from_size_align(total, HEADER).ok()
}

/// Zeroed block of `size` bytes, or null if allocation fails.
pub fn alloc_block(size: usize) -> *mut u8 {
    let Some(total) = size.checked_add(HEADER) else {
        return ptr::null_mut();
    };
    let Some(layout) = layout(total) else {
        return ptr::null_mut();
    };
    unsafe {
        let base = alloc_zeroed(layout);
        if base.is_null() {
            return ptr::null_mut();
        }
        (base as *mut usize).write(total);
        base.add(HEADER)
    }
}

/// Releases a block from [`alloc_block`]. Null is ignored.
///
/// # Safety
/// `payload` must be null or a pointer returned by [`alloc_block`] that has
/// not been freed yet.
pub unsafe fn free_block(payload: *mut u8) {
    if payload.is_null() {
        return;
    }
    let base = payload.sub(HEADER);
    let total = (base as *const usize).read();
    dealloc(base, Layout::from_size_align_unchecked(total, HEADER));
}

/// Moves a plain C value into a host-freeable block.
pub fn alloc_value<T: Copy>(value: T) -> *mut T {
    debug_assert!(align_of::<T>() <= HEADER);
    let p = alloc_block(size_of::<T>()) as *mut T;
    if !p.is_null() {
        unsafe { p.write(value) };
    }
    p
}

/// Null-terminated pointer array with room for `len` entries.
pub fn alloc_ptr_array<T>(len: usize) -> *mut *mut T {
    match len
        .checked_add(1)
        .and_then(|n| n.checked_mul(size_of::<*mut T>()))
    {
        Some(bytes) => alloc_block(bytes) as *mut *mut T,
        None => ptr::null_mut(),
    }
}

/// Copies `src` into a fixed C buffer, truncating on a char boundary and
/// always leaving a terminating NUL.
pub fn copy_to_c_buf(dst: &mut [c_char], src: &str) {
    if dst.is_empty() {
        return;
    }
    let mut end = src.len().min(dst.len() - 1);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    for (d, &b) in dst.iter_mut().zip(src.as_bytes()[..end].iter()) {
        *d = b as c_char;
    }
    dst[end] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn as_str(buf: &[c_char]) -> &str {
        unsafe { CStr::from_ptr(buf.as_ptr()) }.to_str().unwrap()
    }

    #[test]
    fn test_block_round_trip() {
        let p = alloc_block(300);
        assert!(!p.is_null());
        assert_eq!(p as usize % HEADER, 0);
        unsafe {
            assert!(std::slice::from_raw_parts(p, 300).iter().all(|&b| b == 0));
            p.write_bytes(0xAB, 300);
            free_block(p);
            free_block(ptr::null_mut());
        }
    }

    #[test]
    fn test_ptr_array_is_null_terminated() {
        let arr = alloc_ptr_array::<u32>(3);
        assert!(!arr.is_null());
        unsafe {
            assert!((*arr.add(3)).is_null());
            free_block(arr as *mut u8);
        }
    }

    #[test]
    fn test_copy_truncates() {
        let mut buf = [1 as c_char; 8];
        copy_to_c_buf(&mut buf, "Enable/Disable");
        assert_eq!(as_str(&buf), "Enable/");

        let mut buf = [1 as c_char; 8];
        copy_to_c_buf(&mut buf, "ab");
        assert_eq!(as_str(&buf), "ab");
    }

    #[test]
    fn test_copy_keeps_utf8_whole() {
        // "ë" is two bytes and would straddle the last free byte
        let mut buf = [0 as c_char; 4];
        copy_to_c_buf(&mut buf, "Zoëy");
        assert_eq!(as_str(&buf), "Zo");
    }
}

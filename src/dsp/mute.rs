//! Outgoing voice silencing.
//!
//! Contract:
//! - Runs on the host's audio thread
//! - No allocation, no locking, no logging
//! - Never touches samples outside `frames * channels`

/// Number of interleaved samples covered by a host voice callback.
///
/// Negative counts from the host cover nothing, and so does an overflowing product.
#[inline]
pub fn interleaved_len(frames: i32, channels: i32) -> usize {
    if frames <= 0 || channels <= 0 {
        return 0;
    }
    (frames as usize).checked_mul(channels as usize).unwrap_or(0)
}

/// Silences `samples` in place when `muted`. Returns whether the buffer was edited.
#[inline]
pub fn apply_mute_transform(samples: &mut [i16], muted: bool) -> bool {
    if !muted {
        return false;
    }
    samples.fill(0);
    true
}

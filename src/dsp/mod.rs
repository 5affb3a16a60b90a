pub mod mute;

pub use mute::{apply_mute_transform, interleaved_len};

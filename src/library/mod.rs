//! Song library: scanning the clip directory and the immutable title index
//! built from it.

mod catalog;
mod scan;

pub use catalog::{normalize_title, SongLibrary};
pub use scan::{derive_title, scan_audio_dir, AUDIO_EXTENSIONS};

//! I/O utilities for streamseg.
//!
//! Provides input reading with memory mapping support for large files,
//! along with Unicode helpers for cutting streamed text safely.

pub mod reader;
pub mod unicode;

pub use reader::{FileReader, STDIN_PATH, read_file, read_input, read_stream};
pub use unicode::{grapheme_prefix_ends, preview, truncate_graphemes};

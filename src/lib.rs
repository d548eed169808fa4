//! Core library for plistview, a property list viewer.
//! Decodes binary and XML property lists into an ordered value tree, renders that tree as
//! indented JSON-like text, and falls back to a lossy text view when decoding fails.

pub mod config;
mod decode;
pub mod dropped;
mod error;
mod gui;
pub mod statics;
mod value;

pub use decode::{DecodeResult, PlistFormat, decode_bytes, load, save_rendered, write_dump};
pub use dropped::{normalize, paths_from_dropped};
pub use error::ViewerError;
pub use gui::{ViewMode, ViewerState, run_gui};
pub use value::{PlistInteger, PlistValue, render};

use std::path::PathBuf;
use thiserror::Error;

/// Failures that cross the library boundary.
///
/// `StructuredDecode`, `UnsupportedFormat` and `Io` never escape [`crate::load`]: they are
/// folded into [`crate::DecodeResult`] variants. `NoDecodedContent` is what Save/Copy report.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("{0}")]
    StructuredDecode(#[from] plist::Error),

    #[error("unsupported property list format")]
    UnsupportedFormat,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no decoded content available for this file")]
    NoDecodedContent,
}

use crate::{PlistValue, ViewerError, statics};
use anyhow::Context;
use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

/// Property list encodings, detected from content (never from the file extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Binary,
    Xml,
}

impl PlistFormat {
    /// `None` for anything that is neither binary nor XML, including OpenStep text plists.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(statics::BPLIST_MAGIC) {
            return Some(PlistFormat::Binary);
        }
        // Skip a UTF-8 BOM and leading whitespace before looking for markup.
        let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match body.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'<') => Some(PlistFormat::Xml),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlistFormat::Binary => "binary",
            PlistFormat::Xml => "xml",
        }
    }
}

/// Outcome of loading one file. Every failure mode is a variant; nothing is raised.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeResult {
    /// The whole file parsed as a property list.
    Decoded {
        value: PlistValue,
        format: PlistFormat,
    },
    /// Structured decoding failed; `text` is the file's bytes as lossy UTF-8.
    RawFallback { text: String, decode_error: String },
    /// The file could not be read at all.
    Unreadable { message: String },
}

impl DecodeResult {
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeResult::Decoded { .. })
    }

    pub fn value(&self) -> Option<&PlistValue> {
        match self {
            DecodeResult::Decoded { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The text offered by Save JSON / Copy JSON.
    pub fn rendered_json(&self) -> Result<String, ViewerError> {
        self.value()
            .map(crate::render)
            .ok_or(ViewerError::NoDecodedContent)
    }

    /// Text for the raw view. Decoded files have none.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            DecodeResult::Decoded { .. } => None,
            DecodeResult::RawFallback { text, .. } => Some(text),
            DecodeResult::Unreadable { message } => Some(message),
        }
    }

    pub fn status_line(&self, path: &Path) -> String {
        match self {
            DecodeResult::Decoded { format, .. } => format!(
                "{} ({}): {}",
                statics::EN_STATUS_DECODED,
                format.label(),
                path.display()
            ),
            DecodeResult::RawFallback { decode_error, .. } => format!(
                "{}: {} - error: {decode_error}",
                statics::EN_STATUS_RAW,
                path.display()
            ),
            DecodeResult::Unreadable { .. } => {
                format!("{}: {}", statics::EN_STATUS_UNREADABLE, path.display())
            }
        }
    }
}

/// Load a file, decoding it as a property list when possible.
pub fn load(path: &Path) -> DecodeResult {
    match read_bytes(path) {
        Ok(bytes) => {
            let result = decode_bytes(&bytes);
            match &result {
                DecodeResult::Decoded { format, .. } => {
                    log::debug!("{}: decoded {} plist", path.display(), format.label());
                }
                DecodeResult::RawFallback { decode_error, .. } => {
                    log::warn!("{}: not a property list ({decode_error})", path.display());
                }
                DecodeResult::Unreadable { .. } => {}
            }
            result
        }
        Err(e) => {
            log::warn!("{e}");
            DecodeResult::Unreadable {
                message: format!("{}: {e}", statics::EN_ERR_UNABLE_TO_READ),
            }
        }
    }
}

/// Decode already-read bytes. The fallback reuses the same bytes.
pub fn decode_bytes(bytes: &[u8]) -> DecodeResult {
    match parse_plist(bytes) {
        Ok((value, format)) => DecodeResult::Decoded { value, format },
        Err(e) => DecodeResult::RawFallback {
            text: String::from_utf8_lossy(bytes).into_owned(),
            decode_error: e.to_string(),
        },
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ViewerError> {
    fs::read(path).map_err(|source| ViewerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_plist(bytes: &[u8]) -> Result<(PlistValue, PlistFormat), ViewerError> {
    let format = PlistFormat::detect(bytes).ok_or(ViewerError::UnsupportedFormat)?;
    let value = match format {
        // `from_reader` sniffs the `bplist` header itself.
        PlistFormat::Binary => plist::Value::from_reader(Cursor::new(bytes))?,
        PlistFormat::Xml => plist::Value::from_reader_xml(bytes)?,
    };
    Ok((value.into(), format))
}

/// Write rendered JSON verbatim to `path`.
pub fn save_rendered(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text.as_bytes()).with_context(|| format!("writing {path:?}"))?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Headless mode: write each file's rendering (or raw fallback text) to `out`.
/// Returns the files that did not decode.
pub fn write_dump(paths: &[PathBuf], out: &mut impl Write) -> anyhow::Result<Vec<PathBuf>> {
    let mut failed = Vec::new();
    for (i, path) in paths.iter().enumerate() {
        if paths.len() > 1 {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "==> {} <==", path.display())?;
        }

        let result = load(path);
        match result.rendered_json() {
            Ok(json) => writeln!(out, "{json}")?,
            Err(_) => {
                log::error!("{}", result.status_line(path));
                if let Some(raw) = result.raw_text() {
                    writeln!(out, "{raw}")?;
                }
                failed.push(path.clone());
            }
        }
    }
    out.flush().context("flushing output")?;
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::{DecodeResult, PlistFormat, decode_bytes, load};
    use crate::{PlistInteger, PlistValue, ViewerError};
    use std::path::Path;

    const XML_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>Name</key>
  <string>Example</string>
  <key>Count</key>
  <integer>3</integer>
</dict>
</plist>
"#;

    #[test]
    fn detect_format_uses_content_only() {
        assert_eq!(
            PlistFormat::detect(b"bplist00\x08"),
            Some(PlistFormat::Binary)
        );
        assert_eq!(
            PlistFormat::detect(XML_DOC.as_bytes()),
            Some(PlistFormat::Xml)
        );
        assert_eq!(
            PlistFormat::detect(b"\xEF\xBB\xBF  \n<plist/>"),
            Some(PlistFormat::Xml)
        );
        assert_eq!(PlistFormat::detect(b"{ a = 1; }"), None);
        assert_eq!(PlistFormat::detect(b""), None);
    }

    #[test]
    fn openstep_text_is_not_decoded() {
        let inputs: [&[u8]; 3] = [b"(one, two)\n", b"{ a = 1; }", b"plain words"];
        for input in inputs {
            let result = decode_bytes(input);
            let DecodeResult::RawFallback { text, decode_error } = &result else {
                panic!("expected raw fallback, got {result:?}");
            };
            assert_eq!(text.as_bytes(), input);
            assert_eq!(decode_error, "unsupported property list format");
        }
    }

    #[test]
    fn decode_xml_document() {
        let result = decode_bytes(XML_DOC.as_bytes());
        let DecodeResult::Decoded { value, format } = &result else {
            panic!("expected decoded, got {result:?}");
        };
        assert_eq!(*format, PlistFormat::Xml);
        assert_eq!(
            value.get("Name"),
            Some(&PlistValue::String("Example".to_string()))
        );
        assert_eq!(
            value.get("Count"),
            Some(&PlistValue::Integer(PlistInteger::Signed(3)))
        );
        assert_eq!(result.raw_text(), None);
        assert_eq!(
            result.rendered_json().unwrap(),
            "{\n  \"Name\": \"Example\",\n  \"Count\": 3\n}"
        );
    }

    #[test]
    fn truncated_binary_falls_back_to_raw() {
        let result = decode_bytes(b"bplist00\x00\x01");
        let DecodeResult::RawFallback { text, decode_error } = &result else {
            panic!("expected raw fallback, got {result:?}");
        };
        assert!(text.starts_with("bplist00"));
        assert!(!decode_error.is_empty());
        assert!(matches!(
            result.rendered_json(),
            Err(ViewerError::NoDecodedContent)
        ));
    }

    #[test]
    fn invalid_utf8_is_replaced_in_fallback() {
        let result = decode_bytes(b"<html>\xFF\xFE</html>");
        let DecodeResult::RawFallback { text, .. } = &result else {
            panic!("expected raw fallback, got {result:?}");
        };
        assert!(text.contains('\u{FFFD}'));
        assert!(text.starts_with("<html>"));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.plist");
        let result = load(&path);
        assert!(matches!(result, DecodeResult::Unreadable { .. }));
        assert!(result.raw_text().unwrap().starts_with("Unable to read file"));
        assert!(
            result
                .status_line(&path)
                .starts_with("Error reading file: ")
        );
    }

    #[test]
    fn directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path()), DecodeResult::Unreadable { .. }));
    }

    #[test]
    fn status_line_names_format_and_error() {
        let path = Path::new("/tmp/x.plist");
        let decoded = decode_bytes(XML_DOC.as_bytes());
        assert_eq!(decoded.status_line(path), "Decoded (xml): /tmp/x.plist");

        let raw = DecodeResult::RawFallback {
            text: "x".to_string(),
            decode_error: "bad".to_string(),
        };
        assert_eq!(
            raw.status_line(path),
            "Raw (decode failed): /tmp/x.plist - error: bad"
        );
    }
}

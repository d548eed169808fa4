//! Turns drag-and-drop payloads into paths of existing files.
//!
//! Payloads are whitespace-separated lists in which items containing spaces are wrapped in
//! braces (`{/a/b c.plist} /d.plist`). Items may also be `file://` URIs.

use crate::statics;
use eframe::egui;
use std::path::{Path, PathBuf};
use url::Url;

/// Parse a drop payload into the items that name existing regular files.
///
/// Order is kept and duplicates are not removed. Items that are not files
/// (folders, virtual entries, missing paths) are dropped silently.
pub fn normalize(payload: &str) -> Vec<PathBuf> {
    split_list(payload)
        .iter()
        .map(|item| PathBuf::from(clean_item(item)))
        .filter(|candidate| keep_if_file(candidate))
        .collect()
}

/// Resolve the toolkit's dropped-file records.
/// Records with a real path are used as-is; the rest carry a name or URI string.
pub fn paths_from_dropped(files: &[egui::DroppedFile]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for file in files {
        match &file.path {
            Some(path) => {
                if keep_if_file(path) {
                    out.push(path.clone());
                }
            }
            None => out.extend(normalize(&file.name)),
        }
    }
    out
}

fn keep_if_file(candidate: &Path) -> bool {
    let keep = candidate.is_file();
    if !keep {
        log::debug!("Ignoring dropped item {candidate:?}: not a file");
    }
    keep
}

fn split_list(payload: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut chars = payload.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut item = String::new();
        if first == '{' {
            chars.next();
            // Braces nest; an unterminated group runs to the end of the payload.
            let mut depth = 1usize;
            for c in chars.by_ref() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                item.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                item.push(c);
            }
        }
        items.push(item);
    }

    items
}

fn clean_item(item: &str) -> String {
    let mut cleaned = match item.strip_prefix(statics::FILE_URI_SCHEME) {
        Some(rest) => decode_file_uri(item, rest),
        None => item.to_string(),
    };

    // Some file managers brace-quote inside the URI as well.
    if let Some(inner) = cleaned.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        cleaned = inner.to_string();
    }
    cleaned
}

fn decode_file_uri(uri: &str, rest: &str) -> String {
    match Url::parse(uri).ok().and_then(|u| u.to_file_path().ok()) {
        Some(path) => path.to_string_lossy().into_owned(),
        // Not a local absolute path URL (e.g. a foreign host); keep the old spacing rule.
        None => rest.replace("%20", " "),
    }
}

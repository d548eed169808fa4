// UI strings, file-dialog filters and the few format constants shared by the decoder,
// the drop normalizer and the renderer.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "plist viewer";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE_JSON: &str = "Save JSON";
pub const EN_BTN_COPY_JSON: &str = "Copy JSON";

pub const EN_VIEW_DECODED: &str = "Decoded";
pub const EN_VIEW_RAW: &str = "Raw";

pub const EN_HEADING_FILES: &str = "Files";
pub const EN_HEADING_PREVIEW: &str = "Preview";
pub const EN_HOME_INSTRUCTIONS: &str = "Open a property list (.plist) or drop files here.";
pub const EN_DROP_HINT: &str = "Drop files to add them to the list";

pub const EN_NO_DECODED_JSON: &str = "(no decoded JSON available)";
pub const EN_NO_RAW_TEXT: &str = "(no raw text available)";

pub const EN_DIALOG_OPEN_TITLE: &str = "Open plist(s)";
pub const EN_FILTER_PLIST: &str = "plist files";
pub const EN_FILTER_ALL: &str = "All files";
pub const EN_FILTER_JSON: &str = "JSON";

pub const EN_MSG_NO_DECODED: &str = "No decoded JSON available for current file.";
pub const EN_MSG_SAVED_TITLE: &str = "Saved";
pub const EN_MSG_COPIED_TITLE: &str = "Copied";
pub const EN_MSG_COPIED: &str = "Decoded JSON copied to clipboard";
pub const EN_MSG_SAVE_FAILED_TITLE: &str = "Save failed";

pub const EN_STATUS_DND_UNAVAILABLE: &str =
    "Drag-and-drop disabled: start without --no-drop (and unset PLISTVIEW_NO_DND) to enable dropping files.";
pub const EN_STATUS_DECODED: &str = "Decoded";
pub const EN_STATUS_RAW: &str = "Raw (decode failed)";
pub const EN_STATUS_UNREADABLE: &str = "Error reading file";
pub const EN_STATUS_NO_DROPPED_FILES: &str = "Nothing to add: dropped items are not files.";

pub const EN_ERR_UNABLE_TO_READ: &str = "Unable to read file";

// File dialog extensions.
pub const PLIST_EXTENSIONS: &[&str] = &["plist", "PLIST"];
pub const JSON_EXTENSION: &str = "json";

// Environment variable that disables drag-and-drop when set to a truthy value.
pub const ENV_NO_DND: &str = "PLISTVIEW_NO_DND";

// Drop payload URI scheme.
pub const FILE_URI_SCHEME: &str = "file://";

// Binary property list magic (the version digits follow).
pub const BPLIST_MAGIC: &[u8] = b"bplist";

// Rendering.
pub const RENDER_INDENT: usize = 2;
pub const UID_KEY: &str = "CF$UID";

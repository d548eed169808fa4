use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn touch(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, b"<plist/>")?;
    Ok(path)
}

#[test]
fn empty_payload_yields_nothing() {
    assert!(plistview::normalize("").is_empty());
}

#[test]
fn single_unquoted_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let b = touch(dir.path(), "b.plist")?;

    assert_eq!(plistview::normalize(&b.display().to_string()), vec![b]);
    Ok(())
}

#[test]
fn brace_quoted_path_with_spaces_then_plain_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let spaced = touch(dir.path(), "b c.plist")?;
    let plain = touch(dir.path(), "d.plist")?;

    let payload = format!("{{{}}} {}", spaced.display(), plain.display());
    assert_eq!(plistview::normalize(&payload), vec![spaced, plain]);
    Ok(())
}

#[test]
fn file_uri_with_encoded_space() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let spaced = touch(dir.path(), "b c.plist")?;

    let uri = format!("file://{}", spaced.display()).replace(' ', "%20");
    assert_eq!(plistview::normalize(&uri), vec![spaced]);
    Ok(())
}

#[test]
fn missing_items_are_filtered_silently() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let real = touch(dir.path(), "real.plist")?;
    let missing = dir.path().join("nope.plist");

    assert!(plistview::normalize(&missing.display().to_string()).is_empty());

    let payload = format!(
        "{} {{{}}} file://{}",
        missing.display(),
        dir.path().display(),
        real.display()
    );
    assert_eq!(plistview::normalize(&payload), vec![real]);
    Ok(())
}

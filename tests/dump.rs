use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const XML_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array>
  <true/>
  <real>2.5</real>
</array>
</plist>
"#;

#[test]
fn single_file_dump_has_no_header() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("a.plist");
    std::fs::write(&path, XML_DOC)?;

    let mut out = Vec::new();
    let failed = plistview::write_dump(std::slice::from_ref(&path), &mut out)?;
    assert!(failed.is_empty());
    assert_eq!(String::from_utf8(out)?, "[\n  true,\n  2.5\n]\n");
    Ok(())
}

#[test]
fn multi_file_dump_reports_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let good = dir.path().join("good.plist");
    let bad = dir.path().join("bad.txt");
    std::fs::write(&good, XML_DOC)?;
    std::fs::write(&bad, "<oops>")?;

    let mut out = Vec::new();
    let failed = plistview::write_dump(&[good.clone(), bad.clone()], &mut out)?;
    assert_eq!(failed, vec![bad.clone()]);

    let expected = format!(
        "==> {} <==\n[\n  true,\n  2.5\n]\n\n==> {} <==\n<oops>\n",
        good.display(),
        bad.display()
    );
    assert_eq!(String::from_utf8(out)?, expected);
    Ok(())
}

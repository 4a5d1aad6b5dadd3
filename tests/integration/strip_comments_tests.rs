/*!
 * Tests for removing comments from target elements on disk
 */

use anyhow::Result;
use std::fs;
use xliffwai::app_config::Config;
use xliffwai::providers::mock::MockProvider;
use xliffwai::xliff::XliffDocument;
use crate::common;

const COMMENTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <!-- exported from the back office -->
  <file original="admin" source-language="en-US" target-language="uz" datatype="plaintext">
    <body>
      <trans-unit id="save">
        <source>Save</source>
        <target>Saqlash<!-- reviewed
             by the team --></target>
      </trans-unit>
      <trans-unit id="open">
        <source>Open</source>
        <target>Ochish</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

/// Test that a single file is cleaned and outside comments stay
#[test]
fn test_run_strip_comments_withSingleFile_shouldCleanTargets() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "Admin.uz-UZ.xlf", COMMENTED)?;
    let controller = common::controller_with(Config::default(), &MockProvider::working());

    let summary = controller.run_strip_comments(&path)?;

    assert_eq!(summary.processed, 1);
    let content = fs::read_to_string(&path)?;
    assert!(content.contains("<target>Saqlash</target>"));
    assert!(content.contains("<!-- exported from the back office -->"));
    assert!(!content.contains("reviewed"));

    let doc = XliffDocument::parse(&content)?;
    assert_eq!(doc.unit(0).unwrap().target_text(), "Saqlash");
    Ok(())
}

/// Test that clean files are not rewritten
#[test]
fn test_run_strip_comments_withCleanFile_shouldReportUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let clean = common::sample_xliff("uz", &[("1", "Open", Some("Ochish"))]);
    let path = common::create_test_file(temp_dir.path(), "Clean.xlf", &clean)?;
    let controller = common::controller_with(Config::default(), &MockProvider::working());

    let summary = controller.run_strip_comments(&path)?;

    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.processed, 0);
    assert_eq!(fs::read_to_string(&path)?, clean);
    Ok(())
}

/// Test that a directory is searched recursively for XLIFF files
#[test]
fn test_run_strip_comments_withDirectory_shouldProcessEveryFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "a.xlf", COMMENTED)?;
    common::create_test_file(dir, "nested/b.xliff", COMMENTED)?;
    common::create_test_file(dir, "nested/c.txt", "<target>x<!-- y --></target>")?;
    let controller = common::controller_with(Config::default(), &MockProvider::working());

    let summary = controller.run_strip_comments(dir)?;

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.processed, 2);
    assert_eq!(fs::read_to_string(dir.join("nested/c.txt"))?, "<target>x<!-- y --></target>");
    Ok(())
}

/// Test that a missing path is an error
#[test]
fn test_run_strip_comments_withMissingPath_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::controller_with(Config::default(), &MockProvider::working());

    assert!(controller.run_strip_comments(&temp_dir.path().join("nope.xlf")).is_err());
    Ok(())
}

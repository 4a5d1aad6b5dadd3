/*!
 * End-to-end tests for the Latin to Cyrillic conversion
 */

use anyhow::Result;
use std::fs;
use xliffwai::app_config::Config;
use xliffwai::providers::mock::MockProvider;
use xliffwai::xliff::XliffDocument;
use crate::common;

fn latin_file() -> String {
    common::sample_xliff(
        "uz",
        &[
            ("settings", "Settings", Some("Sozlamalar")),
            ("help", "Help", None),
            ("close", "Close", Some("")),
            ("language", "Language", Some("Тил")),
            ("beta", "Beta", Some("Тест (beta)")),
            ("count", "42", Some("42")),
        ],
    )
}

fn dictionary_provider() -> MockProvider {
    MockProvider::working().with_custom_response(common::uzbek_dictionary)
}

/// Test the full conversion of a Latin file
#[tokio::test]
async fn test_run_cyrillic_withLatinFile_shouldConvertInPlace() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "admin/Admin.uz-UZ.xlf", &latin_file())?;
    let provider = dictionary_provider();
    let controller = common::controller_with(Config::default(), &provider);

    let summary = controller.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.translated, 2);
    assert_eq!(summary.transliterated, 1);

    let doc = XliffDocument::load(&path)?;
    assert_eq!(doc.target_language(), Some("uz-Cyrl"));
    let units = doc.units();
    assert_eq!(units[0].target_text(), "Созламалар");
    assert_eq!(units[1].target_text(), "Ёрдам");
    assert_eq!(units[1].state.as_deref(), Some("final"));
    assert_eq!(units[2].target_text(), "Ёпиш");
    assert_eq!(units[2].state.as_deref(), Some("final"));
    assert_eq!(units[3].target_text(), "Тил");
    assert_eq!(units[4].target_text(), "Тест (beta)");
    assert_eq!(units[5].target_text(), "42");

    // Missing targets are requested in the base language of the tag
    assert!(provider.requests().iter().all(|request| request.target_language == "uz"));
    Ok(())
}

/// Test that the synthesized target sits right after its source
#[tokio::test]
async fn test_run_cyrillic_withMissingTarget_shouldInsertAfterSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "Help.xlf",
        r#"<?xml version="1.0" encoding="utf-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2"><file target-language="uz"><body><trans-unit id="1"><source>Help</source><note>toolbar</note></trans-unit></body></file></xliff>"#,
    )?;
    let controller = common::controller_with(Config::default(), &dictionary_provider());

    controller.run_cyrillic(temp_dir.path()).await?;

    let content = fs::read_to_string(&path)?;
    assert!(content.contains("<source>Help</source><target state=\"final\">Ёрдам</target><note>toolbar</note>"));
    Ok(())
}

/// Test that a second run changes nothing and calls nothing
#[tokio::test]
async fn test_run_cyrillic_runTwice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "Admin.uz-UZ.xlf", &latin_file())?;
    let provider = dictionary_provider();
    let controller = common::controller_with(Config::default(), &provider);

    controller.run_cyrillic(temp_dir.path()).await?;
    let converted = fs::read_to_string(&path)?;
    let calls = provider.request_count();

    let summary = controller.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(provider.request_count(), calls);
    assert_eq!(fs::read_to_string(&path)?, converted);
    assert!(converted.contains("target-language=\"uz-Cyrl\""));
    Ok(())
}

/// Test that converted files are not rewritten at all
#[tokio::test]
async fn test_run_cyrillic_withConvertedFile_shouldKeepBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = common::sample_xliff("uz-Cyrl", &[("1", "Settings", Some("Созламалар")), ("2", "", Some(""))]);
    let path = common::create_test_file(temp_dir.path(), "Done.xlf", &original)?;
    let provider = MockProvider::failing();
    let controller = common::controller_with(Config::default(), &provider);

    let summary = controller.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(summary.unchanged, 1);
    assert_eq!(provider.request_count(), 0);
    // The declaration keeps its original "UTF-8" spelling, proving no rewrite
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
}

/// Test that a Latin tag over Cyrillic targets alone does not trigger a rewrite
#[tokio::test]
async fn test_run_cyrillic_withOnlyTagToChange_shouldKeepBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = common::sample_xliff("uz-UZ", &[("1", "Settings", Some("Созламалар")), ("2", "Help", Some("Ёрдам"))]);
    let path = common::create_test_file(temp_dir.path(), "Admin.uz-UZ.xlf", &original)?;
    let provider = dictionary_provider();
    let controller = common::controller_with(Config::default(), &provider);

    let summary = controller.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(provider.request_count(), 0);
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
}

/// Test that targets missing after a failed run are filled by the next run
#[tokio::test]
async fn test_run_cyrillic_afterFailedRun_shouldFillMissingTargets() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "Admin.uz-UZ.xlf",
        &common::sample_xliff("uz-UZ", &[("help", "Help", None), ("settings", "Settings", Some("Sozlamalar"))]),
    )?;

    let failing = common::controller_with(Config::default(), &MockProvider::failing());
    let first = failing.run_cyrillic(temp_dir.path()).await?;
    assert_eq!(first.processed, 1);
    assert!(!XliffDocument::load(&path)?.unit(0).unwrap().has_target());

    let provider = dictionary_provider();
    let working = common::controller_with(Config::default(), &provider);
    let second = working.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(second.processed, 1);
    assert_eq!(second.translated, 1);
    assert_eq!(provider.request_count(), 1);
    let doc = XliffDocument::load(&path)?;
    let help = doc.unit(0).unwrap();
    assert_eq!(help.target_text(), "Ёрдам");
    assert_eq!(help.state.as_deref(), Some("final"));
    assert_eq!(doc.unit(1).unwrap().target_text(), "Созламалар");
    Ok(())
}

/// Test that a broken file is counted and the other files are still converted
#[tokio::test]
async fn test_run_cyrillic_withMalformedFile_shouldContinueWithOthers() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let broken = common::create_test_file(dir, "Broken.uz-UZ.xlf", "<xliff><file><body>")?;
    let good = common::create_test_file(dir, "nested/Shop.uz-UZ.xlf", &latin_file())?;
    let controller = common::controller_with(Config::default(), &dictionary_provider());

    let summary = controller.run_cyrillic(dir).await?;

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(fs::read_to_string(&broken)?, "<xliff><file><body>");
    let doc = XliffDocument::load(&good)?;
    assert_eq!(doc.target_language(), Some("uz-Cyrl"));
    assert_eq!(doc.unit(0).unwrap().target_text(), "Созламалар");
    Ok(())
}

/// Test that only the configured extensions are processed
#[tokio::test]
async fn test_run_cyrillic_withMixedFiles_shouldFilterByExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "a.xlf", &latin_file())?;
    common::create_test_file(dir, "nested/b.XLIFF", &latin_file())?;
    let notes = common::create_test_file(dir, "nested/c.txt", "Sozlamalar")?;
    let controller = common::controller_with(Config::default(), &dictionary_provider());

    let summary = controller.run_cyrillic(dir).await?;

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.processed, 2);
    assert_eq!(fs::read_to_string(notes)?, "Sozlamalar");
    Ok(())
}

/// Test that a custom tag is written and its base language requested
#[tokio::test]
async fn test_run_cyrillic_withCustomTag_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "a.xlf", &latin_file())?;
    let mut config = Config::default();
    config.cyrillic.target_language = "uz-Cyrl-UZ".to_string();
    let provider = dictionary_provider();
    let controller = common::controller_with(config, &provider);

    controller.run_cyrillic(temp_dir.path()).await?;

    assert_eq!(XliffDocument::load(&path)?.target_language(), Some("uz-Cyrl-UZ"));
    assert_eq!(provider.requests()[0].target_language, "uz");
    Ok(())
}

/// Test that a missing root directory is an error
#[tokio::test]
async fn test_run_cyrillic_withMissingRoot_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = common::controller_with(Config::default(), &MockProvider::working());

    assert!(controller.run_cyrillic(&temp_dir.path().join("uz-UZ")).await.is_err());
    Ok(())
}

/*!
 * End-to-end tests for the folder translation workflow
 */

use std::sync::Arc;
use anyhow::Result;
use folder_translator::app_config::Config;
use folder_translator::errors::AppError;
use folder_translator::names::DisplayMode;
use folder_translator::operator::ScriptedOperator;
use folder_translator::providers::mock::MockTranslator;
use folder_translator::Controller;
use crate::common;

fn config(mode: Option<DisplayMode>) -> Config {
    let mut config = Config::default();
    config.target_language = "xx".to_string();
    config.display_mode = mode;
    config
}

fn controller(config: Config, mock: &MockTranslator) -> Controller {
    Controller::with_translator(config, Arc::new(mock.clone()))
}

/// Test the whole pipeline on a small tree with everything preconfigured
#[tokio::test]
async fn test_run_withConfiguredLanguageAndMode_shouldCreateTranslatedCopy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source.clone()), &mut operator)
        .await?;

    assert_eq!(summary.destination_root, temp_dir.path().canonicalize()?.join("Docs - Translated"));
    assert_eq!(summary.entry_count, 3);
    assert_eq!(summary.sanitized_count, 0);
    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["A.txt", "SUB", "SUB/B.txt"]
    );
    assert_eq!(std::fs::read_to_string(summary.destination_root.join("SUB/B.txt"))?, "beta");

    // Source is left untouched
    assert_eq!(common::list_relative(&source), vec!["Sub", "Sub/b.txt", "a.txt"]);

    // Source tree, preview, result
    assert_eq!(operator.messages.len(), 3);
    assert!(operator.messages[0].contains("📁 Docs\n  📁 Sub\n    🗋 b.txt\n  🗋 a.txt"));
    assert!(operator.messages[1].contains("Docs - Translated\n  SUB\n    B.txt\n  A.txt"));
    assert!(operator.messages[2].contains("📁 Docs - Translated\n  📁 SUB\n    🗋 B.txt\n  🗋 A.txt"));
    Ok(())
}

/// Test that missing path, language and mode are asked for in order
#[tokio::test]
async fn test_run_withNothingConfigured_shouldPromptForEverything() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let source_text = source.to_string_lossy().into_owned();
    let mut operator = ScriptedOperator::new([source_text.as_str(), "ru", "suffix", "y"]);

    let summary = controller(Config::default(), &mock).run(None, &mut operator).await?;

    assert_eq!(operator.remaining(), 0);
    assert_eq!(operator.prompts[0], "Input folder path");
    assert!(operator.prompts[1].starts_with("Input destination language abbreviation"));
    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["Sub [SUB]", "Sub [SUB]/b [B].txt", "a [A].txt"]
    );
    Ok(())
}

/// Test that prefix mode puts the translation first
#[tokio::test]
async fn test_run_withPrefixMode_shouldPutTranslationFirst() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Prefix)), &mock)
        .run(Some(source), &mut operator)
        .await?;

    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["A [a].txt", "SUB [Sub]", "SUB [Sub]/B [b].txt"]
    );
    Ok(())
}

/// Test that declining the final confirmation leaves the disk untouched
#[tokio::test]
async fn test_run_whenCopyDeclined_shouldNotCreateDestination() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["no"]);

    let result = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await;

    assert!(matches!(result, Err(AppError::CopyDeclined)));
    assert!(!temp_dir.path().join("Docs - Translated").exists());
    Ok(())
}

/// Test that refusing sanitization aborts before any copy
#[tokio::test]
async fn test_run_whenSanitizationDeclined_shouldAbort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::with_mapping(|text, _| format!("{}:{}", text, text));
    let mut operator = ScriptedOperator::new(["no"]);

    let result = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await;

    assert!(matches!(result, Err(AppError::NameValidationDeclined)));
    assert!(operator.messages.iter().any(|m| m.contains("a:a.txt -> aa.txt")));
    assert!(!temp_dir.path().join("Docs - Translated").exists());
    Ok(())
}

/// Test that accepted sanitization uses the cleaned names
#[tokio::test]
async fn test_run_whenSanitizationAccepted_shouldUseSanitizedNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::with_mapping(|text, _| format!("{}:{}", text, text));
    let mut operator = ScriptedOperator::new(["yes", "yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await?;

    assert_eq!(summary.sanitized_count, 3);
    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["SubSub", "SubSub/bb.txt", "aa.txt"]
    );
    Ok(())
}

/// Test that an unreachable backend stops the run before asking anything else
#[tokio::test]
async fn test_run_withUnreachableBackend_shouldFailWithoutCopy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::unreachable();
    let mut operator = ScriptedOperator::new(["yes"]);

    let result = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await;

    assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
    assert_eq!(mock.request_count(), 0);
    assert_eq!(operator.remaining(), 1);
    assert!(!temp_dir.path().join("Docs - Translated").exists());
    Ok(())
}

/// Test that repeated names are sent to the backend once
#[tokio::test]
async fn test_run_withRepeatedNames_shouldTranslateEachTextOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = temp_dir.path().join("Notes");
    common::create_test_file(&source, "x/readme.txt", "1")?;
    common::create_test_file(&source, "y/readme.md", "2")?;
    common::create_test_file(&source, "readme/x.txt", "3")?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await?;

    let mut received = mock.received_texts();
    let sent = received.len();
    received.sort();
    received.dedup();
    assert_eq!(received.len(), sent);
    assert_eq!(summary.unique_text_count, 3);
    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["README", "README/X.txt", "X", "X/README.txt", "Y", "Y/README.md"]
    );
    Ok(())
}

/// Test that an existing destination pushes the new copy to a numbered name
#[tokio::test]
async fn test_run_withExistingDestination_shouldPickNumberedName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    std::fs::create_dir(temp_dir.path().join("Docs - Translated"))?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await?;

    assert_eq!(summary.destination_root, temp_dir.path().canonicalize()?.join("Docs - Translated 1"));
    Ok(())
}

/// Test that a translation equal to a sibling's original name keeps both files
#[tokio::test]
async fn test_run_withTranslationMatchingSiblingName_shouldKeepEveryFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = temp_dir.path().join("Pair");
    common::create_test_file(&source, "a.txt", "alpha")?;
    common::create_test_file(&source, "b.txt", "beta")?;
    let mock = MockTranslator::with_mapping(|text, _| match text {
        "a" => "c".to_string(),
        "b" => "a".to_string(),
        other => other.to_string(),
    });
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source), &mut operator)
        .await?;

    let dest = &summary.destination_root;
    assert_eq!(common::list_relative(dest), vec!["a.txt", "c.txt"]);
    assert_eq!(std::fs::read_to_string(dest.join("c.txt"))?, "alpha");
    assert_eq!(std::fs::read_to_string(dest.join("a.txt"))?, "beta");
    Ok(())
}

/// Test that a path ending in `..` resolves to the folder it names
#[tokio::test]
async fn test_run_withParentDirInput_shouldUseResolvedFolderName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let summary = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(source.join("Sub").join("..")), &mut operator)
        .await?;

    assert_eq!(summary.destination_root, temp_dir.path().canonicalize()?.join("Docs - Translated"));
    assert_eq!(
        common::list_relative(&summary.destination_root),
        vec!["A.txt", "SUB", "SUB/B.txt"]
    );
    Ok(())
}

/// Test that `.` as input means the current folder
#[tokio::test]
async fn test_run_withCurrentDirInput_shouldTranslateCurrentFolder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::uppercase();
    let mut operator = ScriptedOperator::new(["yes"]);

    let previous_dir = std::env::current_dir()?;
    std::env::set_current_dir(&source)?;
    let result = controller(config(Some(DisplayMode::Rename)), &mock)
        .run(Some(".".into()), &mut operator)
        .await;
    std::env::set_current_dir(previous_dir)?;

    let summary = result?;
    assert_eq!(summary.destination_root, temp_dir.path().canonicalize()?.join("Docs - Translated"));
    assert_eq!(summary.entry_count, 3);
    Ok(())
}

/// Test that a translation failure midway leaves no destination behind
#[test]
fn test_run_withFailingBackend_shouldNotCreateDestination() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_docs_tree(temp_dir.path())?;
    let mock = MockTranslator::failing();
    let mut operator = ScriptedOperator::new(["yes"]);

    let result = tokio_test::block_on(async {
        controller(config(Some(DisplayMode::Rename)), &mock)
            .run(Some(source), &mut operator)
            .await
    });

    assert!(matches!(result, Err(AppError::Translation(_))));
    assert!(!temp_dir.path().join("Docs - Translated").exists());
    Ok(())
}

use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

const CONFIG: &str = ".i18nkeysrc.json";

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "includes",
        "messagesRoot",
        "primaryLocale",
        "secondaryLocale",
        "ignoredNamespaces",
        "translator",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }
    assert_eq!(parsed["secondaryLocale"], "no");
    assert_eq!(parsed["translationThreshold"], 50);

    assert!(
        content.contains("\n  \"includes\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(&mut test.init_command())?;

    assert_eq!(result.code, Some(0));
    assert_snapshot!(result.stdout.trim_end(), @"✓ Created .i18nkeysrc.json");
    assert!(test.root().join(CONFIG).exists());
    assert_config_content(&test.read_file(CONFIG)?)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(CONFIG, "{}")?;

    let result = run(&mut test.init_command())?;

    assert_eq!(result.code, Some(2));
    assert_snapshot!(result.stderr.trim_end(), @"Error: .i18nkeysrc.json already exists");
    assert_eq!(test.read_file(CONFIG)?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_sync() -> Result<()> {
    let test = CliTest::new()?;
    run(&mut test.init_command())?;
    test.write_file("app/page.tsx", r#"t("Home.title");"#)?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert!(test.exists("messages/en.json"));

    Ok(())
}

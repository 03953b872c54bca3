use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .transferrc.json"));

    let content = test.read_file(".transferrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("targetModules").is_some());
    assert_eq!(parsed["sourceDir"], "src");
    assert_eq!(parsed["images"]["basePath"], "com/fr");
    assert_eq!(parsed["images"]["sharedDetection"], "raw");
    assert_eq!(parsed["locales"]["originalName"], "fr");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transferrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".transferrc.json already exists"));
    assert_eq!(test.read_file(".transferrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "fservice/src/com/fr/fs/A.java",
        r#"icon("com/fr/fs/images/a.png");"#,
    )?;
    test.write_file("fservice/src/com/fr/fs/images/a.png", "a")?;

    let output = test.images_command().args(["--modules", "fservice"]).output()?;

    assert!(
        output.status.success(),
        "Images command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

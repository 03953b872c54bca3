use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, WORK_DIR, stderr, stdout};

const TARGET_DIR: &str = "fservice/src/com/fr/fs/resources/images";

/// `fservice` is split out of the project; `base` keeps the shared images.
fn setup_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "fservice/src/com/fr/fs/Service.java",
        r#"class Service {
    Icon a = icon("com/fr/base/images/dep.png");
    Icon b = icon("com/fr/fs/web/images/own.png");
    Icon c = icon("com/fr/base/images/shared.png");
    Icon d = icon("com/fr/base/images/lost.png");
}
"#,
    )?;
    test.write_file("fservice/src/com/fr/fs/web/images/own.png", "own")?;
    test.write_file("fservice/src/com/fr/fs/web/images/stale.png", "stale")?;
    test.write_file("base/src/com/fr/base/images/dep.png", "dep")?;
    test.write_file("base/src/com/fr/base/images/shared.png", "shared")?;
    test.write_file(
        "base/src/com/fr/base/Base.java",
        r#"class Base { Icon s = icon("com/fr/base/images/shared.png"); }"#,
    )?;
    Ok(test)
}

fn images_args() -> [&'static str; 6] {
    [
        "--modules",
        "fservice",
        "--target-base",
        "com/fr/fs",
        "--target-dir",
        TARGET_DIR,
    ]
}

#[test]
fn test_images_dry_run_changes_nothing() -> Result<()> {
    let test = setup_project()?;

    let output = test.images_command().args(images_args()).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Images: 1 in use, 1 unused, 3 dependent, 1 shared"));
    assert!(out.contains("Would transfer 3 image(s): 1 copied, 1 moved, 1 deleted"));
    assert!(out.contains("Run with --apply"));

    assert!(!test.exists(&format!("{}/dep.png", TARGET_DIR)));
    assert!(test.exists("fservice/src/com/fr/fs/web/images/stale.png"));
    assert!(test.exists("fservice/src/com/fr/fs/web/images/own.png"));
    assert!(
        test.read_file("fservice/src/com/fr/fs/Service.java")?
            .contains("com/fr/base/images/dep.png")
    );

    assert_snapshot!(test.read_report("shared.txt")?, @"com/fr/base/images/shared.png");
    assert_snapshot!(test.read_report("not_found.txt")?, @"com/fr/base/images/lost.png");
    assert!(test.exists(&format!("{}/log.txt", WORK_DIR)));

    Ok(())
}

#[test]
fn test_images_apply_migrates() -> Result<()> {
    let test = setup_project()?;

    let output = test
        .images_command()
        .args(images_args())
        .arg("--apply")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Transferred 3 image(s)"));

    assert_eq!(test.read_file(&format!("{}/dep.png", TARGET_DIR))?, "dep");
    assert_eq!(test.read_file(&format!("{}/own.png", TARGET_DIR))?, "own");
    assert!(!test.exists("fservice/src/com/fr/fs/web/images/own.png"));
    assert!(!test.exists("fservice/src/com/fr/fs/web/images/stale.png"));
    assert!(test.exists("base/src/com/fr/base/images/dep.png"));
    assert!(test.exists("base/src/com/fr/base/images/shared.png"));
    assert!(!test.exists(&format!("{}/shared.png", TARGET_DIR)));

    assert_snapshot!(test.read_file("fservice/src/com/fr/fs/Service.java")?, @r#"
    class Service {
        Icon a = icon("com/fr/fs/resources/images/dep.png");
        Icon b = icon("com/fr/fs/resources/images/own.png");
        Icon c = icon("com/fr/base/images/shared.png");
        Icon d = icon("com/fr/base/images/lost.png");
    }
    "#);

    let log = test.read_file(&format!("{}/log.txt", WORK_DIR))?;
    assert!(log.contains("Transferring \"com/fr/base/images/dep.png\""));
    assert!(log.contains("Removing unused \"com/fr/fs/web/images/stale.png\""));

    Ok(())
}

#[test]
fn test_images_second_apply_is_a_no_op() -> Result<()> {
    let test = setup_project()?;
    test.images_command()
        .args(images_args())
        .arg("--apply")
        .output()?;
    let first = test.read_file("fservice/src/com/fr/fs/Service.java")?;

    let output = test
        .images_command()
        .args(images_args())
        .arg("--apply")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    // Moved images are now in use where they landed; the deleted one is gone
    assert!(out.contains("Images: 2 in use, 0 unused, 2 dependent, 1 shared"));
    assert!(out.contains("Transferred 0 image(s)"));
    assert!(!test.exists("fservice/src/com/fr/fs/web/images/stale.png"));
    assert_eq!(test.read_file("fservice/src/com/fr/fs/Service.java")?, first);

    // The log is appended to, not replaced
    let log = test.read_file(&format!("{}/log.txt", WORK_DIR))?;
    assert_eq!(log.matches("Image transfer finished").count(), 2);

    Ok(())
}

#[test]
fn test_images_reads_config_file() -> Result<()> {
    let test = setup_project()?;
    test.write_file(
        ".transferrc.json",
        r#"{
            "targetModules": ["fservice"],
            "workDir": "./out/transfer",
            "images": {
                "targetBase": "com/fr/fs",
                "targetDir": "./fservice/src/com/fr/fs/resources/images"
            }
        }"#,
    )?;

    let output = test.command().args(["images", "--apply"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file(&format!("{}/dep.png", TARGET_DIR))?, "dep");
    assert!(test.exists(&format!("{}/shared.txt", WORK_DIR)));

    Ok(())
}

#[test]
fn test_images_target_dir_outside_base() -> Result<()> {
    let test = setup_project()?;

    let output = test
        .images_command()
        .args(["--modules", "fservice", "--target-base", "com/fr/fs"])
        .args(["--target-dir", "static/images", "--apply"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("unresolved-path"));
    assert!(!test.exists("static/images/dep.png"));
    assert!(
        test.read_report("not_found.txt")?
            .contains("com/fr/base/images/dep.png")
    );

    Ok(())
}

#[test]
fn test_images_shared_detection_policies() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "fservice/src/com/fr/fs/A.java",
        r#"icon("com/fr/fs/cover/c.png");"#,
    )?;
    test.write_file("base/src/B.java", r#"icon("com/fr/fs/cover/c.png");"#)?;

    let run = |policy: &str| -> Result<String> {
        let output = test
            .images_command()
            .args(["--modules", "fservice", "--target-dir", TARGET_DIR])
            .args(["--target-excludes", "com/fr/fs/cover/"])
            .args(["--shared-detection", policy])
            .output()?;
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        test.read_report("shared.txt")
    };

    assert_eq!(run("raw")?, "com/fr/fs/cover/c.png\n");
    assert_eq!(run("filtered")?, "");

    Ok(())
}

#[test]
fn test_images_without_modules_fails() -> Result<()> {
    let test = setup_project()?;

    let output = test.images_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: No target modules given"));

    Ok(())
}

#[test]
fn test_images_missing_root_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .images_command()
        .args(["--root", "does-not-exist", "--modules", "m1"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Project root not found"));
    assert!(test.root().exists());

    Ok(())
}

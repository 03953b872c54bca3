use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

const LOCALE_DIR: &str = "base-file/src/com/fr/general/locale";

fn setup_project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "fservice/src/com/fr/fs/Service.java",
        r#"String t = Inter.getLocText("FS-Title");
String h = Inter.getLocText("FS-Half");
String s = Inter.getLocText("FR-Shared");
"#,
    )?;
    test.write_file(
        "fservice/src/com/fr/fs/web/page.js",
        r#"var t = FR.i18nText("FS-Title");"#,
    )?;
    test.write_file(
        "base-file/src/com/fr/Base.java",
        r#"String s = Inter.getLocText("FR-Shared");"#,
    )?;
    test.write_file(
        &format!("{}/fr.properties", LOCALE_DIR),
        "# default\nFS-Title=Title\nFS-Half=Half\nFR-Shared=Shared\n",
    )?;
    test.write_file(
        &format!("{}/fr_en_US.properties", LOCALE_DIR),
        "FS-Title=Title\nFS-Half=Half\nFR-Shared=Shared\n",
    )?;
    for locale in ["zh_CN", "zh_TW", "ja_JP"] {
        test.write_file(
            &format!("{}/fr_{}.properties", LOCALE_DIR, locale),
            &format!("FS-Title=Title-{}\nFR-Shared=Shared-{}\n", locale, locale),
        )?;
    }
    Ok(test)
}

fn locales_args() -> [&'static str; 6] {
    [
        "--modules",
        "fservice",
        "--target-path",
        "fservice/src/com/fr/fs/locale",
        "--target-name",
        "fs",
    ]
}

#[test]
fn test_locales_dry_run_reports() -> Result<()> {
    let test = setup_project()?;

    let output = test.locales_command().args(locales_args()).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Locale keys: 2 to move, 1 shared, 1 fragmented"));
    assert!(out.contains("fragmented-locale"));
    assert!(out.contains("missing in: zh_CN, zh_TW, ja_JP"));

    assert!(!test.exists("fservice/src/com/fr/fs/locale/fs.properties"));
    assert!(
        test.read_file(&format!("{}/fr.properties", LOCALE_DIR))?
            .contains("FS-Title=Title")
    );
    assert_snapshot!(test.read_report("shared.txt")?, @"FR-Shared");
    assert_snapshot!(test.read_report("fragmented.txt")?, @"FS-Half");

    Ok(())
}

#[test]
fn test_locales_apply_moves_keys() -> Result<()> {
    let test = setup_project()?;

    let output = test
        .locales_command()
        .args(locales_args())
        .arg("--apply")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Moved 2 key(s)"));

    assert_snapshot!(test.read_file(&format!("{}/fr.properties", LOCALE_DIR))?, @r"
    # default
    FR-Shared=Shared
    ");
    assert_snapshot!(test.read_file(&format!("{}/fr_ja_JP.properties", LOCALE_DIR))?, @"FR-Shared=Shared-ja_JP");
    assert_snapshot!(test.read_file("fservice/src/com/fr/fs/locale/fs.properties")?, @r"
    FS-Half=Half
    FS-Title=Title
    ");
    assert_snapshot!(test.read_file("fservice/src/com/fr/fs/locale/fs_ja_JP.properties")?, @"FS-Title=Title-ja_JP");

    // Nothing left to move on a second run
    let again = test
        .locales_command()
        .args(locales_args())
        .arg("--apply")
        .output()?;
    assert!(again.status.success());
    assert!(stdout(&again).contains("Locale keys: 0 to move"));

    Ok(())
}

#[test]
fn test_locales_without_target_name_fails() -> Result<()> {
    let test = setup_project()?;

    let output = test
        .locales_command()
        .args(["--modules", "fservice", "--target-path", "x"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No target file name given"));

    Ok(())
}

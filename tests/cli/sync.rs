use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run};

const PAGE: &str = r#"
import { useTranslations } from "next-intl";

export default function ProductPage() {
    const productT = useTranslations("Products");
    return (
        <main>
            <h1>{productT("name")}</h1>
            <p>{t("Global.Greeting")}</p>
        </main>
    );
}
"#;

#[test]
fn test_sync_fills_both_locales() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;
    test.write_file("messages/en.json", r#"{ "Products": { "name": "Name" } }"#)?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        test.read_file("messages/en.json")?,
        r#"{
  "Products": {
    "name": "Name"
  },
  "Global": {
    "Greeting": "Greeting"
  }
}
"#
    );
    // Without an API key the primary text is copied.
    assert_eq!(
        test.read_json("messages/no.json")?,
        json!({ "Products": { "name": "Name" }, "Global": { "Greeting": "Greeting" } })
    );
    assert!(result.stdout.contains("Scanned 1 source file, found 2 translation keys"));
    assert!(result.stdout.contains("+ Global.Greeting"));
    assert!(result.stdout.contains("Translated 2 keys into ./messages/no.json"));
    assert!(result.stderr.contains("warning: 2 keys used the en text"));

    Ok(())
}

#[test]
fn test_sync_writes_missing_key_report() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;
    test.write_file("messages/en.json", r#"{ "Products": { "name": "Name" } }"#)?;

    run(&mut test.sync_command())?;

    let report = test.read_json("missing-translation-keys.json")?;
    assert_eq!(report["missingFromPrimary"], json!(["Global.Greeting"]));
    assert_eq!(
        report["missingFromSecondary"],
        json!(["Global.Greeting", "Products.name"])
    );
    assert_eq!(report["secondaryLocale"], "no");

    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;

    run(&mut test.sync_command())?;
    let en = test.read_file("messages/en.json")?;
    let no = test.read_file("messages/no.json")?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(test.read_file("messages/en.json")?, en);
    assert_eq!(test.read_file("messages/no.json")?, no);
    assert!(result.stdout.contains("./messages/no.json has every key"));

    Ok(())
}

#[test]
fn test_list_missing_does_not_touch_secondary() -> Result<()> {
    let test = CliTest::with_file(
        "components/Nav.tsx",
        r#"
const navT = useTranslations("Navigation");
export const Nav = () => <nav>{navT("products")}{navT("about")}</nav>;
"#,
    )?;
    test.write_file(
        "messages/en.json",
        r#"{ "Navigation": { "products": "Products", "about": "About" } }"#,
    )?;

    let result = run(test.sync_command().arg("--list-missing"))?;

    assert_eq!(result.code, Some(0));
    assert!(!test.exists("messages/no.json"));
    assert!(
        result
            .stdout
            .contains("2 keys missing from ./messages/no.json:\n  Navigation.about\n  Navigation.products\n")
    );
    assert!(!result.stdout.contains("Translated"));

    Ok(())
}

#[test]
fn test_threshold_translates_preview_batch() -> Result<()> {
    let calls: String = (0..55).map(|i| format!("t(\"Bulk.key{:02}\");\n", i)).collect();
    let test = CliTest::with_file("app/bulk.ts", &calls)?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    let no = test.read_json("messages/no.json")?;
    let bulk = no["Bulk"].as_object().unwrap();
    let keys: Vec<&str> = bulk.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 10);
    assert_eq!(keys.first(), Some(&"key00"));
    assert_eq!(keys.last(), Some(&"key09"));
    assert!(result.stdout.contains("55 keys are missing from no"));
    assert!(result.stdout.contains("--force"));

    // The primary locale gets every key regardless of the threshold.
    let en = test.read_json("messages/en.json")?;
    assert_eq!(en["Bulk"].as_object().unwrap().len(), 55);

    Ok(())
}

#[test]
fn test_force_translates_everything() -> Result<()> {
    let calls: String = (0..55).map(|i| format!("t(\"Bulk.key{:02}\");\n", i)).collect();
    let test = CliTest::with_file("app/bulk.ts", &calls)?;

    let result = run(test.sync_command().arg("--force"))?;

    assert_eq!(result.code, Some(0));
    let no = test.read_json("messages/no.json")?;
    assert_eq!(no["Bulk"].as_object().unwrap().len(), 55);
    assert!(!result.stdout.contains("more than 50"));

    Ok(())
}

#[test]
fn test_admin_and_interpolated_keys_are_not_written() -> Result<()> {
    let test = CliTest::with_file(
        "app/admin/page.tsx",
        r#"
const adminT = useTranslations("Admin");
adminT("dashboard");
t(`Status.${status}`);
t("Orders.title");
"#,
    )?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "Orders": { "title": "title" } })
    );
    assert_eq!(
        test.read_json("messages/no.json")?,
        json!({ "Orders": { "title": "title" } })
    );

    Ok(())
}

#[test]
fn test_unparsable_file_uses_pattern_scan() -> Result<()> {
    let test = CliTest::with_file(
        "app/broken.tsx",
        r#"
const cartT = useTranslations("Cart");
export function Broken( {
    return <div>{cartT("empty")}</div>
"#,
    )?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "Cart": { "empty": "empty" } })
    );
    assert!(result.stderr.contains("1 file could not be parsed"));

    Ok(())
}

#[test]
fn test_diagnostic_report() -> Result<()> {
    let test = CliTest::with_file("app/page.tsx", PAGE)?;

    let result = run(test.sync_command().args(["--list-missing", "--diagnostic"]))?;

    assert_eq!(result.code, Some(0));
    let diagnostic = test.read_json("translation-diagnostic.json")?;
    assert_eq!(diagnostic["options"]["listMissing"], true);
    assert_eq!(
        diagnostic["foundKeys"],
        json!(["Global.Greeting", "Products.name"])
    );
    assert_eq!(diagnostic["files"][0]["mode"], "syntax");
    assert!(result.stdout.contains("Diagnostics written to ./translation-diagnostic.json"));

    Ok(())
}

#[test]
fn test_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(0));
    assert_snapshot!(
        result.stdout.lines().next().unwrap_or_default(),
        @"Scanned 0 source files, found 0 translation keys"
    );
    assert!(!test.exists("messages/en.json"));
    assert!(!test.exists("missing-translation-keys.json"));

    Ok(())
}

#[test]
fn test_config_file_and_overrides() -> Result<()> {
    let test = CliTest::with_file(
        ".i18nkeysrc.json",
        r#"{
  "includes": ["src/features"],
  "messagesRoot": "./locales",
  "secondaryLocale": "de"
}"#,
    )?;
    test.write_file("src/features/cart.tsx", r#"t("Cart.title");"#)?;
    test.write_file("app/ignored.tsx", r#"t("Ignored.key");"#)?;

    let result = run(test.sync_command().args(["--secondary-locale", "sv"]))?;

    assert_eq!(result.code, Some(0));
    assert_eq!(
        test.read_json("locales/en.json")?,
        json!({ "Cart": { "title": "title" } })
    );
    assert!(test.exists("locales/sv.json"));
    assert!(!test.exists("locales/de.json"));

    Ok(())
}

#[test]
fn test_invalid_config_exits_with_error() -> Result<()> {
    let test = CliTest::with_file(
        ".i18nkeysrc.json",
        r#"{ "primaryLocale": "en", "secondaryLocale": "en" }"#,
    )?;

    let result = run(&mut test.sync_command())?;

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.starts_with("Error:"));
    assert!(result.stderr.contains("must differ"));

    Ok(())
}

#[test]
fn test_source_root_places_artifacts_in_the_project() -> Result<()> {
    let test = CliTest::with_file("web/app/page.tsx", PAGE)?;

    let result = run(test.sync_command().args(["--source-root", "web", "--diagnostic"]))?;

    assert_eq!(result.code, Some(0));
    assert!(test.exists("web/missing-translation-keys.json"));
    assert!(test.exists("web/translation-diagnostic.json"));
    assert!(!test.exists("missing-translation-keys.json"));
    assert!(test.exists("web/messages/en.json"));
    assert!(result.stdout.contains("Missing keys written to web/missing-translation-keys.json"));
    assert!(result.stdout.contains("Diagnostics written to web/translation-diagnostic.json"));

    Ok(())
}

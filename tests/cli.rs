use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::tempdir;

fn portfolio() -> Command {
    let mut cmd = Command::cargo_bin("portfolio").unwrap();
    cmd.env_remove("PUBLIC_SANITY_PROJECT_ID")
        .env_remove("PUBLIC_SANITY_DATASET")
        .env_remove("SANITY_API_TOKEN")
        .env_remove("ANTHROPIC_API_KEY");
    cmd
}

#[test]
fn test_resolve_prints_props() {
    portfolio()
        .args(&[
            "resolve",
            "image-abc123-2000x1000-jpg",
            "--width",
            "1000",
            "--aspect-ratio",
            "2",
            "--sizes",
            "50vw",
            "--project",
            "proj",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""src": "https://cdn.sanity.io/images/proj/production/abc123-2000x1000.jpg?w=1000&h=500""#,
        ))
        .stdout(predicate::str::contains(
            "abc123-2000x1000.jpg?w=2000&h=1000 2000w",
        ))
        .stdout(predicate::str::contains(r#""sizes": "50vw""#));
}

#[test]
fn test_resolve_rejects_zero_width() {
    portfolio()
        .args(&["resolve", "image-abc123-2000x1000-jpg", "--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_resolve_rejects_malformed_asset() {
    portfolio()
        .args(&["resolve", "not-an-image", "--width", "800"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed asset reference"));
}

#[test]
fn test_upload_requires_token() {
    let dir = tempdir().unwrap();
    portfolio()
        .arg("upload")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("SANITY_API_TOKEN is not set"));
}

#[test]
fn test_import_requires_alt_text_key() {
    let dir = tempdir().unwrap();
    portfolio()
        .env("SANITY_API_TOKEN", "token")
        .arg("import")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY is not set"));
}

#[test]
fn test_validate_reports_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("documents.json");
    write(
        &path,
        r#"[
            { "_id": "good", "_type": "collection", "title": "Utah", "slug": { "current": "utah" } },
            { "_id": "bad", "_type": "photo", "title": "Dusk" }
        ]"#,
    )
    .unwrap();

    portfolio()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("bad: error slug: Required"))
        .stdout(predicate::str::contains("bad: error image: Required"))
        .stderr(predicate::str::contains("2 error(s)"));
}

#[test]
fn test_validate_accepts_warnings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("photo.json");
    write(
        &path,
        r#"{
            "_type": "photo",
            "title": "Dusk",
            "slug": { "current": "dusk" },
            "image": { "asset": { "_ref": "image-a-10x10-jpg" } }
        }"#,
    )
    .unwrap();

    portfolio()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("document 0: warning image.alt"));
}

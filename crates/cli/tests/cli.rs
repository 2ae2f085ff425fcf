use assert_cmd::Command;

#[test]
fn openapi_prints_both_resources() {
    let output = Command::cargo_bin("quill")
        .unwrap()
        .arg("openapi")
        .env("QUILL_CONFIG_DIR", std::env::temp_dir().join("quill-cli-no-config"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths = document["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/books/book/{book_id}"));
    assert!(paths.contains_key("/api/todos/{todo_id}"));
    assert!(paths.contains_key("/api/db/health"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("quill")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

//! Integration tests for the tabkit command line

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tabkit() -> Command {
    Command::cargo_bin("tabkit").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    tabkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("shrink"));
}

#[test]
fn test_format_tsv_to_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "assays.tsv", "A\tB\tC\n1\t2\n3\t4\t5\t6\n");

    tabkit()
        .args(["--out-sep", "comma", "format"])
        .arg(&input)
        .assert()
        .success()
        .stdout("A,B,C\n1,2,\n3,4,5\n");
}

#[test]
fn test_quoted_tsv_reads_and_writes_tabs() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "assays.tsv", "Name\tChannels\n\"Embryo 10\"\tGFP,EB3\n");

    tabkit()
        .args(["--quoted", "format"])
        .arg(&input)
        .assert()
        .success()
        .stdout("Name\tChannels\nEmbryo 10\tGFP,EB3\n");
}

#[test]
fn test_extract_by_name_drops_repeats() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "Name,Tag,N\na,x,1\na,x,2\nb,y,3\n");

    tabkit()
        .arg("extract")
        .arg(&input)
        .args(["--columns", "Name,1"])
        .assert()
        .success()
        .stdout("Name,Tag\na,x\nb,y\n");
}

#[test]
fn test_shrink_compresses_values() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "Name,Tag\na,x\na,y\na,x\nb,z\n");

    tabkit()
        .arg("shrink")
        .arg(&input)
        .args(["--key", "Name", "--compress", "Tag"])
        .assert()
        .success()
        .stdout("Name,Tag\na,x;y\nb,z\n");
}

#[test]
fn test_merge_with_content_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "input.csv", "id,v\n1,a\n2,b\n");
    let content = write(&dir, "content.csv", "id,w\n1,X\n");

    tabkit()
        .arg("merge")
        .arg(&input)
        .arg("--content")
        .arg(&content)
        .args(["--key", "id"])
        .assert()
        .success()
        .stdout("id,v,w\n1,a,X\n2,b,\n");
}

#[test]
fn test_merge_missing_key_fails_with_code_2() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "input.csv", "id,v\n1,a\n");
    let content = write(&dir, "content.csv", "key,w\n1,X\n");

    tabkit()
        .arg("merge")
        .arg(&input)
        .arg("--content")
        .arg(&content)
        .args(["--key", "id"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Key header id not found in content"));
}

#[test]
fn test_filter_and_replace() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "f,n\nkeep.txt,1\ndrop.log,2\n");

    tabkit()
        .arg("filter")
        .arg(&input)
        .args(["--column", "f", "--ends-with", ".log"])
        .assert()
        .success()
        .stdout("f,n\nkeep.txt,1\n");

    tabkit()
        .arg("replace")
        .arg(&input)
        .args(["--column", "0", "--find", ".txt"])
        .assert()
        .success()
        .stdout("f,n\nkeep,1\ndrop.log,2\n");
}

#[test]
fn test_filter_requires_a_test() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "f\na\n");

    tabkit()
        .arg("filter")
        .arg(&input)
        .args(["--column", "f"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_index_found_and_missing() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "Dataset Name,Image File\n");

    tabkit()
        .arg("index")
        .arg(&input)
        .args(["--name", " Image File "])
        .assert()
        .success()
        .stdout("1\n");

    tabkit()
        .arg("index")
        .arg(&input)
        .args(["--name", "Channels"])
        .assert()
        .code(1)
        .stdout("-1\n");
}

#[test]
fn test_output_file_and_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "a,b\n1,2\n");
    let output = dir.path().join("out.csv");

    tabkit()
        .arg("swap")
        .arg(&input)
        .args(["--first", "a", "--second", "b", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(&output).unwrap(), "b,a\n2,1\n");

    tabkit()
        .args(["-f", "json", "remove-column"])
        .arg(&input)
        .args(["--column", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows\""))
        .stdout(predicate::str::contains("\"b\": \"2\""));
}

#[test]
fn test_split_uses_secondary_separator() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.csv", "Name,Tags\na,x|y\nb,z\n");

    tabkit()
        .args(["--secondary-sep", "pipe", "split"])
        .arg(&input)
        .args(["--column", "Tags"])
        .assert()
        .success()
        .stdout("Name,Tags 1,Tags 2\na,x,y\nb,z,\n");
}

#[test]
fn test_run_recipe() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "files.csv", "Dataset,Path\nFig1,a/b.tif\nFig1,a/c.tif\n");
    let recipe = write(
        &dir,
        "recipe.json",
        r#"{
            "separator": ",",
            "steps": [
                {"op": "prefix", "column": "Path", "prefix": "/data/"},
                {"op": "shrink", "keys": ["Dataset"], "compress": ["Path"]},
                {"op": "rename_column", "column": 1, "name": "Files"}
            ]
        }"#,
    );

    tabkit()
        .arg("run")
        .arg(&recipe)
        .arg(&input)
        .assert()
        .success()
        .stdout("Dataset,Files\nFig1,/data/a/b.tif;/data/a/c.tif\n");
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "data.xlsx", "a,b\n");

    tabkit()
        .arg("format")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse file"));
}

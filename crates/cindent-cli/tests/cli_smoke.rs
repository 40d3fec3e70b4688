use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn cindent(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cindent"))
        .args(args)
        .current_dir(dir)
        .env_remove("CINDENT_LOG")
        .output()
        .expect("run cindent")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const MISINDENTED: &str = "int main()\n{\nif (x)\ny();\nreturn 0;\n}\n";
const INDENTED: &str = "int main()\n{\n    if (x)\n        y();\n    return 0;\n}\n";

#[test]
fn reindent_prints_the_buffer() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("main.c"), MISINDENTED).expect("write");

    let output = cindent(dir.path(), &["reindent", "main.c"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), INDENTED);
}

#[test]
fn reindent_write_rewrites_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("main.c");
    std::fs::write(&path, MISINDENTED).expect("write");

    let output = cindent(dir.path(), &["reindent", "--write", "main.c"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert_eq!(std::fs::read_to_string(&path).expect("read"), INDENTED);
}

#[test]
fn reindent_reads_stdin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_cindent"))
        .args(["reindent", "-"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cindent");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"if (x) {\ny;\n}\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "if (x) {\n    y;\n}\n");
}

#[test]
fn column_reports_recommended_indent() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.c"), "foo(a,\nb);\nif (x) {\n}\n").expect("write");

    let output = cindent(dir.path(), &["column", "a.c", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "4");

    let output = cindent(dir.path(), &["column", "a.c", "4", "--typed", ";"]);
    assert_eq!(stdout(&output).trim(), "4");
    let output = cindent(dir.path(), &["column", "a.c", "4", "--typed", "}"]);
    assert_eq!(stdout(&output).trim(), "0");

    let output = cindent(dir.path(), &["column", "a.c", "9"]);
    assert!(!output.status.success());
}

#[test]
fn check_flags_misindented_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("good.c"), INDENTED).expect("write");
    std::fs::write(dir.path().join("bad.c"), MISINDENTED).expect("write");

    let output = cindent(dir.path(), &["check", "good.c"]);
    assert!(output.status.success());

    let output = cindent(dir.path(), &["check", "good.c", "bad.c"]);
    assert!(!output.status.success());
    let report = stdout(&output);
    assert!(report.contains("bad.c:3: expected column 4, found 0"));
    assert!(!report.contains("good.c"));
}

#[test]
fn check_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("bad.c"), MISINDENTED).expect("write");

    let output = cindent(dir.path(), &["check", "--json", "bad.c"]);
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    let mismatches = report[0]["mismatches"].as_array().expect("mismatches");
    assert_eq!(mismatches.len(), 3);
    assert_eq!(mismatches[0]["line"], 3);
    assert_eq!(mismatches[0]["expected"], 4);
}

#[test]
fn config_merges_file_and_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = cindent(dir.path(), &["config"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("indent_size = 4"));

    std::fs::write(
        dir.path().join(".cindent.toml"),
        "indent_size = 2\ntab_size = 4\n",
    )
    .expect("write");
    let output = cindent(dir.path(), &["config", "--tab-size", "3"]);
    let text = stdout(&output);
    assert!(text.contains("indent_size = 2"));
    assert!(text.contains("tab_size = 3"));

    std::fs::write(dir.path().join("other.toml"), "indent_size = 8\n").expect("write");
    let output = cindent(dir.path(), &["--config", "other.toml", "config"]);
    assert!(stdout(&output).contains("indent_size = 8"));
}

#[test]
fn invalid_input_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fails = |args: &[&str]| !cindent(dir.path(), args).status.success();
    assert!(fails(&["frobnicate"]));
    assert!(fails(&["config", "--indent-size", "0"]));
    assert!(fails(&["config", "--indent-size", "many"]));
    assert!(fails(&["reindent", "missing.c"]));
}

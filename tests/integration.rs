use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_commentgen")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

const ADD: &str = "int Add(int a,int b)\n{\n    return a+b;\n}\n";

// -- end-to-end --

#[test]
fn only_end_marker_accepted() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");

    // header: n, function: n, end-of-function name: Add
    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output)])
        .write_stdin("n\nn\nAdd\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found function: int Add(int a,int b)"))
        .stdout(predicate::str::contains("Done! Commented code saved as:"));

    let result = fs::read_to_string(&output).unwrap();
    assert_eq!(
        result,
        "int Add(int a,int b)\n{\n    return a+b;\n}  // end of \"Add\"\n\n\n"
    );
}

#[test]
fn full_function_header() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");

    let answers = "y\nAdd\nAdds two numbers\ny\na\nfirst addend\nin\nIN\nthe sum\ny\n";
    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter exactly: IN, OUT, or IN/OUT"));

    let result = fs::read_to_string(&output).unwrap();
    let expected = format!(
        "\n\n// ==== Add {}\n//\n// Adds two numbers\n//\n// Input:\n//      a [IN] -- first addend\n//\n// Output:\n//      the sum\n//\n// {}\n\nint Add(int a,int b)\n{{\n    return a+b;\n}}  // end of \"Add\"\n\n\n",
        "=".repeat(68),
        "=".repeat(76)
    );
    assert_eq!(result, expected);
}

#[test]
fn file_header_from_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");

    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output)])
        .args(["--date", "10/19/2026", "--project", "Adder"])
        .args(["--description", "Adds numbers", "--programmer", "Pat Doe"])
        .write_stdin("y\n")
        .assert()
        .success();

    let rule = format!("// {}", "=".repeat(76));
    let expected_header = format!(
        "{rule}\n// file: add.cpp\n{rule}\n// Programmer: Pat Doe\n// Date: 10/19/2026\n// Project: Adder\n//\n// Description:\n//      Adds numbers\n//\n{rule}\n\n"
    );
    let result = fs::read_to_string(&output).unwrap();
    assert_eq!(result, format!("{}{}", expected_header, ADD));
}

#[test]
fn fixture_without_answers_is_copied_unchanged() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.cpp");

    let assert = cmd()
        .arg(fixture_path("counter.cpp"))
        .args(["-o", arg(&output), "--no-header"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Found function:").count(), 8);
    assert_eq!(stdout.matches("Found end of function:").count(), 8);

    let original = fs::read_to_string(fixture_path("counter.cpp")).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), original);
}

#[test]
fn unbalanced_braces_complete_without_error() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "bad.cpp", "void f()\n{\n}\nvoid g()\n{\n    {\n}\n");
    let output = dir.path().join("out.cpp");

    let assert = cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin("n\nf\nn\n")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Found end of function:").count(), 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "void f()\n{\n}  // end of \"f\"\n\n\nvoid g()\n{\n    {\n}\n"
    );
}

#[test]
fn skip_literal_braces_flag() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "lit.cpp", "void f()\n{\n    cout << \"}\";\n}\n");
    let output = dir.path().join("out.cpp");

    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header", "--skip-literal-braces"])
        .write_stdin("n\nn\nf\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "void f()\n{\n    cout << \"}\";\n}  // end of \"f\"\n\n\n"
    );
}

#[test]
fn crlf_and_non_utf8_bytes_are_copied_unchanged() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin1.cpp");
    let source: &[u8] = b"// caf\xE9\r\nint x = 1;\r\n";
    fs::write(&input, source).unwrap();
    let output = dir.path().join("out.cpp");

    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin("n\n")
        .assert()
        .success();

    assert_eq!(fs::read(&output).unwrap(), source);
}

// -- logging --

#[test]
fn rust_log_enables_debug_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "x.cpp", "int x;\n");

    let assert = cmd()
        .env("RUST_LOG", "commentgen=debug")
        .arg(arg(&input))
        .args(["-o", arg(&dir.path().join("out.cpp")), "--no-header"])
        .write_stdin("n\n")
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("classified"), "stderr: {stderr}");
}

#[test]
fn quiet_by_default() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "x.cpp", "int x;\n");

    cmd()
        .env_remove("RUST_LOG")
        .arg(arg(&input))
        .args(["-o", arg(&dir.path().join("out.cpp")), "--no-header"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// -- paths --

#[test]
fn prompts_for_input_path() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");
    let missing = dir.path().join("nope.cpp");

    cmd()
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin(format!("{}\n{}\n", arg(&missing), arg(&input)))
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: File not found."))
        .stdout(predicate::str::contains("File found!"));

    assert_eq!(fs::read_to_string(&output).unwrap(), ADD);
}

#[test]
fn default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);

    cmd()
        .arg(arg(&input))
        .arg("--no-header")
        .write_stdin("\n")
        .assert()
        .success();

    assert!(dir.path().join("commented_add.cpp").is_file());
}

// -- errors --

#[test]
fn missing_input_exits_3() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(arg(&dir.path().join("missing.cpp")))
        .args(["-o", arg(&dir.path().join("out.cpp"))])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn uncreatable_output_exits_4() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&dir.path().join("no/such/dir/out.cpp")), "--no-header"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("cannot create"));
}

#[test]
fn closed_input_during_path_prompt_exits_5() {
    cmd()
        .arg("--no-header")
        .write_stdin("/no/such/file.cpp\n")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("input ended"));
}

#[test]
fn closed_input_during_mode_prompt_exits_5() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");
    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin("y\nAdd\nAdds\ny\na\nfirst\n")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("parameter mode"));
}

#[test]
fn failed_run_removes_partial_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "add.cpp", ADD);
    let output = dir.path().join("out.cpp");
    cmd()
        .arg(arg(&input))
        .args(["-o", arg(&output), "--no-header"])
        .write_stdin("y\nAdd\nAdds\ny\na\nfirst\n")
        .assert()
        .failure()
        .code(5);

    assert!(!output.exists());
}

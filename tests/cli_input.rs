// tests/cli_input.rs
//
// Input-validation paths of the binary. Every case here fails (or prints
// help) before the first network request, so the suite runs offline.

use std::process::{Command, Stdio};

fn hacktivity() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hacktivity"));
    cmd.stdin(Stdio::null());
    cmd
}

fn run_err(cmd: &mut Command) -> String {
    let out = cmd.output().expect("spawn command");
    assert!(
        !out.status.success(),
        "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn non_numeric_year_is_a_fatal_input_error() {
    let stderr = run_err(hacktivity().args(["--username", "ta1al", "--years", "banana"]));
    assert!(stderr.contains("invalid year"), "stderr: {stderr}");
}

#[test]
fn two_digit_year_is_out_of_range() {
    let stderr = run_err(hacktivity().args(["--username", "ta1al", "--year", "99"]));
    assert!(stderr.contains("out of range"), "stderr: {stderr}");
}

#[test]
fn reversed_year_range_is_rejected() {
    let stderr = run_err(hacktivity().args([
        "--username",
        "ta1al",
        "--year-start",
        "2025",
        "--year-end",
        "2020",
    ]));
    assert!(stderr.contains("is after end"), "stderr: {stderr}");
}

#[test]
fn missing_username_with_closed_stdin_fails() {
    // No username anywhere and stdin at EOF: the prompt comes up empty.
    let stderr = run_err(&mut hacktivity());
    assert!(stderr.contains("username"), "stderr: {stderr}");
}

#[test]
fn url_without_a_username_segment_is_rejected() {
    let stderr = run_err(hacktivity().args(["--username", "https://tryhackme.com"]));
    assert!(stderr.contains("profile URL"), "stderr: {stderr}");
}

#[test]
fn zero_width_is_rejected_before_any_fetch() {
    let stderr = run_err(hacktivity().args(["--username", "ta1al", "--width", "0"]));
    assert!(stderr.contains("greater than 0"), "stderr: {stderr}");
}

#[test]
fn non_svg_output_is_rejected_before_any_fetch() {
    let stderr = run_err(hacktivity().args(["--username", "ta1al", "--output", "chart.png"]));
    assert!(stderr.contains(".svg"), "stderr: {stderr}");
}

#[test]
fn help_lists_every_input_flag() {
    let out = hacktivity()
        .arg("--help")
        .output()
        .expect("spawn command");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    for flag in [
        "--username",
        "--users",
        "--year",
        "--years",
        "--year-start",
        "--year-end",
        "--output",
        "--width",
        "--height",
        "--verbose",
    ] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }
}

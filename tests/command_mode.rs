//! Integration tests for command mode (-c/--command flag)

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_elow"))
        // Tests must be deterministic and not depend on a user's ~/.config/elow/config.toml.
        .arg("--no-config")
        .args(args)
        .env_remove("ELOW_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_precedence_and_grouping() {
    let (stdout, _, _) = run_command(&["-c", "1+2*3"]);
    assert_eq!(stdout.trim(), "7");
    let (stdout, _, _) = run_command(&["-c", "(1+2)*3"]);
    assert_eq!(stdout.trim(), "9");
}

#[test]
fn test_auto_prepend_equals() {
    let (stdout1, _, _) = run_command(&["-c", "10 + 5"]);
    let (stdout2, _, _) = run_command(&["-c", "=10 + 5"]);
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_cell_references() {
    let (stdout, _, code) = run_command(&[
        "-s", ":0:0=5", "-s", ":0:1==:0:0*2", "-c", "sum(:0:0, :0:1)",
    ]);
    assert_eq!(stdout.trim(), "15");
    assert_eq!(code, 0);
}

#[test]
fn test_fractional_result() {
    let (stdout, _, code) = run_command(&["-c", "1/4"]);
    assert_eq!(stdout.trim(), "0.250");
    assert_eq!(code, 0);
}

#[test]
fn test_pow_function() {
    let (stdout, _, code) = run_command(&["-c", "pow(2, 10)"]);
    assert_eq!(stdout.trim(), "1024");
    assert_eq!(code, 0);
}

#[test]
fn test_error_exit_code() {
    let (stdout, _, code) = run_command(&["-c", "undefined_function()"]);
    assert_eq!(stdout.trim(), "!#NAME");
    assert_eq!(code, 1);

    let (stdout, _, code) = run_command(&["-c", "abs(1, 2)"]);
    assert_eq!(stdout.trim(), "!#ARG");
    assert_eq!(code, 1);
}

#[test]
fn test_position_error() {
    let (stdout, _, code) = run_command(&["--size", "10x10", "-c", ":1000:1000"]);
    assert_eq!(stdout.trim(), "!#POS");
    assert_eq!(code, 1);
}

#[test]
fn test_text_cell_type_error() {
    let (stdout, _, code) = run_command(&["-s", ":0:0=hello", "-c", ":0:0+1"]);
    assert_eq!(stdout.trim(), "!#TYPE");
    assert_eq!(code, 1);
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert_eq!(stdout.trim(), "inf");
    assert_eq!(code, 0);
}

#[test]
fn test_invalid_formula() {
    for formula in ["1+", "(1+2", ":1:x", "foo(1,"] {
        let (stdout, stderr, code) = run_command(&["-c", formula]);
        assert!(stdout.is_empty(), "unexpected output for {:?}", formula);
        assert!(stderr.contains("Invalid formula"), "stderr was {:?}", stderr);
        assert_eq!(code, 1);
    }
}

#[test]
fn test_invalid_cell_input_is_rejected() {
    let (_, stderr, code) = run_command(&["-s", ":0:0==1+", "-c", "1"]);
    assert!(stderr.contains("Failed to set :0:0"));
    assert_eq!(code, 1);
}

#[test]
fn test_cycle_is_reported() {
    let (stdout, _, code) = run_command(&["-s", ":0:0==:0:1", "-s", ":0:1==:0:0", "-c", ":0:0"]);
    assert_eq!(stdout.trim(), "!#CYCLE");
    assert_eq!(code, 1);
}

#[test]
fn test_dump_cells() {
    let (stdout, _, code) = run_command(&["-s", ":1:0==:0:0+1", "-s", ":0:0=41", "-s", ":0:1=hi"]);
    assert_eq!(stdout, ":0:0\t41\n:1:0\t42\n:0:1\thi\n");
    assert_eq!(code, 0);
}

#[test]
fn test_list_functions() {
    let (stdout, _, code) = run_command(&["-l"]);
    assert!(stdout.lines().any(|line| line.starts_with("sum ")));
    assert!(stdout.lines().any(|line| line.starts_with("pi ")));
    assert_eq!(code, 0);
}

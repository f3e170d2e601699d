//! Startup failures of the real binary

use std::process::Command;

#[test]
fn exits_with_error_when_build_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_coi-serve"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[ERROR] cannot serve directory 'build'"),
        "unexpected stderr: {stderr}"
    );
    assert!(output.stdout.is_empty());
}

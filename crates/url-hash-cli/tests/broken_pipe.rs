use std::process::{Command, Stdio};

use assert_cmd::cargo::cargo_bin;
use tempfile::TempDir;

#[test]
fn closed_stdout_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    // Enough output to overflow the pipe buffer once the reader is gone.
    let routes: Vec<String> = (0..10_000).map(|i| format!("#route/{i}")).collect();
    let temp = TempDir::new()?;

    let mut child = Command::new(cargo_bin("url-hash"))
        .current_dir(temp.path())
        .args(&routes)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    drop(child.stdout.take());

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "url-hash should exit 0 after its reader hangs up, exited with {:?}",
        output.status.code()
    );
    assert!(
        stderr.is_empty(),
        "url-hash should stay quiet on a closed pipe, wrote: {stderr}"
    );

    Ok(())
}

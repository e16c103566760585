//! Command execution primitives with captured output.

use std::path::Path;
use std::process::{Command, Output};

/// Run a command in `dir` and return its stdout on success.
///
/// A nonzero exit, or a failure to spawn at all, returns the command's
/// diagnostic text instead. Callers decide whether that is fatal; the
/// branch resolver treats it as a non-fatal "cannot determine" outcome.
pub fn run_captured(dir: &Path, program: &str, args: &[&str]) -> Result<String, String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| format!("Failed to run {}: {}", program, e))?;

    if !output.status.success() {
        return Err(error_text(&output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Extract diagnostic text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captured_returns_stdout() {
        let result = run_captured(Path::new("."), "echo", &["hello"]);
        assert_eq!(result.unwrap().trim(), "hello");
    }

    #[test]
    fn run_captured_fails_for_missing_program() {
        let result = run_captured(Path::new("."), "nonexistent_command_xyz", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn run_captured_fails_on_nonzero_exit() {
        let result = run_captured(Path::new("."), "false", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn error_text_prefers_stderr() {
        let output = Output {
            status: std::process::ExitStatus::default(),
            stdout: b"stdout content".to_vec(),
            stderr: b"stderr content".to_vec(),
        };
        assert_eq!(error_text(&output), "stderr content");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output = Output {
            status: std::process::ExitStatus::default(),
            stdout: b"stdout content".to_vec(),
            stderr: b"".to_vec(),
        };
        assert_eq!(error_text(&output), "stdout content");
    }
}

//! Environment-provided branch override.
//!
//! Kept in its own test binary: the override variable is process-global,
//! and this is the only test allowed to set it.

use sendoff::branch;
use sendoff::notify::{self, NotifyInput};
use tempfile::TempDir;

#[test]
fn environment_override_wins_regardless_of_working_copy() {
    std::env::set_var(branch::BRANCH_OVERRIDE_VAR, "main");

    // Not a git repository; only the override can name a branch here.
    let dir = TempDir::new().unwrap();
    let input = NotifyInput {
        to: "dev@example.com".to_string(),
        cc: String::new(),
        bcc: String::new(),
        subject: "Build finished".to_string(),
        body: String::new(),
        from: "builds@example.com".to_string(),
        smtp_host: "localhost".to_string(),
        smtp_port: 25,
        username: None,
        password: None,
        use_ssl: false,
        attachment: None,
        branch_filter: "main;release/*".to_string(),
        output_path_file: String::new(),
        repo_dir: Some(dir.path().to_string_lossy().to_string()),
    };

    let output = notify::run(&input, true).unwrap();
    assert!(output.skip_reason.is_none());
    assert_eq!(output.branch.as_deref(), Some("main"));
}

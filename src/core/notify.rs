//! End-of-build notification task: expand the body, evaluate the branch
//! gate, deliver the mail.
//!
//! Gate failures are successful skips, not errors: a build on a filtered
//! branch or outside a working copy finishes its pipeline step normally
//! with `sent: false`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{branch, filter, mailer, template};
use crate::error::Result;

/// Task input, accepted as CLI flags or as a JSON spec.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyInput {
    /// Recipient list, `;` or `,` separated.
    pub to: String,
    #[serde(default)]
    pub cc: String,
    #[serde(default)]
    pub bcc: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub from: String,
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub use_ssl: bool,
    /// Optional file to attach to the message.
    #[serde(default)]
    pub attachment: Option<String>,
    /// Semicolon-delimited branch globs gating the send.
    #[serde(default)]
    pub branch_filter: String,
    /// File whose first line carries the artifact path for the
    /// `{{ ZIP_FILE_OUTPUT }}` placeholder.
    #[serde(default)]
    pub output_path_file: String,
    /// Git working copy the branch is resolved in. Defaults to the
    /// current directory.
    #[serde(default)]
    pub repo_dir: Option<String>,
}

fn default_smtp_port() -> u16 {
    25
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyOutput {
    pub action: String,
    pub sent: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub recipients: usize,
    pub subject: String,
}

/// Skip reason: the branch could not be determined.
pub const SKIP_BRANCH_UNRESOLVED: &str = "branch-unresolved";
/// Skip reason: the branch matched none of the configured filters.
pub const SKIP_BRANCH_FILTERED: &str = "branch-filtered";

/// Run the notification task.
///
/// The body is expanded first; the branch gate is only evaluated when a
/// concrete filter is configured, so unfiltered tasks never invoke git.
/// With `dry_run` the message is still built and validated but the SMTP
/// exchange is skipped.
pub fn run(input: &NotifyInput, dry_run: bool) -> Result<NotifyOutput> {
    let body = template::expand_body(&input.body, &input.output_path_file);

    let mut resolved = None;
    if !filter::is_unfiltered(&input.branch_filter) {
        let repo_dir = input
            .repo_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let name = match branch::resolve_current(&repo_dir) {
            Ok(name) => name,
            Err(e) => {
                log_status!("notify", "Skipping mail, branch unresolved: {}", e);
                return Ok(skipped(input, SKIP_BRANCH_UNRESOLVED, None, dry_run));
            }
        };

        if !filter::branch_matches(&name, &input.branch_filter) {
            log_status!(
                "notify",
                "Skipping mail, branch '{}' matches none of '{}'",
                name,
                input.branch_filter
            );
            return Ok(skipped(input, SKIP_BRANCH_FILTERED, Some(name), dry_run));
        }

        resolved = Some(name);
    }

    let envelope = build_envelope(input, body);
    let recipients = envelope.to.len() + envelope.cc.len() + envelope.bcc.len();

    if dry_run {
        mailer::build_message(&envelope)?;
    } else {
        mailer::send(&envelope, &server_of(input))?;
        log_status!(
            "notify",
            "Sent '{}' to {} recipient(s)",
            envelope.subject,
            recipients
        );
    }

    Ok(NotifyOutput {
        action: "notify".to_string(),
        sent: !dry_run,
        dry_run,
        branch: resolved,
        skip_reason: None,
        recipients,
        subject: input.subject.clone(),
    })
}

fn build_envelope(input: &NotifyInput, body: String) -> mailer::Envelope {
    mailer::Envelope {
        from: input.from.clone(),
        to: mailer::split_addresses(&input.to),
        cc: mailer::split_addresses(&input.cc),
        bcc: mailer::split_addresses(&input.bcc),
        subject: input.subject.clone(),
        body,
        attachment: input.attachment.as_ref().map(PathBuf::from),
    }
}

fn server_of(input: &NotifyInput) -> mailer::SmtpServer {
    mailer::SmtpServer {
        host: input.smtp_host.clone(),
        port: input.smtp_port,
        username: input.username.clone(),
        password: input.password.clone(),
        ssl: input.use_ssl,
    }
}

fn skipped(input: &NotifyInput, reason: &str, branch: Option<String>, dry_run: bool) -> NotifyOutput {
    NotifyOutput {
        action: "notify".to_string(),
        sent: false,
        dry_run,
        branch,
        skip_reason: Some(reason.to_string()),
        recipients: mailer::split_addresses(&input.to).len(),
        subject: input.subject.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NotifyInput {
        NotifyInput {
            to: "dev@example.com".to_string(),
            cc: String::new(),
            bcc: String::new(),
            subject: "Build finished".to_string(),
            body: "All green.".to_string(),
            from: "builds@example.com".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            username: None,
            password: None,
            use_ssl: false,
            attachment: None,
            branch_filter: String::new(),
            output_path_file: String::new(),
            repo_dir: None,
        }
    }

    #[test]
    fn unfiltered_task_skips_branch_resolution() {
        // repo_dir points nowhere; git would fail if it were consulted.
        let mut input = input();
        input.repo_dir = Some("/nonexistent/sendoff-test".to_string());

        let output = run(&input, true).unwrap();
        assert!(!output.sent);
        assert!(output.dry_run);
        assert!(output.skip_reason.is_none());
        assert_eq!(output.recipients, 1);
    }

    #[test]
    fn unresolvable_branch_is_a_skip_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut input = input();
        input.branch_filter = "release/*".to_string();
        input.repo_dir = Some(dir.path().to_string_lossy().to_string());

        let output = run(&input, true).unwrap();
        assert!(!output.sent);
        assert_eq!(output.skip_reason.as_deref(), Some(SKIP_BRANCH_UNRESOLVED));
    }

    #[test]
    fn input_parses_from_camel_case_json() {
        let input: NotifyInput = serde_json::from_str(
            r#"{
                "to": "dev@example.com",
                "subject": "Build finished",
                "from": "builds@example.com",
                "smtpHost": "mail.example.com",
                "branchFilter": "release/*",
                "outputPathFile": "out.txt",
                "useSsl": true
            }"#,
        )
        .unwrap();

        assert_eq!(input.smtp_host, "mail.example.com");
        assert_eq!(input.smtp_port, 25);
        assert_eq!(input.branch_filter, "release/*");
        assert!(input.use_ssl);
    }
}

use clap::Args;

use sendoff::notify::{self, NotifyInput, NotifyOutput};

use super::CmdResult;

/// Environment fallback for the SMTP password, so pipeline definitions
/// can keep the secret out of the command line.
const PASSWORD_VAR: &str = "SENDOFF_SMTP_PASSWORD";

#[derive(Args)]
pub struct NotifyArgs {
    /// JSON input spec. Use "-" for stdin, "@file.json" for a file, or
    /// an inline JSON string. Takes precedence over individual flags.
    #[arg(long)]
    json: Option<String>,

    /// Recipient list, `;` or `,` separated
    #[arg(long)]
    to: Option<String>,

    /// CC recipient list
    #[arg(long, default_value = "")]
    cc: String,

    /// BCC recipient list
    #[arg(long, default_value = "")]
    bcc: String,

    /// Message subject
    #[arg(long)]
    subject: Option<String>,

    /// Message body; {{ ZIP_FILE_OUTPUT }} expands to the artifact path
    #[arg(long, default_value = "")]
    body: String,

    /// Sender address
    #[arg(long)]
    from: Option<String>,

    /// SMTP server hostname
    #[arg(long)]
    smtp_host: Option<String>,

    /// SMTP server port
    #[arg(long, default_value_t = 25)]
    smtp_port: u16,

    /// SMTP username
    #[arg(long)]
    username: Option<String>,

    /// SMTP password (falls back to SENDOFF_SMTP_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Use an SSL-wrapped SMTP connection
    #[arg(long)]
    ssl: bool,

    /// File to attach to the message
    #[arg(long)]
    attachment: Option<String>,

    /// Semicolon-delimited branch globs gating the send
    #[arg(long, default_value = "")]
    branch_filter: String,

    /// File whose first line carries the artifact path
    #[arg(long, default_value = "")]
    output_path_file: String,

    /// Git working copy to resolve the branch in (default: current dir)
    #[arg(long)]
    repo_dir: Option<String>,

    /// Evaluate the gate and build the message without delivering
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: NotifyArgs) -> CmdResult<NotifyOutput> {
    let mut input = match &args.json {
        Some(spec) => {
            let raw = super::read_json_spec_to_string(spec)?;
            serde_json::from_str::<NotifyInput>(&raw)?
        }
        None => from_flags(&args)?,
    };

    if input.password.is_none() {
        input.password = std::env::var(PASSWORD_VAR).ok();
    }
    input.attachment = input.attachment.as_deref().map(super::expand_path);
    input.repo_dir = input.repo_dir.as_deref().map(super::expand_path);
    if !input.output_path_file.is_empty() {
        input.output_path_file = super::expand_path(&input.output_path_file);
    }

    let output = notify::run(&input, args.dry_run)?;
    Ok((output, 0))
}

fn from_flags(args: &NotifyArgs) -> sendoff::Result<NotifyInput> {
    Ok(NotifyInput {
        to: required(&args.to, "to")?,
        cc: args.cc.clone(),
        bcc: args.bcc.clone(),
        subject: required(&args.subject, "subject")?,
        body: args.body.clone(),
        from: required(&args.from, "from")?,
        smtp_host: required(&args.smtp_host, "smtp-host")?,
        smtp_port: args.smtp_port,
        username: args.username.clone(),
        password: args.password.clone(),
        use_ssl: args.ssl,
        attachment: args.attachment.clone(),
        branch_filter: args.branch_filter.clone(),
        output_path_file: args.output_path_file.clone(),
        repo_dir: args.repo_dir.clone(),
    })
}

fn required(value: &Option<String>, flag: &str) -> sendoff::Result<String> {
    value.clone().ok_or_else(|| {
        sendoff::Error::invalid_argument(flag, format!("Missing --{} (or provide --json)", flag))
    })
}

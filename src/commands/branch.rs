use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use sendoff::{branch, filter};

use super::CmdResult;

#[derive(Args)]
pub struct BranchArgs {
    /// Git working copy to resolve the branch in (default: current dir)
    #[arg(long)]
    repo_dir: Option<String>,

    /// Semicolon-delimited branch globs to test the resolved branch
    /// against
    #[arg(long)]
    branch_filter: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchOutput {
    pub action: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Filter verdict, present only when --branch-filter was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfiltered: Option<bool>,
}

pub fn run(args: BranchArgs) -> CmdResult<BranchOutput> {
    let repo_dir = args
        .repo_dir
        .as_deref()
        .map(super::expand_path)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let resolution = branch::resolve_current(&repo_dir);

    let (matched, unfiltered) = match (&args.branch_filter, &resolution) {
        (Some(spec), _) if filter::is_unfiltered(spec) => (None, Some(true)),
        (Some(spec), Ok(name)) => (Some(filter::branch_matches(name, spec)), Some(false)),
        (Some(_), Err(_)) => (Some(false), Some(false)),
        (None, _) => (None, None),
    };

    let output = match resolution {
        Ok(name) => BranchOutput {
            action: "branch".to_string(),
            resolved: true,
            branch: Some(name),
            error: None,
            matched,
            unfiltered,
        },
        Err(e) => BranchOutput {
            action: "branch".to_string(),
            resolved: false,
            branch: None,
            error: Some(e.to_string()),
            matched,
            unfiltered,
        },
    };

    Ok((output, 0))
}

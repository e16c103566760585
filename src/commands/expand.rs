use clap::Args;
use serde::Serialize;

use sendoff::template;

use super::CmdResult;

#[derive(Args)]
pub struct ExpandArgs {
    /// Body text containing {{ ZIP_FILE_OUTPUT }} placeholders
    #[arg(long, default_value = "")]
    body: String,

    /// File whose first line carries the artifact path
    #[arg(long, default_value = "")]
    output_path_file: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandOutput {
    pub action: String,
    pub body: String,
    pub artifact_path: String,
}

pub fn run(args: ExpandArgs) -> CmdResult<ExpandOutput> {
    let container = if args.output_path_file.is_empty() {
        args.output_path_file.clone()
    } else {
        super::expand_path(&args.output_path_file)
    };

    let output = ExpandOutput {
        action: "expand".to_string(),
        body: template::expand_body(&args.body, &container),
        artifact_path: template::artifact_path(&container),
    };

    Ok((output, 0))
}

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{branch, expand, notify};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "sendoff")]
#[command(version = VERSION)]
#[command(about = "Branch-gated build notification emails for CI pipelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the end-of-build notification email
    Notify(notify::NotifyArgs),
    /// Resolve the current branch, optionally testing it against filters
    Branch(branch::BranchArgs),
    /// Preview body expansion for an output-path container file
    Expand(expand::ExpandArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = match cli.command {
        Commands::Notify(args) => output::map_cmd_result_to_json(notify::run(args)),
        Commands::Branch(args) => output::map_cmd_result_to_json(branch::run(args)),
        Commands::Expand(args) => output::map_cmd_result_to_json(expand::run(args)),
    };

    output::print_json_result(json_result);
    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

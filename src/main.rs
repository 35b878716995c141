use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::sweep;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "anysweep")]
#[command(version = VERSION)]
#[command(about = "Rewrite TypeScript `any` annotations to `unknown` across a fixed list of files")]
struct Cli {
    /// Print the result as a JSON envelope instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the listed files in place
    Fix(sweep::SweepArgs),
    /// Report which files would change without writing (exit 1 if any would)
    Check(sweep::SweepArgs),
    /// List the built-in rewrite rules in application order
    Rules,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    let exit_code = commands::run(cli.command, &global);

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

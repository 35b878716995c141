use serde::Serialize;

use anysweep::rewrite::RunMode;

use crate::output::{self, TextReport};

pub type CmdResult<T> = anysweep::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub json: bool,
}

pub mod rules;
pub mod sweep;

/// Print a command result in the selected output mode and return its exit code.
fn emit<T: Serialize + TextReport>(result: CmdResult<T>, global: &GlobalArgs) -> i32 {
    if !global.json {
        return output::print_text_result(result);
    }

    let (json_result, exit_code) = output::map_cmd_result_to_json(result);
    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err.describe());
        return 1;
    }
    exit_code
}

pub(crate) fn run(command: crate::Commands, global: &GlobalArgs) -> i32 {
    crate::tty::status("anysweep is working...");

    match command {
        crate::Commands::Fix(args) => emit(sweep::run(args, RunMode::Write), global),
        crate::Commands::Check(args) => emit(sweep::run(args, RunMode::Check), global),
        crate::Commands::Rules => emit(rules::run(), global),
    }
}

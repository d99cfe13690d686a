use clap::Parser;

use commands::rename::{self, RenameArgs};

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

mod commands;
mod output;
mod tty;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "csvrename")]
#[command(version = VERSION)]
#[command(about = "Rename or move files listed in a CSV file")]
struct Cli {
    #[command(flatten)]
    rename: RenameArgs,

    /// Print a JSON envelope with per-row outcomes instead of the summary line
    #[arg(long)]
    json: bool,
}

fn response_mode(cli: &Cli) -> ResponseMode {
    if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Text
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = response_mode(&cli);

    let result = rename::run(cli.rename);

    let exit_code = match mode {
        ResponseMode::Json => {
            let (json_result, exit_code) = output::map_cmd_result_to_json(result);
            match output::print_json_result(json_result) {
                Ok(()) => exit_code,
                Err(err) => {
                    output::print_error_text(&err);
                    output::exit_code_for_error(err.code)
                }
            }
        }
        ResponseMode::Text => {
            if let Ok((report, _)) = &result {
                output::print_row_notices(report);
            }
            output::print_text_result(result)
        }
    };

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

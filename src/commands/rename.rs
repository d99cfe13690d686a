use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

use csvrename::defaults::{self, Defaults};
use csvrename::policy::{self, Policy};
use csvrename::rows::{self, CsvOptions};
use csvrename::{executor, local_files, RunReport};

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// CSV file to read old & new names from ("-" reads stdin)
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: PathBuf,

    /// Folder to get files from. Default is the current dir
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<String>,

    /// Folder to put files into. Default is the input dir
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Source file name column (zero-based). Default is 0
    #[arg(short, long, value_name = "INDEX")]
    pub source_index: Option<usize>,

    /// Target file name column (zero-based). Default is 1
    #[arg(short, long, value_name = "INDEX")]
    pub target_index: Option<usize>,

    /// Overwrite existing destinations
    #[arg(short = 'f', long)]
    pub overwrite: bool,

    /// Rename directories too
    #[arg(short, long)]
    pub dirs: bool,

    /// Put target files into folders with the same name, minus the extension
    #[arg(short, long)]
    pub nest_into_dirs: bool,

    /// Field delimiter (single character, or "tab")
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Treat the first row as a header and skip it
    #[arg(long)]
    pub has_headers: bool,

    /// Count short rows as failures instead of aborting the run
    #[arg(long)]
    pub lenient: bool,

    /// Report what would happen without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: RenameArgs) -> CmdResult<RunReport> {
    if args.csv_file.as_os_str().is_empty() {
        return Err(csvrename::Error::validation_invalid_argument(
            "csv_file",
            "CSV file path cannot be empty",
        ));
    }

    let defaults = defaults::load_defaults()?;
    let (policy, options) = resolve_policy(&args, &defaults)?;

    // Index collision aborts before the input is even opened.
    policy.validate()?;

    crate::tty::status(&format!("csvrename: reading {}", args.csv_file.display()));

    let report = if args.csv_file == Path::new("-") {
        rename_from(std::io::stdin().lock(), &policy, &options)?
    } else {
        let reader = rows::open(&args.csv_file, &options)?;
        executor::execute(reader.into_records(), &policy, &local_files::local())?
    };

    Ok((report, 0))
}

/// Run rows read from an already-open stream, such as stdin.
fn rename_from<R: Read>(
    input: R,
    policy: &Policy,
    options: &CsvOptions,
) -> csvrename::Result<RunReport> {
    let reader = rows::from_reader(input, options);
    executor::execute(reader.into_records(), policy, &local_files::local())
}

/// Layer CLI flags over config-file defaults.
///
/// Value flags replace the default when given. Switches can only turn a
/// behavior on; `--lenient` is the one switch that turns `strictRows` off.
pub fn resolve_policy(
    args: &RenameArgs,
    defaults: &Defaults,
) -> csvrename::Result<(Policy, CsvOptions)> {
    let input_dir = args.input_dir.as_deref().or(defaults.input_dir.as_deref());
    let output_dir = args.output_dir.as_deref().or(defaults.output_dir.as_deref());

    let policy = Policy {
        source_index: args.source_index.unwrap_or(defaults.source_index),
        target_index: args.target_index.unwrap_or(defaults.target_index),
        include_directories: args.dirs || defaults.dirs,
        overwrite_existing: args.overwrite || defaults.overwrite,
        nest_into_target_dir: args.nest_into_dirs || defaults.nest_into_dirs,
        strict_rows: defaults.strict_rows && !args.lenient,
        dry_run: args.dry_run,
        ..Policy::with_dirs(input_dir, output_dir)
    };

    let delimiter = args.delimiter.as_deref().unwrap_or(&defaults.delimiter);
    let options = CsvOptions {
        delimiter: policy::parse_delimiter(delimiter)?,
        has_headers: args.has_headers || defaults.has_headers,
    };

    Ok((policy, options))
}

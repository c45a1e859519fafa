use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use resume_pdf::{ExportOptions, PageFormat};

/// Render a résumé document (JSON) to PDF.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input document (.json)
    input: PathBuf,

    /// Output file; defaults to the input path with a .pdf extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, env = "RESUME_PDF_PAGE_SIZE", default_value_t = PageFormat::Letter)]
    page_size: PageFormat,

    /// Month used to close open-ended date ranges (YYYY-MM-DD); defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Log progress; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let output = cli.output.unwrap_or_else(|| cli.input.with_extension("pdf"));
    let options = ExportOptions::new(cli.page_size, cli.today.unwrap_or_else(|| Utc::now().date_naive()));

    match resume_pdf::convert_json_to_pdf(&cli.input, &output, &options) {
        Ok(()) => {
            println!("Wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! erc-reformat CLI - ThreadReport to review workbook conversion

use clap::{Parser, Subcommand};
use erc_reformat::process_file;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "erc-reformat")]
#[command(
    author,
    version,
    about = "Reformat ERC ThreadReport exports into a comment review workbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a ThreadReport export into a review workbook
    Convert {
        /// ThreadReport export (xlsx, xls, xlsb, ods); only the first sheet is read
        input: PathBuf,

        /// Output workbook
        #[arg(short, long, default_value = "reformatted_comments.xlsx")]
        output: PathBuf,
    },

    /// Serve the upload endpoint over HTTP
    #[cfg(feature = "http")]
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => convert(&input, &output),
        #[cfg(feature = "http")]
        Commands::Serve { addr } => serve(&addr),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn convert(input: &Path, output: &Path) -> erc_reformat::Result<()> {
    let summary = process_file(input, output)?;

    print!(
        "Wrote {} comment(s) to {}",
        summary.comments_written,
        output.display()
    );
    if summary.records_skipped > 0 {
        print!(" ({} malformed block(s) skipped)", summary.records_skipped);
    }
    println!();
    Ok(())
}

#[cfg(feature = "http")]
fn serve(addr: &str) -> erc_reformat::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(erc_reformat::server::serve(addr))
}

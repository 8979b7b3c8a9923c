//! metaflac2mp3 command line
//!
//! `metaflac2mp3 <in.flac> <out.mp3>` copies tags without touching the audio.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use flac2mp3::{convert_metadata, logging};

#[derive(Parser, Debug)]
#[command(name = "metaflac2mp3", version, about = "Copy FLAC tags onto an MP3")]
struct Cli {
    /// Source FLAC filename and destination MP3 filename
    #[arg(value_name = "FILENAME")]
    files: Vec<PathBuf>,
}

/// Source and destination, or the usage failure when either is missing
fn file_pair(files: &[PathBuf]) -> Result<(&Path, &Path), ExitCode> {
    match files {
        [input, output, ..] => Ok((input.as_path(), output.as_path())),
        _ => {
            println!("{}", Cli::command().render_usage());
            println!("Two filenames are required: <in.flac> <out.mp3>");
            Err(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (input, output) = match file_pair(&cli.files) {
        Ok(pair) => pair,
        Err(code) => return code,
    };

    logging::init_logging(false);
    match convert_metadata(input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

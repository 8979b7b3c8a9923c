//! flac2mp3 command line
//!
//! `flac2mp3 <filename> [--delete|-d|--no-delete] [--silent|-s] [--encoding|-e <args>]`
//! `flac2mp3 --meta|-m <in.flac> <out.mp3>`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use flac2mp3::{config, convert_metadata, logging, ConversionOptions, Converter, Error};

#[derive(Parser, Debug)]
#[command(name = "flac2mp3", version, about = "Convert a FLAC file to MP3, keeping its tags")]
struct Cli {
    /// Delete the FLAC file after a successful conversion
    #[arg(short = 'd', long, overrides_with = "no_delete")]
    delete: bool,

    /// Keep the FLAC file (overrides the config file)
    #[arg(long = "no-delete", overrides_with = "delete")]
    no_delete: bool,

    /// Suppress output from flac and lame
    #[arg(short, long)]
    silent: bool,

    /// Arguments passed to lame, e.g. "--preset fast standard"
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true)]
    encoding: Option<String>,

    /// Only copy tags from <in> to <out>
    #[arg(short, long)]
    meta: bool,

    /// FLAC file to convert (or <in> <out> with --meta)
    #[arg(value_name = "FILENAME")]
    files: Vec<PathBuf>,
}

/// What a command line asks for once its filenames are checked
#[derive(Debug, PartialEq, Eq)]
enum Job<'a> {
    Convert(&'a Path),
    Meta(&'a Path, &'a Path),
}

impl Cli {
    /// Per-call options; flags not given stay unset so the config file applies
    fn options(&self) -> ConversionOptions {
        let delete = if self.delete {
            Some(true)
        } else if self.no_delete {
            Some(false)
        } else {
            None
        };

        ConversionOptions {
            delete,
            silent: self.silent.then_some(true),
            encoding: self.encoding.clone(),
        }
    }

    /// The requested job, or the usage failure when filenames are missing
    fn job(&self) -> Result<Job<'_>, ExitCode> {
        match (self.meta, self.files.as_slice()) {
            (true, [input, output, ..]) => Ok(Job::Meta(input.as_path(), output.as_path())),
            (false, [filename, ..]) => Ok(Job::Convert(filename.as_path())),
            _ => Err(usage()),
        }
    }
}

fn usage() -> ExitCode {
    let usage = Cli::command().render_usage();
    println!("{}", usage);
    println!("A filename is required (two filenames with --meta).");
    ExitCode::FAILURE
}

fn report(err: Error) -> ExitCode {
    log::error!("{}", err);
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let job = match cli.job() {
        Ok(job) => job,
        Err(code) => return code,
    };

    // The config decides how quiet the logger is, so it is read first
    let options = cli.options();
    let loaded = config::load_config();
    let silent = match &loaded {
        Ok(config) => options.silent.or(config.silent).unwrap_or(false),
        Err(_) => options.silent.unwrap_or(false),
    };
    logging::init_logging(silent);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => return report(e),
    };
    log::debug!("Config from {:?}: {:?}", config::config_path(), config);

    let result = match job {
        Job::Meta(input, output) => convert_metadata(input, output),
        Job::Convert(filename) => Converter::new(&config, &options)
            .convert(filename)
            .map(|out| log::info!("Wrote {}", out.display())),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

//! flac | lame subprocess pipeline
//!
//! The decoder writes raw audio to stdout, which is connected to the encoder's
//! stdin through an OS pipe. Both children are waited on; the decoder's status
//! is checked first.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::quote::safequote;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Quiet flag understood by both flac and lame
const SILENT_FLAG: &str = "--silent";

/// External programs used for decoding and encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub decoder: PathBuf,
    pub encoder: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            decoder: PathBuf::from("flac"),
            encoder: PathBuf::from("lame"),
        }
    }
}

/// One decode | encode run for a single file
#[derive(Debug, Clone)]
pub struct Pipeline {
    decoder: PathBuf,
    decoder_args: Vec<OsString>,
    encoder: PathBuf,
    encoder_args: Vec<OsString>,
    output_path: PathBuf,
    silent: bool,
}

impl Pipeline {
    /// Build the decode and encode invocations for `input_path` -> `output_path`
    ///
    /// decode: `flac [--silent] --stdout --decode <input>`
    /// encode: `lame [--silent] <encoding...> - <output>`
    pub fn new(tools: &Tools, settings: &Settings, input_path: &Path, output_path: &Path) -> Self {
        let mut decoder_args: Vec<OsString> = Vec::new();
        let mut encoder_args: Vec<OsString> = Vec::new();

        if settings.silent {
            decoder_args.push(SILENT_FLAG.into());
            encoder_args.push(SILENT_FLAG.into());
        }

        decoder_args.push("--stdout".into());
        decoder_args.push("--decode".into());
        decoder_args.push(input_path.as_os_str().to_owned());

        encoder_args.extend(settings.encoding_args().into_iter().map(OsString::from));
        encoder_args.push("-".into());
        encoder_args.push(output_path.as_os_str().to_owned());

        Self {
            decoder: tools.decoder.clone(),
            decoder_args,
            encoder: tools.encoder.clone(),
            encoder_args,
            output_path: output_path.to_path_buf(),
            silent: settings.silent,
        }
    }

    /// Shell equivalent of the pipeline, with operands safequoted
    pub fn command_line(&self) -> String {
        format!(
            "{} | {}",
            render_command(&self.decoder, &self.decoder_args),
            render_command(&self.encoder, &self.encoder_args)
        )
    }

    /// Run both processes to completion
    ///
    /// A partial output file is removed if either process fails.
    pub fn run(&self) -> Result<()> {
        log::info!("Running: {}", self.command_line());

        // Start the decoder with its stdout captured for the encoder
        let mut decode_cmd = Command::new(&self.decoder);
        decode_cmd.args(&self.decoder_args).stdin(Stdio::null()).stdout(Stdio::piped());
        if self.silent {
            decode_cmd.stderr(Stdio::null());
        }
        let mut decoder = spawn(&mut decode_cmd, &self.decoder)?;

        let Some(decoded) = decoder.stdout.take() else {
            let _ = decoder.kill();
            let _ = decoder.wait();
            return Err(Error::Io(std::io::Error::other("decoder stdout was not captured")));
        };

        // Feed the decoded audio straight into the encoder
        let mut encode_cmd = Command::new(&self.encoder);
        encode_cmd.args(&self.encoder_args).stdin(Stdio::from(decoded));
        if self.silent {
            encode_cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let mut encoder = match spawn(&mut encode_cmd, &self.encoder) {
            Ok(child) => child,
            Err(e) => {
                let _ = decoder.kill();
                let _ = decoder.wait();
                return Err(e);
            }
        };

        // Wait for both; the decoder's failure is reported first
        let decode_status = wait(&mut decoder, &self.decoder)?;
        let encode_status = wait(&mut encoder, &self.encoder)?;

        let failure = if !decode_status.success() {
            Some((program_name(&self.decoder), decode_status))
        } else if !encode_status.success() {
            Some((program_name(&self.encoder), encode_status))
        } else {
            None
        };

        if let Some((program, status)) = failure {
            // Clean up partial output
            let _ = std::fs::remove_file(&self.output_path);
            log::warn!("{} failed with status {}", program, status);
            return Err(Error::ToolFailed { program, status });
        }

        Ok(())
    }
}

fn spawn(cmd: &mut Command, program: &Path) -> Result<Child> {
    cmd.spawn().map_err(|source| Error::Spawn {
        program: program_name(program),
        source,
    })
}

fn wait(child: &mut Child, program: &Path) -> Result<std::process::ExitStatus> {
    let status = child.wait()?;
    log::debug!("{} exited with {}", program_name(program), status);
    Ok(status)
}

fn program_name(program: &Path) -> String {
    program.to_string_lossy().into_owned()
}

fn render_command(program: &Path, args: &[OsString]) -> String {
    let mut words = vec![program.to_string_lossy().into_owned()];
    // Option flags are rendered as-is, operands are escaped
    words.extend(args.iter().map(|arg| {
        let arg = arg.to_string_lossy();
        if arg.starts_with('-') { arg.into_owned() } else { safequote(&arg) }
    }));
    words.join(" ")
}

//! Audio conversion module
//!
//! Converts a FLAC file to MP3 with external `flac` and `lame` processes, then
//! carries the tags across.

mod pipeline;
mod quote;

pub use pipeline::{Pipeline, Tools};
pub use quote::safequote;

use std::path::{Path, PathBuf};

use crate::audio::{is_source_file, output_path, read_tags, write_tags};
use crate::config::{ConversionOptions, Settings};
use crate::error::{Error, Result};
use crate::tags::build_plan;

/// Single-file FLAC to MP3 converter
#[derive(Debug, Clone)]
pub struct Converter {
    settings: Settings,
    tools: Tools,
}

impl Converter {
    /// Create a converter from the loaded config and the per-call options
    pub fn new(config: &ConversionOptions, options: &ConversionOptions) -> Self {
        Self::from_settings(Settings::resolve(config, options))
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            tools: Tools::default(),
        }
    }

    /// Use different decoder/encoder programs
    pub fn with_tools(mut self, tools: Tools) -> Self {
        self.tools = tools;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn delete(&self) -> bool {
        self.settings.delete
    }

    pub fn silent(&self) -> bool {
        self.settings.silent
    }

    pub fn encoding(&self) -> &str {
        &self.settings.encoding
    }

    /// Convert `path` to MP3 next to the source and return the MP3 path
    ///
    /// The source is deleted afterwards only if `delete` is set and the tags
    /// were written.
    pub fn convert(&self, path: &Path) -> Result<PathBuf> {
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        if !is_source_file(path) {
            log::warn!("{} does not look like a FLAC file", path.display());
        }

        let out_path = output_path(path);
        log::info!("Converting: {} -> {}", path.display(), out_path.display());

        Pipeline::new(&self.tools, &self.settings, path, &out_path).run()?;
        convert_metadata(path, &out_path)?;

        if self.settings.delete {
            std::fs::remove_file(path)?;
            log::info!("Deleted {}", path.display());
        }

        Ok(out_path)
    }
}

/// Copy the tags of a FLAC file onto an existing MP3
pub fn convert_metadata(flac_path: &Path, mp3_path: &Path) -> Result<()> {
    let tags = read_tags(flac_path)?;
    let plan = build_plan(&tags);
    log::info!(
        "Mapping {} of {} tags: {} -> {}",
        plan.len(),
        tags.len(),
        flac_path.display(),
        mp3_path.display()
    );
    write_tags(mp3_path, &plan)
}

/// Convert `path` with the given config and options
pub fn convert(path: &Path, config: &ConversionOptions, options: &ConversionOptions) -> Result<PathBuf> {
    Converter::new(config, options).convert(path)
}

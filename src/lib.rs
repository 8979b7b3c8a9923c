//! flac2mp3 - convert FLAC files to MP3 and carry their tags across
//!
//! Audio is transcoded by piping the external `flac` decoder into the `lame`
//! encoder. Tags are read from the FLAC Vorbis comments, mapped onto ID3 fields
//! and frames by a static table, and written to the new MP3.

pub mod audio;
pub mod config;
pub mod conversion;
pub mod error;
pub mod logging;
pub mod tags;

#[cfg(test)]
mod test_fixtures;

pub use config::{load_config, ConversionOptions, Settings};
pub use conversion::{convert, convert_metadata, safequote, Converter, Tools};
pub use error::{Error, Result};

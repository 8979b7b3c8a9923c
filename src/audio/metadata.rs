//! Tag reading for FLAC sources
//!
//! Reads the Vorbis comments of a FLAC file with lofty and normalizes them into
//! a [`CanonicalTagMap`]: keys lower-cased, digit-only values turned into numbers
//! (except for keys that must stay text) and display text transliterated to Latin-1.

use std::fs::File;
use std::path::Path;

use lofty::flac::FlacFile;
use lofty::{AudioFile, ParseOptions};

use crate::error::{Error, Result};
use crate::tags::value::{TRANSLITERATED_KEYS, TagValue};
use crate::tags::{to_latin1, CanonicalTagMap};

/// A raw value as handed over by a tag reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTagValue {
    Text(String),
    Number(u64),
}

/// Read the tags of a FLAC file into a canonical map
pub fn read_tags(path: &Path) -> Result<CanonicalTagMap> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let mut file = File::open(path).map_err(|_| Error::NotFound(path.to_path_buf()))?;

    let flac = FlacFile::read_from(&mut file, ParseOptions::new().read_properties(false))
        .map_err(|e| Error::TagRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let Some(comments) = flac.vorbis_comments() else {
        log::debug!("No Vorbis comments in {}", path.display());
        return Ok(CanonicalTagMap::new());
    };

    let tags = canonicalize(
        comments
            .items()
            .map(|(key, value)| (key, RawTagValue::Text(value.to_string()))),
    );
    log::debug!("Read {} tags from {}", tags.len(), path.display());
    Ok(tags)
}

/// Normalize raw (key, value) pairs into a canonical tag map.
///
/// The first value wins when a key repeats.
pub fn canonicalize<'a, I>(entries: I) -> CanonicalTagMap
where
    I: IntoIterator<Item = (&'a str, RawTagValue)>,
{
    let mut tags = CanonicalTagMap::new();

    for (raw_key, raw_value) in entries {
        let key = raw_key.trim().to_lowercase();
        if key.is_empty() || tags.contains_key(&key) {
            continue;
        }

        let value = match raw_value {
            RawTagValue::Number(n) => TagValue::Number(n),
            RawTagValue::Text(text) => TagValue::from_raw_text(&key, &text),
        };

        let value = match value {
            TagValue::Text(text) if TRANSLITERATED_KEYS.contains(&key.as_str()) => {
                TagValue::Latin1(to_latin1(&text))
            }
            other => other,
        };

        tags.insert(key, value);
    }

    tags
}

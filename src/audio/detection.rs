use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension of the lossless source files
pub const SOURCE_EXTENSION: &str = ".flac";

/// Extension of the converted files
pub const DESTINATION_EXTENSION: &str = ".mp3";

/// Check if a path ends with the source extension
///
/// Matches the raw file name, so `track.FLAC` is not a source file.
pub fn is_source_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(SOURCE_EXTENSION))
        .unwrap_or(false)
}

/// Derive the MP3 path for a source file
///
/// A trailing `.flac` is replaced by `.mp3`; anything else gets `.mp3` appended.
pub fn output_path(source: &Path) -> PathBuf {
    let raw = source.as_os_str().to_string_lossy();
    let stem = raw.strip_suffix(SOURCE_EXTENSION).unwrap_or(&raw);

    let mut out = OsString::from(stem);
    out.push(DESTINATION_EXTENSION);
    PathBuf::from(out)
}

//! Test fixtures for tag and conversion tests
//!
//! Builds small files in memory instead of shelling out to real encoders:
//! a tagged FLAC stream with no audio frames, a headerless MP3 stand-in, and
//! (on unix) shell scripts that stand in for the `flac` and `lame` binaries.

#![cfg(test)]

use std::path::{Path, PathBuf};

/// Vendor string stored in generated Vorbis comment blocks
const VENDOR: &str = "flac2mp3 test fixtures";

const BLOCK_STREAMINFO: u8 = 0;
const BLOCK_VORBIS_COMMENT: u8 = 4;
const LAST_BLOCK: u8 = 0x80;

/// STREAMINFO for 44.1 kHz, 2 channels, 16 bits, unknown sample count
fn streaminfo() -> [u8; 34] {
    let mut info = [0u8; 34];
    // min/max block size
    info[0..2].copy_from_slice(&4096u16.to_be_bytes());
    info[2..4].copy_from_slice(&4096u16.to_be_bytes());
    // 20-bit sample rate, 3-bit channels - 1, 5-bit bits per sample - 1, 36-bit total samples
    let sample_rate: u64 = 44_100;
    let packed: u64 = (sample_rate << 44) | (1 << 41) | (15 << 36);
    info[10..18].copy_from_slice(&packed.to_be_bytes());
    info
}

fn block_header(kind: u8, last: bool, len: usize) -> [u8; 4] {
    let len = len as u32;
    [
        kind | if last { LAST_BLOCK } else { 0 },
        (len >> 16) as u8,
        (len >> 8) as u8,
        len as u8,
    ]
}

fn vorbis_comment(comments: &[(&str, &str)]) -> Vec<u8> {
    let mut block = Vec::new();
    block.extend_from_slice(&(VENDOR.len() as u32).to_le_bytes());
    block.extend_from_slice(VENDOR.as_bytes());
    block.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for (key, value) in comments {
        let entry = format!("{}={}", key, value);
        block.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        block.extend_from_slice(entry.as_bytes());
    }
    block
}

/// Bytes of a FLAC file carrying the given Vorbis comments and no audio
pub fn flac_bytes(comments: &[(&str, &str)]) -> Vec<u8> {
    let info = streaminfo();
    let tags = vorbis_comment(comments);

    let mut bytes = b"fLaC".to_vec();
    bytes.extend_from_slice(&block_header(BLOCK_STREAMINFO, false, info.len()));
    bytes.extend_from_slice(&info);
    bytes.extend_from_slice(&block_header(BLOCK_VORBIS_COMMENT, true, tags.len()));
    bytes.extend_from_slice(&tags);
    bytes
}

/// Write a tagged FLAC file to `path`
pub fn write_flac_file(path: &Path, comments: &[(&str, &str)]) {
    std::fs::write(path, flac_bytes(comments)).expect("Failed to write FLAC fixture");
}

/// Write an untagged MP3 stand-in (one frame header plus silence) into `dir`
pub fn write_empty_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = vec![0xFF, 0xFB, 0x90, 0x64];
    bytes.resize(417, 0);
    std::fs::write(&path, bytes).expect("Failed to write MP3 fixture");
    path
}

/// Write an executable shell script into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("Failed to chmod script");
    path
}

/// Stand-in decoder: logs its arguments next to itself, then copies the last one to stdout
#[cfg(unix)]
pub fn fake_decoder(dir: &Path) -> PathBuf {
    let log = dir.join("decoder.args");
    write_script(
        dir,
        "fake-flac",
        &format!(
            "echo \"$@\" > '{}'\nfor arg; do last=$arg; done\ncat \"$last\"",
            log.display()
        ),
    )
}

/// Stand-in encoder: logs its arguments, then writes stdin to the last one
#[cfg(unix)]
pub fn fake_encoder(dir: &Path) -> PathBuf {
    let log = dir.join("encoder.args");
    write_script(
        dir,
        "fake-lame",
        &format!(
            "echo \"$@\" > '{}'\nfor arg; do last=$arg; done\ncat > \"$last\"",
            log.display()
        ),
    )
}

/// Stand-in tool that always fails with `code`
#[cfg(unix)]
pub fn failing_tool(dir: &Path, name: &str, code: i32) -> PathBuf {
    write_script(dir, name, &format!("cat > /dev/null\nexit {}", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flac_bytes_layout() {
        let bytes = flac_bytes(&[("ARTIST", "blah")]);
        assert_eq!(&bytes[0..4], b"fLaC");
        assert_eq!(bytes[4], BLOCK_STREAMINFO);
        assert_eq!(bytes[4 + 4 + 34], LAST_BLOCK | BLOCK_VORBIS_COMMENT);
    }

    #[test]
    fn test_write_empty_mp3() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "x.mp3");
        assert!(path.exists(), "Generated file should exist");
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 417);
    }
}

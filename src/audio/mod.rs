// Audio module - source detection, tag reading from FLAC and tag writing to MP3

pub mod detection;
pub mod metadata;
pub mod metadata_writer;

pub use detection::{is_source_file, output_path};
pub use metadata::{read_tags, RawTagValue};
pub use metadata_writer::write_tags;

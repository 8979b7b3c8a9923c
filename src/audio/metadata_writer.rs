//! Metadata writing for converted MP3 files
//!
//! Applies a [`TagAssignmentPlan`] to the ID3v2 tag of an MP3 file. Every
//! destination is dispatched through [`apply_assignment`]. The whole plan is
//! applied to the in-memory tag and written to the file once.

use std::path::{Path, PathBuf};

use id3::frame::Comment;
use id3::{ErrorKind, Tag, TagLike, Version};

use crate::error::{Error, Result};
use crate::tags::{Destination, ExtendedFrame, PrimaryField, TagAssignmentPlan, TagValue};

/// ID3v2 version written to converted files
const ID3_VERSION: Version = Version::Id3v23;

/// Frame holding the year in ID3v2.3
const YEAR_FRAME: &str = "TYER";

/// Language code for the comment frame
const COMMENT_LANG: &str = "eng";

/// Open ID3 tag of an MP3 file, written back on [`Mp3TagFile::save`]
struct Mp3TagFile {
    path: PathBuf,
    tag: Tag,
}

impl Mp3TagFile {
    /// Load the existing tag, or start an empty one if the file has none
    fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        // Keep frames the encoder wrote, start fresh on untagged files
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error { kind: ErrorKind::NoTag, .. }) => Tag::new(),
            Err(e) => {
                return Err(Error::TagWrite {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        Ok(Self { path: path.to_path_buf(), tag })
    }

    fn save(self) -> Result<()> {
        self.tag
            .write_to_path(&self.path, ID3_VERSION)
            .map_err(|e| Error::TagWrite {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }
}

/// Write every assignment in `plan` to the MP3 at `path`
pub fn write_tags(path: &Path, plan: &TagAssignmentPlan) -> Result<()> {
    let mut file = Mp3TagFile::open(path)?;

    // Apply the whole plan in memory, then write once
    for (destination, value) in plan.iter() {
        apply_assignment(&mut file.tag, destination, value);
    }

    file.save()?;
    log::debug!("Wrote {} tags to {}", plan.len(), path.display());
    Ok(())
}

/// Set one destination field on the tag
fn apply_assignment(tag: &mut Tag, destination: Destination, value: &TagValue) {
    match destination {
        Destination::Primary(PrimaryField::Album) => tag.set_album(value.to_string()),
        Destination::Primary(PrimaryField::Artist) => tag.set_artist(value.to_string()),
        Destination::Primary(PrimaryField::Title) => tag.set_title(value.to_string()),
        Destination::Primary(PrimaryField::Genre) => tag.set_genre(value.to_string()),
        Destination::Primary(PrimaryField::Year) => set_year(tag, value),
        Destination::Primary(PrimaryField::Comments) => {
            // A single comment replaces whatever the encoder left behind
            let _ = tag.remove("COMM");
            let _ = tag.add_frame(Comment {
                lang: COMMENT_LANG.to_string(),
                description: String::new(),
                text: value.to_string(),
            });
        }
        Destination::Extended(frame) => set_text_frame(tag, frame, value),
    }
}

fn set_text_frame(tag: &mut Tag, frame: ExtendedFrame, value: &TagValue) {
    tag.set_text(frame.id(), value.to_string());
}

/// Year field from a date: its leading year, else the date text as given
fn set_year(tag: &mut Tag, value: &TagValue) {
    if let Some(year) = year_of(value) {
        tag.set_year(year);
        return;
    }

    let text = value.to_string();
    if text.trim().is_empty() {
        log::debug!("Skipping empty date");
        return;
    }
    log::debug!("Date '{}' has no leading year, writing it as text", text);
    tag.set_text(YEAR_FRAME, text);
}

/// Leading four-digit year of a date such as `1959`, `2004-05-12` or `20040512`
fn year_of(value: &TagValue) -> Option<i32> {
    let text = value.to_string();
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .take(4)
        .collect();

    if digits.len() == 4 { digits.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{build_plan, CanonicalTagMap, Latin1String};
    use crate::test_fixtures::write_empty_mp3;
    use tempfile::TempDir;

    fn plan_for(pairs: &[(&str, TagValue)]) -> TagAssignmentPlan {
        let tags: CanonicalTagMap = pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        build_plan(&tags)
    }

    fn text_frame<'a>(tag: &'a Tag, id: &str) -> Option<&'a str> {
        tag.get(id).and_then(|frame| frame.content().text())
    }

    #[test]
    fn test_write_primary_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        let plan = plan_for(&[
            ("album", TagValue::Text("Kind of Blue".into())),
            ("artist", TagValue::Latin1(Latin1String::from_bytes(b"Miles Davis".to_vec()))),
            ("title", TagValue::Text("So What".into())),
            ("date", TagValue::Number(1959)),
            ("genre", TagValue::Text("Jazz".into())),
            ("comment", TagValue::Text("remastered".into())),
        ]);
        write_tags(&path, &plan).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.album(), Some("Kind of Blue"));
        assert_eq!(tag.artist(), Some("Miles Davis"));
        assert_eq!(tag.title(), Some("So What"));
        assert_eq!(tag.year(), Some(1959));
        assert_eq!(tag.genre(), Some("Jazz"));
        let comments: Vec<_> = tag.comments().map(|c| c.text.as_str()).collect();
        assert_eq!(comments, vec!["remastered"]);
    }

    #[test]
    fn test_write_extended_frames() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        let plan = plan_for(&[
            ("bpm", TagValue::Number(136)),
            ("composer", TagValue::Text("Django Reinhardt".into())),
            ("compilation", TagValue::Number(1)),
            ("tag", TagValue::Text("Hot Club".into())),
            ("tracknumber", TagValue::Number(4)),
            ("tracktotal", TagValue::Number(15)),
            ("discnumber", TagValue::Number(1)),
            ("disctotal", TagValue::Number(2)),
        ]);
        write_tags(&path, &plan).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(text_frame(&tag, "TBPM"), Some("136"));
        assert_eq!(text_frame(&tag, "TCOM"), Some("Django Reinhardt"));
        assert_eq!(text_frame(&tag, "TCMP"), Some("1"));
        assert_eq!(text_frame(&tag, "TIT1"), Some("Hot Club"));
        assert_eq!(text_frame(&tag, "TRCK"), Some("4/15"));
        assert_eq!(text_frame(&tag, "TPOS"), Some("1/2"));
    }

    #[test]
    fn test_latin1_text_is_written_as_characters() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        let artist = TagValue::Latin1(Latin1String::from_bytes(b"St\xe9phane Grappelli".to_vec()));
        write_tags(&path, &plan_for(&[("artist", artist)])).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.artist(), Some("Stéphane Grappelli"));
    }

    #[test]
    fn test_existing_tag_is_updated() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        let mut existing = Tag::new();
        existing.set_album("Old Album");
        existing.set_text("TSSE", "LAME 3.100");
        existing.write_to_path(&path, Version::Id3v23).unwrap();

        write_tags(&path, &plan_for(&[("album", TagValue::Text("New Album".into()))])).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.album(), Some("New Album"));
        assert_eq!(text_frame(&tag, "TSSE"), Some("LAME 3.100"));
    }

    #[test]
    fn test_year_from_date_string() {
        assert_eq!(year_of(&TagValue::Text("2004-05-12".into())), Some(2004));
        assert_eq!(year_of(&TagValue::Number(1938)), Some(1938));
        assert_eq!(year_of(&TagValue::Number(20040512)), Some(2004));
        assert_eq!(year_of(&TagValue::Text("c. 1959".into())), None);
        assert_eq!(year_of(&TagValue::Number(59)), None);
    }

    #[test]
    fn test_compact_date_number_writes_its_year() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        write_tags(&path, &plan_for(&[("date", TagValue::Number(20040512))])).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.year(), Some(2004));
    }

    #[test]
    fn test_date_without_year_is_written_as_text() {
        for date in ["unknown", "c. 1959"] {
            let temp_dir = TempDir::new().unwrap();
            let path = write_empty_mp3(temp_dir.path(), "song.mp3");

            let plan = plan_for(&[
                ("artist", TagValue::Text("Miles Davis".into())),
                ("date", TagValue::Text(date.into())),
            ]);
            write_tags(&path, &plan).unwrap();

            let tag = Tag::read_from_path(&path).unwrap();
            assert_eq!(tag.artist(), Some("Miles Davis"), "{}", date);
            assert_eq!(text_frame(&tag, "TYER"), Some(date));
            assert_eq!(tag.year(), None, "{}", date);
        }
    }

    #[test]
    fn test_empty_date_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_empty_mp3(temp_dir.path(), "song.mp3");

        let plan = plan_for(&[
            ("artist", TagValue::Text("Miles Davis".into())),
            ("date", TagValue::Text(String::new())),
        ]);
        write_tags(&path, &plan).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.artist(), Some("Miles Davis"));
        assert!(tag.get("TYER").is_none());
    }

    #[test]
    fn test_write_tags_nonexistent_file() {
        let plan = plan_for(&[("album", TagValue::Text("Test".into()))]);
        let result = write_tags(Path::new("/nonexistent/file.mp3"), &plan);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}

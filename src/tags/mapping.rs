//! FLAC (Vorbis comment) to MP3 (ID3) tag mapping table
//!
//! One row per recognised canonical key. Keys without a row are ignored.

use super::value::CanonicalTagMap;
use Destination::{Extended, Primary};

/// Which part of the destination tag a field lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagGroup {
    /// Basic fields every MP3 tag reader understands
    Primary,
    /// ID3v2 frames addressed by their four-character id
    Extended,
}

/// Basic destination fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimaryField {
    Album,
    Artist,
    Title,
    Year,
    Genre,
    Comments,
}

impl PrimaryField {
    pub fn name(self) -> &'static str {
        match self {
            PrimaryField::Album => "album",
            PrimaryField::Artist => "artist",
            PrimaryField::Title => "title",
            PrimaryField::Year => "year",
            PrimaryField::Genre => "genre",
            PrimaryField::Comments => "comments",
        }
    }
}

/// ID3v2 text frames written by the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtendedFrame {
    /// Beats per minute
    Tbpm,
    /// Composer
    Tcom,
    /// iTunes compilation flag
    Tcmp,
    /// Content group (grouping)
    Tit1,
    /// Track position, "N/M"
    Trck,
    /// Disc position, "N/M"
    Tpos,
}

impl ExtendedFrame {
    pub fn id(self) -> &'static str {
        match self {
            ExtendedFrame::Tbpm => "TBPM",
            ExtendedFrame::Tcom => "TCOM",
            ExtendedFrame::Tcmp => "TCMP",
            ExtendedFrame::Tit1 => "TIT1",
            ExtendedFrame::Trck => "TRCK",
            ExtendedFrame::Tpos => "TPOS",
        }
    }
}

/// A destination field, tagged with its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    Primary(PrimaryField),
    Extended(ExtendedFrame),
}

impl Destination {
    pub fn group(self) -> TagGroup {
        match self {
            Destination::Primary(_) => TagGroup::Primary,
            Destination::Extended(_) => TagGroup::Extended,
        }
    }

    /// Field name (primary) or frame id (extended)
    pub fn identifier(self) -> &'static str {
        match self {
            Destination::Primary(field) => field.name(),
            Destination::Extended(frame) => frame.id(),
        }
    }
}

/// Value template with `{key}` placeholders naming canonical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template(&'static str);

pub const TRACK_POSITION: Template = Template("{tracknumber}/{tracktotal}");
pub const DISC_POSITION: Template = Template("{discnumber}/{disctotal}");

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    fn segments(&self) -> Vec<Segment<'static>> {
        let mut segments = Vec::new();
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(Segment::Literal(&rest[..open]));
            }
            segments.push(Segment::Placeholder(&rest[open + 1..open + close]));
            rest = &rest[open + close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        segments
    }

    /// Substitute every placeholder with its value from `tags`.
    ///
    /// Returns `None` when the first placeholder is absent. Missing later
    /// placeholders render empty, and the literal text that only joined them
    /// to the rendered part is dropped.
    pub fn render(&self, tags: &CanonicalTagMap) -> Option<String> {
        let mut out = String::new();
        let mut pending = String::new();
        let mut seen_placeholder = false;

        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => pending.push_str(text),
                Segment::Placeholder(key) => match tags.get(key) {
                    Some(value) => {
                        out.push_str(&pending);
                        pending.clear();
                        out.push_str(&value.to_string());
                        seen_placeholder = true;
                    }
                    None if !seen_placeholder => {
                        log::debug!("No {} for {}, skipping", key, self.0);
                        return None;
                    }
                    None => {
                        log::debug!("No {} for {}, writing without it", key, self.0);
                        pending.clear();
                    }
                },
            }
        }
        if seen_placeholder {
            out.push_str(&pending);
        }
        Some(out)
    }
}

/// One row of the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMappingRule {
    pub source: &'static str,
    pub destination: Destination,
    pub template: Option<Template>,
}

const fn rule(source: &'static str, destination: Destination) -> TagMappingRule {
    TagMappingRule { source, destination, template: None }
}

const fn templated(source: &'static str, destination: Destination, template: Template) -> TagMappingRule {
    TagMappingRule { source, destination, template: Some(template) }
}

/// The complete mapping table
pub const TAG_MAPPING: &[TagMappingRule] = &[
    rule("album", Primary(PrimaryField::Album)),
    rule("artist", Primary(PrimaryField::Artist)),
    rule("bpm", Extended(ExtendedFrame::Tbpm)),
    rule("comment", Primary(PrimaryField::Comments)),
    rule("compilation", Extended(ExtendedFrame::Tcmp)),
    rule("composer", Extended(ExtendedFrame::Tcom)),
    rule("date", Primary(PrimaryField::Year)),
    rule("description", Primary(PrimaryField::Comments)),
    templated("discnumber", Extended(ExtendedFrame::Tpos), DISC_POSITION),
    templated("disctotal", Extended(ExtendedFrame::Tpos), DISC_POSITION),
    rule("genre", Primary(PrimaryField::Genre)),
    rule("tag", Extended(ExtendedFrame::Tit1)),
    rule("title", Primary(PrimaryField::Title)),
    templated("tracknumber", Extended(ExtendedFrame::Trck), TRACK_POSITION),
    templated("tracktotal", Extended(ExtendedFrame::Trck), TRACK_POSITION),
];

/// Look up the mapping row for a canonical key
pub fn rule_for(key: &str) -> Option<&'static TagMappingRule> {
    TAG_MAPPING.iter().find(|r| r.source == key)
}

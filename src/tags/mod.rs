// Tags module - canonical tag values, the FLAC -> MP3 mapping table and the transform engine

pub mod mapping;
pub mod transform;
pub mod transliterate;
pub mod value;

pub use mapping::{Destination, ExtendedFrame, PrimaryField, TagGroup, TagMappingRule, TAG_MAPPING};
pub use transform::{build_plan, TagAssignmentPlan};
pub use transliterate::to_latin1;
pub use value::{CanonicalTagMap, Latin1String, TagValue};

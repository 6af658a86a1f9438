//! Line classification by two-character tag.

use crate::core::types::RecordKind;

/// Marker that starts every metadata line
pub const RECORD_START: char = '@';

/// Classify a newline-stripped line.
///
/// A line is metadata only when it starts with `@` followed by one of `HD`,
/// `SQ`, `RG`, `PG` or `CO`. Anything else is an alignment line, including
/// unknown `@XX` codes. A query name that itself begins with one of those five
/// prefixes is indistinguishable from metadata and is classified as such.
#[must_use]
pub fn classify(line: &str) -> RecordKind {
    let Some(rest) = line.strip_prefix(RECORD_START) else {
        return RecordKind::Alignment;
    };

    match rest.get(..2) {
        Some("HD") => RecordKind::Header,
        Some("SQ") => RecordKind::RefSeqDict,
        Some("RG") => RecordKind::ReadGroup,
        Some("PG") => RecordKind::Program,
        Some("CO") => RecordKind::Comment,
        _ => RecordKind::Alignment,
    }
}

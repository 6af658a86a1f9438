use serde::{Deserialize, Serialize};

/// The record types a SAM text file is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Header,
    RefSeqDict,
    ReadGroup,
    Program,
    Comment,
    Alignment,
}

impl RecordKind {
    /// Two-character tag following `@` on metadata lines
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Header => Some("HD"),
            Self::RefSeqDict => Some("SQ"),
            Self::ReadGroup => Some("RG"),
            Self::Program => Some("PG"),
            Self::Comment => Some("CO"),
            Self::Alignment => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "@{tag}"),
            None => write!(f, "alignment"),
        }
    }
}

/// Sequencing platform named by the PL tag of an `@RG` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Capillary,
    Ls454,
    Illumina,
    Solid,
    Helicos,
    #[serde(rename = "IONTORRENT")]
    IonTorrent,
    #[serde(rename = "PACBIO")]
    PacBio,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Self::Capillary,
        Self::Ls454,
        Self::Illumina,
        Self::Solid,
        Self::Helicos,
        Self::IonTorrent,
        Self::PacBio,
    ];

    /// Parse a platform name. Matching is exact: `illumina` is not a platform.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capillary => "CAPILLARY",
            Self::Ls454 => "LS454",
            Self::Illumina => "ILLUMINA",
            Self::Solid => "SOLID",
            Self::Helicos => "HELICOS",
            Self::IonTorrent => "IONTORRENT",
            Self::PacBio => "PACBIO",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric fields whose text could not be read as an integer.
///
/// The decoder leaves the typed field at zero and records the raw text here
/// under the field's tag, so the validator can report it in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnparsedNumbers(Vec<(&'static str, String)>);

impl UnparsedNumbers {
    /// Record the text of a field, replacing any earlier value for it
    pub fn insert(&mut self, field: &'static str, value: impl Into<String>) {
        self.remove(field);
        self.0.push((field, value.into()));
    }

    /// Forget a field, e.g. when a later tag of the same name parsed cleanly
    pub fn remove(&mut self, field: &'static str) {
        self.0.retain(|(name, _)| *name != field);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_display() {
        assert_eq!(RecordKind::Header.to_string(), "@HD");
        assert_eq!(RecordKind::RefSeqDict.to_string(), "@SQ");
        assert_eq!(RecordKind::Comment.to_string(), "@CO");
        assert_eq!(RecordKind::Alignment.to_string(), "alignment");
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("ILLUMINA"), Some(Platform::Illumina));
        assert_eq!(Platform::parse("IONTORRENT"), Some(Platform::IonTorrent));
        assert_eq!(Platform::parse("PACBIO"), Some(Platform::PacBio));
        assert_eq!(Platform::parse("illumina"), None);
        assert_eq!(Platform::parse("ONT"), None);
        assert_eq!(Platform::parse(""), None);
    }

    #[test]
    fn test_unparsed_numbers_keep_last_value_per_field() {
        let mut unparsed = UnparsedNumbers::default();
        assert!(unparsed.is_empty());

        unparsed.insert("LN", "abc");
        unparsed.insert("LN", "def");
        unparsed.insert("POS", "x");
        assert_eq!(unparsed.get("LN"), Some("def"));
        assert_eq!(unparsed.get("POS"), Some("x"));
        assert_eq!(unparsed.get("FLAG"), None);

        unparsed.remove("LN");
        assert_eq!(unparsed.get("LN"), None);
        assert!(!unparsed.is_empty());
    }

    #[test]
    fn test_platform_display_matches_parse() {
        for platform in Platform::ALL {
            assert_eq!(Platform::parse(&platform.to_string()), Some(platform));
            assert_eq!(
                serde_json::to_value(platform).unwrap(),
                serde_json::Value::String(platform.to_string())
            );
        }
    }
}

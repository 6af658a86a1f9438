use serde::{Deserialize, Serialize};

use crate::core::types::UnparsedNumbers;

/// A reference sequence from an `@SQ` line.
///
/// The order of `@SQ` lines in a file defines the reference ordering used to
/// interpret alignment coordinates, so these are always kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSeqDict {
    /// Sequence name (SN tag), unique within a file
    pub name: String,

    /// Sequence length (LN tag), 1 to 2^29 - 1
    pub length: u64,

    /// Assembly identifier (AS tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_id: Option<String>,

    /// MD5 checksum of the sequence (M5 tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    /// Species (SP tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// URI where the sequence can be retrieved (UR tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// LN text that was not an unsigned integer
    #[serde(skip)]
    pub unparsed: UnparsedNumbers,
}

impl RefSeqDict {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }
}

use serde::{Deserialize, Serialize};

use crate::core::types::UnparsedNumbers;

/// Number of mandatory tab-separated columns on an alignment line
pub const MANDATORY_FIELDS: usize = 11;

/// One alignment line.
///
/// Numeric columns are held in wide integer types so that out-of-range values
/// survive decoding and are reported by the validator with their actual value.
/// Columns that are not integers at all are held in `unparsed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// Query template name (QNAME)
    pub qname: String,

    /// Bitwise flag (FLAG)
    pub flag: u64,

    /// Reference sequence name (RNAME), `*` when unmapped
    pub ref_name: String,

    /// 1-based leftmost mapping position (POS), 0 when unavailable
    pub pos: u64,

    /// Mapping quality (MAPQ)
    pub mapq: u64,

    /// CIGAR string, `*` when unavailable
    pub cigar: String,

    /// Reference name of the mate/next read (RNEXT)
    pub next_ref: String,

    /// Position of the mate/next read (PNEXT)
    pub next_pos: u64,

    /// Observed template length (TLEN)
    pub template_len: i64,

    /// Segment sequence (SEQ)
    pub seq: String,

    /// Phred+33 base qualities (QUAL)
    pub qual: String,

    /// Columns after the eleventh, kept verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional_fields: Vec<String>,

    /// Numeric columns (FLAG, POS, MAPQ, PNEXT, TLEN) that were not integers
    #[serde(skip)]
    pub unparsed: UnparsedNumbers,
}

impl Alignment {
    /// True when the unmapped bit (0x4) is set
    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        self.flag & 0x4 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unmapped() {
        let mut aln = Alignment {
            flag: 4,
            ..Alignment::default()
        };
        assert!(aln.is_unmapped());
        aln.flag = 99;
        assert!(!aln.is_unmapped());
    }
}

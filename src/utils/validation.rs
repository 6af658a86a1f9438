//! Field grammars and per-record validators.
//!
//! Every validator checks its rules in a fixed order and stops at the first
//! violation. Patterns are anchored at both ends and compiled once.

use regex::Regex;
use std::sync::OnceLock;

use crate::core::alignment::Alignment;
use crate::core::contig::RefSeqDict;
use crate::core::header::HeaderLine;
use crate::core::program::Program;
use crate::core::read_group::ReadGroup;
use crate::core::types::{Platform, UnparsedNumbers};

/// Largest coordinate or reference length: 2^29 - 1
pub const MAX_POSITION: u64 = (1 << 29) - 1;

/// Largest valid FLAG value: 2^16 - 1
pub const MAX_FLAG: u64 = 0xFFFF;

/// Largest valid MAPQ value
pub const MAX_MAPQ: u64 = 0xFF;

/// Largest absolute TLEN value
#[allow(clippy::cast_possible_wrap)] // 2^29 - 1 fits in i64
pub const MAX_TEMPLATE_LEN: i64 = MAX_POSITION as i64;

const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+$";
const REFERENCE_NAME_PATTERN: &str = r"^[!-)+-<>-~][!-~]*$";
const FLOW_ORDER_PATTERN: &str = r"^(\*|[ACMGRSVTWYHKDBN]+)$";
const QNAME_PATTERN: &str = r"^[!-?A-~]{1,254}$";
const RNAME_PATTERN: &str = r"^(\*|[!-)+-<>-~][!-~]*)$";
const CIGAR_PATTERN: &str = r"^(\*|([0-9]+[MIDNSHPX=])+)$";
const RNEXT_PATTERN: &str = r"^(\*|=|[!-)+-<>-~][!-~]*)$";
const SEQ_PATTERN: &str = r"^(\*|[A-Za-z=.]+)$";
const QUAL_PATTERN: &str = r"^[!-~]+$";

/// A single violated field rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("missing required VN (version) tag")]
    MissingVersion,
    #[error("VN '{0}' is not of the form <major>.<minor>")]
    InvalidVersion(String),

    #[error("missing required SN (sequence name) tag")]
    MissingReferenceName,
    #[error("SN '{0}' is not a valid reference sequence name")]
    InvalidReferenceName(String),
    #[error("LN {0} is outside [1, {MAX_POSITION}]")]
    ReferenceLengthOutOfRange(u64),

    #[error("missing required ID (read group identifier) tag")]
    MissingReadGroupId,
    #[error("FO '{0}' is not '*' or a string of IUPAC codes")]
    InvalidFlowOrder(String),
    #[error("PL '{0}' is not a known platform (CAPILLARY, LS454, ILLUMINA, SOLID, HELICOS, IONTORRENT, PACBIO)")]
    InvalidPlatform(String),

    #[error("missing required ID (program identifier) tag")]
    MissingProgramId,

    #[error("{field} '{value}' is not an integer")]
    NotAnInteger { field: &'static str, value: String },

    #[error("QNAME '{0}' is not 1-254 printable characters excluding '@'")]
    InvalidQname(String),
    #[error("FLAG {0} is outside [0, {MAX_FLAG}]")]
    FlagOutOfRange(u64),
    #[error("RNAME '{0}' is not '*' or a valid reference sequence name")]
    InvalidRefName(String),
    #[error("{field} {value} is outside [0, {MAX_POSITION}]")]
    PositionOutOfRange { field: &'static str, value: u64 },
    #[error("MAPQ {0} is outside [0, {MAX_MAPQ}]")]
    MapqOutOfRange(u64),
    #[error("CIGAR '{0}' is not '*' or a sequence of <length><operation>")]
    InvalidCigar(String),
    #[error("RNEXT '{0}' is not '*', '=' or a valid reference sequence name")]
    InvalidNextRef(String),
    #[error("TLEN {0} is outside [-{MAX_TEMPLATE_LEN}, {MAX_TEMPLATE_LEN}]")]
    TemplateLengthOutOfRange(i64),
    #[error("SEQ '{0}' is not '*' or a string of bases")]
    InvalidSequence(String),
    #[error("QUAL '{0}' is not a string of printable Phred+33 characters")]
    InvalidQuality(String),
}

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("field patterns are valid regexes"))
}

macro_rules! grammar {
    ($name:ident, $source:expr) => {
        fn $name() -> &'static Regex {
            static CELL: OnceLock<Regex> = OnceLock::new();
            pattern(&CELL, $source)
        }
    };
}

grammar!(version_re, VERSION_PATTERN);
grammar!(reference_name_re, REFERENCE_NAME_PATTERN);
grammar!(flow_order_re, FLOW_ORDER_PATTERN);
grammar!(qname_re, QNAME_PATTERN);
grammar!(rname_re, RNAME_PATTERN);
grammar!(cigar_re, CIGAR_PATTERN);
grammar!(rnext_re, RNEXT_PATTERN);
grammar!(seq_re, SEQ_PATTERN);
grammar!(qual_re, QUAL_PATTERN);

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use samgate::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Check that a string is a legal `@SQ` SN / RNAME reference name
#[must_use]
pub fn is_valid_reference_name(s: &str) -> bool {
    reference_name_re().is_match(s)
}

/// Validate an `@HD` line
///
/// # Errors
///
/// Returns `GrammarError::MissingVersion` or `GrammarError::InvalidVersion`.
pub fn validate_header(header: &HeaderLine) -> Result<(), GrammarError> {
    if header.version.is_empty() {
        return Err(GrammarError::MissingVersion);
    }
    if !version_re().is_match(&header.version) {
        return Err(GrammarError::InvalidVersion(header.version.clone()));
    }
    Ok(())
}

/// Validate an `@SQ` line
///
/// # Errors
///
/// Returns the first violated rule among the name and the length.
pub fn validate_ref_seq_dict(sq: &RefSeqDict) -> Result<(), GrammarError> {
    if sq.name.is_empty() {
        return Err(GrammarError::MissingReferenceName);
    }
    if !is_valid_reference_name(&sq.name) {
        return Err(GrammarError::InvalidReferenceName(sq.name.clone()));
    }
    check_integer(&sq.unparsed, "LN")?;
    if !(1..=MAX_POSITION).contains(&sq.length) {
        return Err(GrammarError::ReferenceLengthOutOfRange(sq.length));
    }
    Ok(())
}

/// Validate an `@RG` line. Empty FO and PL values count as absent.
///
/// # Errors
///
/// Returns the first violated rule among the id, flow order and platform.
pub fn validate_read_group(rg: &ReadGroup) -> Result<(), GrammarError> {
    if rg.id.is_empty() {
        return Err(GrammarError::MissingReadGroupId);
    }
    if let Some(flow_order) = rg.flow_order.as_deref().filter(|s| !s.is_empty()) {
        if !flow_order_re().is_match(flow_order) {
            return Err(GrammarError::InvalidFlowOrder(flow_order.to_string()));
        }
    }
    if let Some(platform) = rg.platform.as_deref().filter(|s| !s.is_empty()) {
        if Platform::parse(platform).is_none() {
            return Err(GrammarError::InvalidPlatform(platform.to_string()));
        }
    }
    Ok(())
}

/// Validate a `@PG` line
///
/// # Errors
///
/// Returns `GrammarError::MissingProgramId` if the ID tag is absent or empty.
pub fn validate_program(pg: &Program) -> Result<(), GrammarError> {
    if pg.id.is_empty() {
        return Err(GrammarError::MissingProgramId);
    }
    Ok(())
}

/// Validate an alignment line, field by field in column order
///
/// # Errors
///
/// Returns the rule violated by the leftmost bad column. A numeric column that
/// is not an integer is reported as `GrammarError::NotAnInteger` at its position.
pub fn validate_alignment(aln: &Alignment) -> Result<(), GrammarError> {
    let unparsed = &aln.unparsed;
    if !qname_re().is_match(&aln.qname) {
        return Err(GrammarError::InvalidQname(aln.qname.clone()));
    }
    check_integer(unparsed, "FLAG")?;
    if aln.flag > MAX_FLAG {
        return Err(GrammarError::FlagOutOfRange(aln.flag));
    }
    if !rname_re().is_match(&aln.ref_name) {
        return Err(GrammarError::InvalidRefName(aln.ref_name.clone()));
    }
    check_integer(unparsed, "POS")?;
    check_position("POS", aln.pos)?;
    check_integer(unparsed, "MAPQ")?;
    if aln.mapq > MAX_MAPQ {
        return Err(GrammarError::MapqOutOfRange(aln.mapq));
    }
    if !cigar_re().is_match(&aln.cigar) {
        return Err(GrammarError::InvalidCigar(aln.cigar.clone()));
    }
    if !rnext_re().is_match(&aln.next_ref) {
        return Err(GrammarError::InvalidNextRef(aln.next_ref.clone()));
    }
    check_integer(unparsed, "PNEXT")?;
    check_position("PNEXT", aln.next_pos)?;
    check_integer(unparsed, "TLEN")?;
    if !(-MAX_TEMPLATE_LEN..=MAX_TEMPLATE_LEN).contains(&aln.template_len) {
        return Err(GrammarError::TemplateLengthOutOfRange(aln.template_len));
    }
    if !seq_re().is_match(&aln.seq) {
        return Err(GrammarError::InvalidSequence(aln.seq.clone()));
    }
    if !qual_re().is_match(&aln.qual) {
        return Err(GrammarError::InvalidQuality(aln.qual.clone()));
    }
    Ok(())
}

fn check_integer(unparsed: &UnparsedNumbers, field: &'static str) -> Result<(), GrammarError> {
    match unparsed.get(field) {
        Some(value) => Err(GrammarError::NotAnInteger {
            field,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_position(field: &'static str, value: u64) -> Result<(), GrammarError> {
    if value > MAX_POSITION {
        return Err(GrammarError::PositionOutOfRange { field, value });
    }
    Ok(())
}

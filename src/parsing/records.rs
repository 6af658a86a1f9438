//! Decoding of single lines into typed records.
//!
//! Metadata lines are `@XX` followed by tab-separated `KEY:VALUE` fields. Each
//! field is split on its first colon and the key dispatched per record type.
//! Unknown keys and fields without a colon are ignored so that vendor
//! extension tags pass through.
//!
//! Alignment lines are positional: the first eleven columns are mandatory and
//! anything after them is kept verbatim.

use std::num::IntErrorKind;

use thiserror::Error;

use crate::core::alignment::{Alignment, MANDATORY_FIELDS};
use crate::core::contig::RefSeqDict;
use crate::core::header::HeaderLine;
use crate::core::program::Program;
use crate::core::read_group::ReadGroup;
use crate::core::types::UnparsedNumbers;

/// Failure to turn a line into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected at least {expected} tab-separated fields, found {found}")]
    TooFewFields { found: usize, expected: usize },
}

/// `KEY:VALUE` pairs after the leading tag column
fn tag_values(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.split('\t')
        .skip(1)
        .filter_map(|field| field.split_once(':'))
}

/// Read an unsigned column. Digit strings too large for `u64` saturate so the
/// validator reports them as out of range; anything else goes to `unparsed`.
fn parse_unsigned(field: &'static str, value: &str, unparsed: &mut UnparsedNumbers) -> u64 {
    match value.parse::<u64>() {
        Ok(n) => {
            unparsed.remove(field);
            n
        }
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => {
            unparsed.remove(field);
            u64::MAX
        }
        Err(_) => {
            unparsed.insert(field, value);
            0
        }
    }
}

/// Signed counterpart of [`parse_unsigned`], saturating in both directions
fn parse_signed(field: &'static str, value: &str, unparsed: &mut UnparsedNumbers) -> i64 {
    let parsed = match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    };
    if let Some(n) = parsed {
        unparsed.remove(field);
        n
    } else {
        unparsed.insert(field, value);
        0
    }
}

/// Decode an `@HD` line
#[must_use]
pub fn parse_header(line: &str) -> HeaderLine {
    let mut header = HeaderLine::default();
    for (key, value) in tag_values(line) {
        match key {
            "VN" => header.version = value.to_string(),
            "SO" => header.sort_order = Some(value.to_string()),
            _ => {}
        }
    }
    header
}

/// Decode an `@SQ` line. A non-integer LN is kept in `unparsed`.
#[must_use]
pub fn parse_ref_seq_dict(line: &str) -> RefSeqDict {
    let mut sq = RefSeqDict::default();
    for (key, value) in tag_values(line) {
        match key {
            "SN" => sq.name = value.to_string(),
            "LN" => sq.length = parse_unsigned("LN", value, &mut sq.unparsed),
            "AS" => sq.assembly_id = Some(value.to_string()),
            "M5" => sq.md5 = Some(value.to_string()),
            "SP" => sq.species = Some(value.to_string()),
            "UR" => sq.uri = Some(value.to_string()),
            _ => {}
        }
    }
    sq
}

/// Decode an `@RG` line
#[must_use]
pub fn parse_read_group(line: &str) -> ReadGroup {
    let mut rg = ReadGroup::default();
    for (key, value) in tag_values(line) {
        let value = value.to_string();
        match key {
            "ID" => rg.id = value,
            "CN" => rg.sequencing_center = Some(value),
            "DS" => rg.description = Some(value),
            "DT" => rg.date = Some(value),
            "FO" => rg.flow_order = Some(value),
            "KS" => rg.key_sequence = Some(value),
            "LB" => rg.library = Some(value),
            "PG" => rg.programs = Some(value),
            "PI" => rg.predicted_insert_size = Some(value),
            "PL" => rg.platform = Some(value),
            "PU" => rg.platform_unit = Some(value),
            "SM" => rg.sample = Some(value),
            _ => {}
        }
    }
    rg
}

/// Decode a `@PG` line
#[must_use]
pub fn parse_program(line: &str) -> Program {
    let mut pg = Program::default();
    for (key, value) in tag_values(line) {
        let value = value.to_string();
        match key {
            "ID" => pg.id = value,
            "PN" => pg.name = Some(value),
            "CL" => pg.command_line = Some(value),
            "PP" => pg.previous_id = Some(value),
            "VN" => pg.version = Some(value),
            "DS" => pg.description = Some(value),
            _ => {}
        }
    }
    pg
}

/// Decode an alignment line
///
/// # Errors
///
/// Returns `DecodeError::TooFewFields` if the line has fewer than eleven
/// columns. Numeric columns that are not integers are kept in `unparsed`
/// for the validator.
pub fn parse_alignment(line: &str) -> Result<Alignment, DecodeError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MANDATORY_FIELDS {
        return Err(DecodeError::TooFewFields {
            found: fields.len(),
            expected: MANDATORY_FIELDS,
        });
    }

    let mut unparsed = UnparsedNumbers::default();
    Ok(Alignment {
        qname: fields[0].to_string(),
        flag: parse_unsigned("FLAG", fields[1], &mut unparsed),
        ref_name: fields[2].to_string(),
        pos: parse_unsigned("POS", fields[3], &mut unparsed),
        mapq: parse_unsigned("MAPQ", fields[4], &mut unparsed),
        cigar: fields[5].to_string(),
        next_ref: fields[6].to_string(),
        next_pos: parse_unsigned("PNEXT", fields[7], &mut unparsed),
        template_len: parse_signed("TLEN", fields[8], &mut unparsed),
        seq: fields[9].to_string(),
        qual: fields[10].to_string(),
        optional_fields: fields[MANDATORY_FIELDS..]
            .iter()
            .map(|f| (*f).to_string())
            .collect(),
        unparsed,
    })
}

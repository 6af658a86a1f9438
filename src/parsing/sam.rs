//! Line-by-line scan of SAM text into [`SamContents`], stopping at the first bad line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::contents::SamContents;
use crate::core::types::RecordKind;
use crate::parsing::classify::classify;
use crate::parsing::records::{self, DecodeError};
use crate::parsing::uniqueness::IdentifierRegistry;
use crate::utils::validation::{
    is_valid_md5, validate_alignment, validate_header, validate_program, validate_read_group,
    validate_ref_seq_dict, GrammarError,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: invalid {kind} record: {source}")]
    GrammarViolation {
        kind: RecordKind,
        line: usize,
        #[source]
        source: GrammarError,
    },

    #[error("line {line}: duplicate {kind} identifier '{id}'")]
    DuplicateIdentifier {
        kind: RecordKind,
        line: usize,
        id: String,
    },

    #[error("line {line}: second @HD line (the header was already given on line {first})")]
    DuplicateHeader { line: usize, first: usize },

    #[error(
        "line {line}: malformed {kind} line: expected at least {expected} tab-separated fields, found {found}"
    )]
    MalformedLine {
        kind: RecordKind,
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("IO error: {0}")]
    SourceUnavailable(#[from] io::Error),
}

impl ParseError {
    /// Record type of the offending line, if the error came from a line
    #[must_use]
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Self::GrammarViolation { kind, .. }
            | Self::DuplicateIdentifier { kind, .. }
            | Self::MalformedLine { kind, .. } => Some(*kind),
            Self::DuplicateHeader { .. } => Some(RecordKind::Header),
            Self::SourceUnavailable(_) => None,
        }
    }

    /// 1-based number of the offending line, if the error came from a line
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::GrammarViolation { line, .. }
            | Self::DuplicateIdentifier { line, .. }
            | Self::MalformedLine { line, .. }
            | Self::DuplicateHeader { line, .. } => Some(*line),
            Self::SourceUnavailable(_) => None,
        }
    }

    fn from_decode(kind: RecordKind, line: usize, err: DecodeError) -> Self {
        match err {
            DecodeError::TooFewFields { found, expected } => Self::MalformedLine {
                kind,
                line,
                found,
                expected,
            },
        }
    }
}

/// Result of scanning a file.
///
/// `contents` is always populated with every record accepted before the scan
/// stopped. `error` is `None` only when the whole input was consumed.
#[derive(Debug)]
pub struct ParseOutcome {
    pub contents: SamContents,
    pub error: Option<ParseError>,
    /// Lines consumed, including the failing one
    pub lines_read: usize,
    /// `@CO` lines seen (never stored)
    pub comments: usize,
}

impl ParseOutcome {
    fn unavailable(err: io::Error) -> Self {
        Self {
            contents: SamContents::default(),
            error: Some(ParseError::SourceUnavailable(err)),
            lines_read: 0,
            comments: 0,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drop partial results on failure
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the scan, if any.
    pub fn into_result(self) -> Result<SamContents, ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.contents),
        }
    }
}

/// State of one in-progress scan
#[derive(Default)]
struct Scan {
    contents: SamContents,
    registry: IdentifierRegistry,
    /// Line the header was read from
    header_line: Option<usize>,
    comments: usize,
}

impl Scan {
    fn claim(&mut self, kind: RecordKind, id: &str, line: usize) -> Result<(), ParseError> {
        if self.registry.register(kind, id) {
            Ok(())
        } else {
            Err(ParseError::DuplicateIdentifier {
                kind,
                line,
                id: id.to_string(),
            })
        }
    }

    /// Classify, decode, validate, dedupe and store one line
    fn accept(&mut self, text: &str, line: usize) -> Result<(), ParseError> {
        let kind = classify(text);
        let grammar =
            move |source: GrammarError| ParseError::GrammarViolation { kind, line, source };

        match kind {
            RecordKind::Header => {
                let header = records::parse_header(text);
                validate_header(&header).map_err(grammar)?;
                if let Some(first) = self.header_line {
                    return Err(ParseError::DuplicateHeader { line, first });
                }
                self.header_line = Some(line);
                self.contents.header = Some(header);
            }
            RecordKind::RefSeqDict => {
                let sq = records::parse_ref_seq_dict(text);
                validate_ref_seq_dict(&sq).map_err(grammar)?;
                self.claim(kind, &sq.name, line)?;
                if let Some(md5) = sq.md5.as_deref().filter(|m| !is_valid_md5(m)) {
                    warn!(
                        line,
                        contig = %sq.name,
                        md5 = %md5,
                        "M5 is not a 32-character hex checksum"
                    );
                }
                self.contents.reference_sequences.push(sq);
            }
            RecordKind::ReadGroup => {
                let rg = records::parse_read_group(text);
                validate_read_group(&rg).map_err(grammar)?;
                self.claim(kind, &rg.id, line)?;
                self.contents.read_groups.push(rg);
            }
            RecordKind::Program => {
                let pg = records::parse_program(text);
                validate_program(&pg).map_err(grammar)?;
                self.claim(kind, &pg.id, line)?;
                self.contents.programs.push(pg);
            }
            RecordKind::Comment => self.comments += 1,
            RecordKind::Alignment => {
                let aln = records::parse_alignment(text)
                    .map_err(|err| ParseError::from_decode(kind, line, err))?;
                validate_alignment(&aln).map_err(grammar)?;
                self.contents.alignments.push(aln);
            }
        }

        Ok(())
    }
}

/// Scan a sequence of newline-stripped lines.
///
/// Stops at the first read error, malformed line, grammar violation or
/// duplicate identifier. Records accepted before that line are returned in
/// the outcome; the failing record is not.
pub fn parse_lines<I>(lines: I) -> ParseOutcome
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut scan = Scan::default();
    let mut error = None;
    let mut lines_read = 0;

    for line in lines {
        lines_read += 1;
        let result = line
            .map_err(ParseError::SourceUnavailable)
            .and_then(|text| scan.accept(&text, lines_read));

        if let Err(err) = result {
            debug!(line = lines_read, error = %err, "Scan aborted");
            error = Some(err);
            break;
        }
    }

    let contents = scan.contents;
    debug!(
        lines = lines_read,
        header = contents.header.is_some(),
        reference_sequences = contents.reference_sequences.len(),
        read_groups = contents.read_groups.len(),
        programs = contents.programs.len(),
        alignments = contents.alignments.len(),
        comments = scan.comments,
        "Scan finished"
    );

    ParseOutcome {
        contents,
        error,
        lines_read,
        comments: scan.comments,
    }
}

/// Scan SAM text already held in memory
#[must_use]
pub fn parse_text(text: &str) -> ParseOutcome {
    parse_lines(text.lines().map(|line| Ok(line.to_string())))
}

/// Scan SAM text from a buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> ParseOutcome {
    parse_lines(reader.lines())
}

/// Scan a SAM text file. Files ending in `.gz` are decompressed on the fly.
///
/// A file that cannot be opened yields an outcome with empty contents and a
/// `ParseError::SourceUnavailable` error.
#[must_use]
pub fn parse_path(path: &Path) -> ParseOutcome {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return ParseOutcome::unavailable(err),
    };

    let is_gzip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if is_gzip {
        parse_reader(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        parse_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGNMENT: &str = "read1\t0\tchr1\t100\t60\t4M\t*\t0\t0\tACGT\tIIII";

    #[test]
    fn test_parse_text_end_to_end() {
        let text = format!("@HD\tVN:1.0\tSO:coordinate\n@SQ\tSN:chr1\tLN:248956422\n{ALIGNMENT}\n");
        let outcome = parse_text(&text);

        assert!(outcome.is_ok());
        assert_eq!(outcome.lines_read, 3);
        let contents = outcome.into_result().unwrap();
        let header = contents.header.unwrap();
        assert_eq!(header.version, "1.0");
        assert_eq!(header.sort_order.as_deref(), Some("coordinate"));
        assert_eq!(contents.reference_sequences.len(), 1);
        assert_eq!(contents.reference_sequences[0].name, "chr1");
        assert_eq!(contents.reference_sequences[0].length, 248_956_422);
        assert!(contents.read_groups.is_empty());
        assert!(contents.programs.is_empty());
        assert_eq!(contents.alignments.len(), 1);
        assert_eq!(contents.alignments[0].ref_name, "chr1");
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse_text("");
        assert!(outcome.is_ok());
        assert!(outcome.contents.is_empty());
        assert_eq!(outcome.lines_read, 0);
    }

    #[test]
    fn test_comments_are_not_stored() {
        let outcome = parse_text("@HD\tVN:1.6\n@CO\tanything goes here\n@CO\n");
        assert!(outcome.is_ok());
        assert_eq!(outcome.comments, 2);
        assert_eq!(outcome.contents.record_count(), 1);
    }

    #[test]
    fn test_invalid_header_is_not_stored() {
        let outcome = parse_text("@HD\tVN:1x0\n@SQ\tSN:chr1\tLN:10\n");
        assert!(outcome.contents.header.is_none());
        assert!(outcome.contents.reference_sequences.is_empty());
        assert_eq!(outcome.lines_read, 1);
        assert!(matches!(
            outcome.error,
            Some(ParseError::GrammarViolation {
                kind: RecordKind::Header,
                line: 1,
                source: GrammarError::InvalidVersion(_),
            })
        ));
    }

    #[test]
    fn test_second_header_is_rejected() {
        let outcome = parse_text("@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:10\n@HD\tVN:1.5\n");
        assert_eq!(outcome.contents.header.as_ref().map(|h| h.version.as_str()), Some("1.6"));
        assert_eq!(outcome.contents.reference_sequences.len(), 1);
        let err = outcome.error.unwrap();
        assert!(matches!(err, ParseError::DuplicateHeader { line: 3, first: 1 }));
        assert_eq!(err.kind(), Some(RecordKind::Header));
        assert_eq!(err.line(), Some(3));
        assert_eq!(
            err.to_string(),
            "line 3: second @HD line (the header was already given on line 1)"
        );
    }

    #[test]
    fn test_second_header_grammar_checked_first() {
        let outcome = parse_text("@HD\tVN:1.6\n@HD\tVN:x\n");
        assert!(matches!(
            outcome.error,
            Some(ParseError::GrammarViolation {
                kind: RecordKind::Header,
                line: 2,
                source: GrammarError::InvalidVersion(_),
            })
        ));
    }

    #[test]
    fn test_sq_length_out_of_range() {
        let outcome = parse_text("@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:0\n");
        assert!(outcome.contents.reference_sequences.is_empty());
        assert!(outcome.contents.header.is_some());
        let err = outcome.error.unwrap();
        assert_eq!(err.kind(), Some(RecordKind::RefSeqDict));
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.to_string(),
            "line 2: invalid @SQ record: LN 0 is outside [1, 536870911]"
        );
    }

    #[test]
    fn test_duplicate_sq_keeps_first() {
        let outcome = parse_text("@SQ\tSN:chr1\tLN:100\n@SQ\tSN:chr1\tLN:200\n");
        assert_eq!(outcome.contents.reference_sequences.len(), 1);
        assert_eq!(outcome.contents.reference_sequences[0].length, 100);
        let err = outcome.error.unwrap();
        assert_eq!(err.to_string(), "line 2: duplicate @SQ identifier 'chr1'");
    }

    #[test]
    fn test_malformed_duplicate_reports_grammar() {
        let outcome = parse_text("@SQ\tSN:chr1\tLN:100\n@SQ\tSN:chr1\tLN:0\n");
        assert!(matches!(
            outcome.error,
            Some(ParseError::GrammarViolation { .. })
        ));
    }

    #[test]
    fn test_sq_name_reported_before_non_integer_length() {
        let outcome = parse_text("@SQ\tSN:*bad\tLN:abc\n");
        assert!(matches!(
            outcome.error,
            Some(ParseError::GrammarViolation {
                kind: RecordKind::RefSeqDict,
                line: 1,
                source: GrammarError::InvalidReferenceName(_),
            })
        ));

        let err = parse_text("@SQ\tSN:chr1\tLN:abc\n").error.unwrap();
        assert_eq!(err.to_string(), "line 1: invalid @SQ record: LN 'abc' is not an integer");
    }

    #[test]
    fn test_alignment_qname_reported_before_non_integer_flag() {
        let outcome = parse_text("@bad\tx\tchr1\t1\t60\t4M\t*\t0\t0\tACGT\tIIII\n");
        assert!(matches!(
            outcome.error,
            Some(ParseError::GrammarViolation {
                kind: RecordKind::Alignment,
                source: GrammarError::InvalidQname(_),
                ..
            })
        ));

        let err = parse_text("read1\tx\tchr1\t1\t60\t4M\t*\t0\t0\tACGT\tIIII\n")
            .error
            .unwrap();
        assert_eq!(
            err.to_string(),
            "line 1: invalid alignment record: FLAG 'x' is not an integer"
        );
    }

    #[test]
    fn test_oversized_integers_are_out_of_range() {
        let err = parse_text("read1\t99999999999999999999\tchr1\t1\t60\t4M\t*\t0\t0\tACGT\tIIII\n")
            .error
            .unwrap();
        assert!(matches!(
            err,
            ParseError::GrammarViolation {
                source: GrammarError::FlagOutOfRange(u64::MAX),
                ..
            }
        ));

        let err = parse_text("@SQ\tSN:chr1\tLN:99999999999999999999\n").error.unwrap();
        assert!(matches!(
            err,
            ParseError::GrammarViolation {
                source: GrammarError::ReferenceLengthOutOfRange(u64::MAX),
                ..
            }
        ));
    }

    #[test]
    fn test_short_alignment_is_malformed() {
        let outcome = parse_text("@HD\tVN:1.6\nread1\t0\tchr1\t1\t60\n");
        let err = outcome.error.unwrap();
        assert!(matches!(
            err,
            ParseError::MalformedLine {
                kind: RecordKind::Alignment,
                line: 2,
                found: 5,
                expected: 11,
            }
        ));
    }

    #[test]
    fn test_stops_at_first_error() {
        let text = format!("{ALIGNMENT}\nbad\n{ALIGNMENT}\n");
        let outcome = parse_text(&text);
        assert_eq!(outcome.lines_read, 2);
        assert_eq!(outcome.contents.alignments.len(), 1);
        assert!(outcome.error.is_some());
    }

    #[test]
    fn test_read_error_is_source_unavailable() {
        let lines = vec![
            Ok("@HD\tVN:1.6".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")),
            Ok("@SQ\tSN:chr1\tLN:10".to_string()),
        ];
        let outcome = parse_lines(lines);
        assert!(outcome.contents.header.is_some());
        assert!(outcome.contents.reference_sequences.is_empty());
        let err = outcome.error.unwrap();
        assert!(matches!(err, ParseError::SourceUnavailable(_)));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_parse_reader_handles_crlf() {
        let data = b"@HD\tVN:1.6\r\n@SQ\tSN:chr1\tLN:10\r\n";
        let outcome = parse_reader(&data[..]);
        assert!(outcome.is_ok());
        assert_eq!(outcome.contents.header.unwrap().version, "1.6");
        assert_eq!(outcome.contents.reference_sequences[0].length, 10);
    }

    #[test]
    fn test_parse_path_missing_file() {
        let outcome = parse_path(Path::new("/nonexistent/dir/input.sam"));
        assert!(outcome.contents.is_empty());
        assert!(matches!(
            outcome.error,
            Some(ParseError::SourceUnavailable(_))
        ));
    }
}

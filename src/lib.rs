//! # samgate
//!
//! A syntactic gate for SAM text alignment files.
//!
//! `samgate` reads the header lines (`@HD`, `@SQ`, `@RG`, `@PG`, `@CO`) and
//! alignment lines of a SAM file, decodes each into a typed record, checks it
//! against the field grammar of its type, and rejects repeated reference
//! names, read group ids and program ids. The scan stops at the first bad
//! line and reports it with its line number, while still handing back every
//! record accepted before it.
//!
//! It does not interpret alignments: CIGAR/sequence consistency, flag
//! coherence and sort order are out of scope.
//!
//! ## Example
//!
//! ```rust
//! use samgate::parse_text;
//!
//! let text = "@HD\tVN:1.0\tSO:coordinate\n\
//!             @SQ\tSN:chr1\tLN:248956422\n\
//!             read1\t0\tchr1\t100\t60\t4M\t*\t0\t0\tACGT\tIIII\n";
//!
//! let contents = parse_text(text).into_result().unwrap();
//! assert_eq!(contents.header.unwrap().version, "1.0");
//! assert_eq!(contents.reference_sequences[0].length, 248_956_422);
//! assert_eq!(contents.alignments.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Record types
//! - [`parsing`]: Line classification, record decoding and the scan driver
//! - [`utils`]: Field grammars and validators
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::alignment::Alignment;
pub use crate::core::contents::SamContents;
pub use crate::core::contig::RefSeqDict;
pub use crate::core::header::HeaderLine;
pub use crate::core::program::Program;
pub use crate::core::read_group::ReadGroup;
pub use crate::core::types::*;
pub use crate::parsing::sam::{parse_lines, parse_path, parse_reader, parse_text, ParseError, ParseOutcome};

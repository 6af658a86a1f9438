//! Scanning of SAM text files into validated records.
//!
//! Each line goes through the same steps:
//!
//! 1. [`classify`](classify::classify) picks the record type from the `@XX` tag
//! 2. [`records`] decodes the line into a typed record
//! 3. [`crate::utils::validation`] checks the record's field grammar
//! 4. [`uniqueness`] rejects repeated `@SQ` names, `@RG` ids and `@PG` ids
//! 5. the record is appended to its collection in [`crate::core::contents::SamContents`]
//!
//! The first failure stops the scan. Everything accepted before it is still
//! returned in the [`ParseOutcome`](sam::ParseOutcome).
//!
//! ## Example
//!
//! ```rust
//! use samgate::parsing::sam::parse_text;
//!
//! let text = "@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:248956422\n@SQ\tSN:chr1\tLN:10\n";
//! let outcome = parse_text(text);
//!
//! assert_eq!(outcome.contents.reference_sequences.len(), 1);
//! assert!(outcome.error.is_some());
//! ```

pub mod classify;
pub mod records;
pub mod sam;
pub mod uniqueness;

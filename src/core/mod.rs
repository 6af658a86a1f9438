//! Record types for SAM text files.
//!
//! - [`HeaderLine`](header::HeaderLine): the `@HD` line
//! - [`RefSeqDict`](contig::RefSeqDict): one `@SQ` reference sequence
//! - [`ReadGroup`](read_group::ReadGroup): one `@RG` read group
//! - [`Program`](program::Program): one `@PG` program record
//! - [`Alignment`](alignment::Alignment): one alignment line
//! - [`SamContents`](contents::SamContents): everything accumulated from a file
//! - [`RecordKind`](types::RecordKind), [`Platform`](types::Platform): shared enums
//!
//! ## Tags
//!
//! | Line | Tag | Field | Required |
//! |------|-----|-------|----------|
//! | @HD  | VN  | version | Yes |
//! | @HD  | SO  | sort order | No |
//! | @SQ  | SN  | name | Yes |
//! | @SQ  | LN  | length | Yes |
//! | @SQ  | AS, M5, SP, UR | assembly, MD5, species, URI | No |
//! | @RG  | ID  | identifier | Yes |
//! | @RG  | CN, DS, DT, FO, KS, LB, PG, PI, PL, PU, SM | descriptive | No |
//! | @PG  | ID  | identifier | Yes |
//! | @PG  | PN, CL, PP, VN, DS | descriptive | No |

pub mod alignment;
pub mod contents;
pub mod contig;
pub mod header;
pub mod program;
pub mod read_group;
pub mod types;

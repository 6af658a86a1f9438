use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::alignment::Alignment;
use crate::core::contig::RefSeqDict;
use crate::core::header::HeaderLine;
use crate::core::program::Program;
use crate::core::read_group::ReadGroup;

/// Everything accumulated from one scan of a SAM text file.
///
/// After a failed scan this holds exactly the records that were accepted
/// before the failing line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamContents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderLine>,

    /// `@SQ` records in file order
    pub reference_sequences: Vec<RefSeqDict>,

    /// `@RG` records in file order
    pub read_groups: Vec<ReadGroup>,

    /// `@PG` records in file order
    pub programs: Vec<Program>,

    /// Alignment records in file order
    pub alignments: Vec<Alignment>,
}

impl SamContents {
    /// Total number of stored records, header included
    #[must_use]
    pub fn record_count(&self) -> usize {
        usize::from(self.header.is_some())
            + self.reference_sequences.len()
            + self.read_groups.len()
            + self.programs.len()
            + self.alignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Look up a reference sequence by its SN name
    #[must_use]
    pub fn reference_sequence(&self, name: &str) -> Option<&RefSeqDict> {
        self.reference_sequences.iter().find(|sq| sq.name == name)
    }

    /// `@PG` records whose PP tag names a program id that is not present.
    ///
    /// Advisory only: the scan itself never rejects a dangling PP.
    #[must_use]
    pub fn dangling_program_links(&self) -> Vec<&Program> {
        let ids: HashSet<&str> = self.programs.iter().map(|p| p.id.as_str()).collect();
        self.programs
            .iter()
            .filter(|p| {
                p.previous_id
                    .as_deref()
                    .is_some_and(|pp| !ids.contains(pp))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count() {
        let mut contents = SamContents::default();
        assert!(contents.is_empty());

        contents.header = Some(HeaderLine::new("1.6"));
        contents.reference_sequences.push(RefSeqDict::new("chr1", 100));
        contents.programs.push(Program::new("bwa"));
        assert_eq!(contents.record_count(), 3);
        assert!(!contents.is_empty());
    }

    #[test]
    fn test_reference_sequence_lookup() {
        let contents = SamContents {
            reference_sequences: vec![RefSeqDict::new("chr1", 100), RefSeqDict::new("chr2", 200)],
            ..SamContents::default()
        };
        assert_eq!(contents.reference_sequence("chr2").map(|sq| sq.length), Some(200));
        assert!(contents.reference_sequence("chrX").is_none());
    }

    #[test]
    fn test_dangling_program_links() {
        let contents = SamContents {
            programs: vec![
                Program::new("bwa"),
                Program::new("samtools").with_previous("bwa"),
                Program::new("picard").with_previous("gatk"),
            ],
            ..SamContents::default()
        };

        let dangling = contents.dangling_program_links();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id, "picard");
    }

    #[test]
    fn test_no_dangling_links_without_pp() {
        let contents = SamContents {
            programs: vec![Program::new("bwa"), Program::new("samtools")],
            ..SamContents::default()
        };
        assert!(contents.dangling_program_links().is_empty());
    }
}

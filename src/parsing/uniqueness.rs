//! Per-type identifier bookkeeping for a single scan.

use std::collections::HashSet;

use crate::core::types::RecordKind;

/// Identifiers seen so far for the record types that must be unique:
/// `@SQ` names, `@RG` ids and `@PG` ids.
///
/// A registry belongs to exactly one scan and is dropped with it.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    sequence_names: HashSet<String>,
    read_group_ids: HashSet<String>,
    program_ids: HashSet<String>,
}

impl IdentifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: RecordKind) -> Option<&HashSet<String>> {
        match kind {
            RecordKind::RefSeqDict => Some(&self.sequence_names),
            RecordKind::ReadGroup => Some(&self.read_group_ids),
            RecordKind::Program => Some(&self.program_ids),
            _ => None,
        }
    }

    fn set_mut(&mut self, kind: RecordKind) -> Option<&mut HashSet<String>> {
        match kind {
            RecordKind::RefSeqDict => Some(&mut self.sequence_names),
            RecordKind::ReadGroup => Some(&mut self.read_group_ids),
            RecordKind::Program => Some(&mut self.program_ids),
            _ => None,
        }
    }

    /// Record `id` for `kind`. Returns `false` if it was already present.
    ///
    /// Kinds without a uniqueness constraint always return `true` and are not
    /// tracked.
    pub fn register(&mut self, kind: RecordKind, id: &str) -> bool {
        match self.set_mut(kind) {
            Some(seen) => {
                if seen.contains(id) {
                    false
                } else {
                    seen.insert(id.to_string());
                    true
                }
            }
            None => true,
        }
    }

    #[must_use]
    pub fn contains(&self, kind: RecordKind, id: &str) -> bool {
        self.set(kind).is_some_and(|seen| seen.contains(id))
    }

    /// Number of identifiers tracked for `kind`
    #[must_use]
    pub fn len(&self, kind: RecordKind) -> usize {
        self.set(kind).map_or(0, HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_flags_duplicates() {
        let mut registry = IdentifierRegistry::new();
        assert!(registry.register(RecordKind::RefSeqDict, "chr1"));
        assert!(registry.register(RecordKind::RefSeqDict, "chr2"));
        assert!(!registry.register(RecordKind::RefSeqDict, "chr1"));
        assert_eq!(registry.len(RecordKind::RefSeqDict), 2);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut registry = IdentifierRegistry::new();
        assert!(registry.register(RecordKind::ReadGroup, "x"));
        assert!(registry.register(RecordKind::Program, "x"));
        assert!(registry.register(RecordKind::RefSeqDict, "x"));
        assert!(!registry.register(RecordKind::Program, "x"));
        assert!(registry.contains(RecordKind::ReadGroup, "x"));
        assert!(!registry.contains(RecordKind::ReadGroup, "y"));
    }

    #[test]
    fn test_unconstrained_kinds_are_not_tracked() {
        let mut registry = IdentifierRegistry::new();
        assert!(registry.register(RecordKind::Alignment, "read1"));
        assert!(registry.register(RecordKind::Alignment, "read1"));
        assert!(!registry.contains(RecordKind::Alignment, "read1"));
        assert_eq!(registry.len(RecordKind::Alignment), 0);
    }
}

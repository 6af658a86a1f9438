use serde::{Deserialize, Serialize};

/// A program record from a `@PG` line.
///
/// `previous_id` points at the `id` of the program that ran before this one,
/// forming a provenance chain. The chain is not checked while scanning; see
/// [`crate::core::contents::SamContents::dangling_program_links`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Program record identifier (ID tag), unique within a file
    pub id: String,

    /// Program name (PN tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Command line (CL tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,

    /// Previous program in the chain (PP tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_id: Option<String>,

    /// Program version (VN tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Description (DS tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Program {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_previous(mut self, previous_id: impl Into<String>) -> Self {
        self.previous_id = Some(previous_id.into());
        self
    }
}

use serde::{Deserialize, Serialize};

/// A read group from an `@RG` line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadGroup {
    /// Read group identifier (ID tag), unique within a file
    pub id: String,

    /// Sequencing center (CN tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencing_center: Option<String>,

    /// Description (DS tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Run date (DT tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Flow order (FO tag): `*` or a string of IUPAC nucleotide codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_order: Option<String>,

    /// Key sequence (KS tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_sequence: Option<String>,

    /// Library (LB tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Programs used for processing (PG tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programs: Option<String>,

    /// Predicted median insert size (PI tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_insert_size: Option<String>,

    /// Sequencing platform (PL tag). Checked against [`crate::core::types::Platform`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Platform unit (PU tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_unit: Option<String>,

    /// Sample (SM tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

impl ReadGroup {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

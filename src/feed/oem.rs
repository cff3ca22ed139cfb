use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::feed::FeedError;
use crate::trajectory::StateVector;

/// A parsed CCSDS Orbit Ephemeris Message (XML flavour, single segment).
///
/// Serializes under the document's `ndm` root element, so the JSON view
/// mirrors the XML tree.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Dataset {
    pub ndm: Ndm,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ndm {
    pub oem: Oem,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Oem {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub header: Header,
    pub body: Body,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Header {
    #[serde(rename = "COMMENT", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(rename = "CREATION_DATE", default)]
    pub creation_date: Option<String>,
    #[serde(rename = "ORIGINATOR", default)]
    pub originator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Body {
    pub segment: Segment,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Segment {
    #[serde(default)]
    pub metadata: Metadata,
    pub data: SegmentData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    #[serde(rename = "COMMENT", default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(rename = "OBJECT_NAME", default)]
    pub object_name: Option<String>,
    #[serde(rename = "OBJECT_ID", default)]
    pub object_id: Option<String>,
    #[serde(rename = "CENTER_NAME", default)]
    pub center_name: Option<String>,
    #[serde(rename = "REF_FRAME", default)]
    pub ref_frame: Option<String>,
    #[serde(rename = "REF_FRAME_EPOCH", default, skip_serializing_if = "Option::is_none")]
    pub ref_frame_epoch: Option<String>,
    #[serde(rename = "TIME_SYSTEM", default)]
    pub time_system: Option<String>,
    #[serde(rename = "START_TIME", default)]
    pub start_time: Option<String>,
    #[serde(rename = "USEABLE_START_TIME", default, skip_serializing_if = "Option::is_none")]
    pub useable_start_time: Option<String>,
    #[serde(rename = "USEABLE_STOP_TIME", default, skip_serializing_if = "Option::is_none")]
    pub useable_stop_time: Option<String>,
    #[serde(rename = "STOP_TIME", default)]
    pub stop_time: Option<String>,
    #[serde(rename = "INTERPOLATION", default, skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<String>,
    // Kept as text like every other metadata value.
    #[serde(
        rename = "INTERPOLATION_DEGREE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub interpolation_degree: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SegmentData {
    #[serde(rename = "COMMENT", default)]
    pub comments: Vec<String>,
    #[serde(rename = "stateVector", default)]
    pub state_vectors: Vec<StateVector>,
}

impl Dataset {
    pub fn from_xml(xml: &str) -> Result<Self, FeedError> {
        let ndm: Ndm = quick_xml::de::from_str(xml)?;
        Ok(Dataset { ndm })
    }

    /// State vectors in feed order.
    pub fn trajectory(&self) -> &[StateVector] {
        &self.ndm.oem.body.segment.data.state_vectors
    }

    pub fn comments(&self) -> &[String] {
        &self.ndm.oem.body.segment.data.comments
    }

    pub fn header(&self) -> &Header {
        &self.ndm.oem.header
    }

    pub fn metadata(&self) -> &Metadata {
        &self.ndm.oem.body.segment.metadata
    }

    /// Epoch labels that occur more than once, in order of their repeat.
    pub fn duplicate_epochs(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.trajectory()
            .iter()
            .filter(|sv| !seen.insert(sv.epoch.as_str()))
            .map(|sv| sv.epoch.as_str())
            .collect()
    }
}

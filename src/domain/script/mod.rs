//! Screenplay scenes and the splitter that produces them.

mod splitter;

use serde::{Deserialize, Serialize};

use crate::domain::cues::CueSet;

pub use splitter::{heading, split, split_bytes};

/// Interior/exterior marker from a scene heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Interior,
    Exterior,
    InteriorExterior,
}

/// One narrative unit of a script, immutable once split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in document order.
    pub number: u32,
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<Setting>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<String>,
    #[serde(default)]
    pub visual_cues: CueSet,
}

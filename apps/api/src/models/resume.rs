//! Resume and keyword contract types.
//!
//! Only the fields the matching engine reads or writes are typed. Everything
//! else rides along in the flattened `extra` / `sections` maps so that a
//! round trip through the engine hands those values back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Skill classification attached to an extracted keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Hard,
    Soft,
    #[default]
    None,
}

/// A job-description keyword as produced by the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    /// Importance weight in 0.0 – 1.0.
    pub level: f64,
    #[serde(default)]
    pub skill: Skill,
}

/// One candidate phrasing of an item.
///
/// `content` stays in `extra` as whatever JSON the caller sent; only the
/// scorer lowers it to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variation {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("content".to_string(), Value::String(content.into()));
        Self {
            id: id.into(),
            enabled: false,
            extra,
        }
    }

    /// Text used for matching. Missing, `null` or non-string content reads as "".
    pub fn content(&self) -> &str {
        self.extra
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// A resume content slot holding interchangeable variations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub variations: Vec<Variation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An employment entry. Position in `ResumeContent::experiences` drives truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full resume aggregate.
///
/// `sections` holds skills, titles, summaries, educations, projects and any
/// other top-level section verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub experiences: Vec<Experience>,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

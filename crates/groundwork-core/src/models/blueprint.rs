//! Lenient blueprint input model.
//!
//! A blueprint arrives from an LLM (or a user-supplied JSON file) and is
//! treated as advisory: any field may be missing, empty, or of the wrong
//! type. Decoding therefore never fails on shape — scalars are coerced to
//! strings where a string is expected, wrong-typed sequences collapse to
//! empty, and unknown fields are ignored. The extraction layer supplies the
//! per-field defaults.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Raw step entry as declared by a blueprint phase.
///
/// All fields optional; empty strings count as absent (matching the
/// falsy-chaining the historical consumers relied on).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawStep {
    /// Numeric id, used only for declared-phase membership matching
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub area: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub why_it_matters: Option<String>,
    /// Alternate spelling of `why_it_matters` some blueprints use
    #[serde(deserialize_with = "lenient_text")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "lenient_text_seq")]
    pub files_to_edit: Vec<String>,
    #[serde(deserialize_with = "lenient_text_seq")]
    pub micro_step_instructions: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub replit_prompt: Option<String>,
    #[serde(deserialize_with = "lenient_text_seq")]
    pub validation_check: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_positive")]
    pub estimated_minutes: Option<u32>,
    #[serde(deserialize_with = "lenient_text")]
    pub difficulty: Option<String>,
}

/// Raw phase entry as declared by a blueprint.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawPhase {
    /// Phase code; honored only when it is a non-blank string
    #[serde(deserialize_with = "strict_text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_step_seq")]
    pub steps: Vec<RawStep>,
}

/// Loosely-typed blueprint, the input to workflow assembly.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Blueprint {
    #[serde(deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub app_summary: Option<String>,
    pub stack: Option<Value>,
    pub tech_stack: Option<Value>,
    #[serde(deserialize_with = "lenient_phase_seq")]
    pub phases: Vec<RawPhase>,
    #[serde(deserialize_with = "lenient_value_seq")]
    pub directory_structure: Vec<Value>,
    /// Alternate spelling of `directory_structure`
    #[serde(deserialize_with = "lenient_value_seq")]
    pub directories: Vec<Value>,
    #[serde(deserialize_with = "lenient_value_seq")]
    pub user_flow: Vec<Value>,
    #[serde(deserialize_with = "lenient_text")]
    pub progress_hint: Option<String>,
}

impl Blueprint {
    /// Decode a blueprint from an arbitrary JSON value.
    ///
    /// Anything that is not a JSON object decodes to the empty blueprint,
    /// which downstream assembly turns into the one-step fallback workflow.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Decode a blueprint from JSON text, degrading to empty on any error.
    pub fn from_json(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Human summary with the synonym fallback chain applied.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().or(self.app_summary.as_deref())
    }

    /// Stack description, whichever synonym the blueprint used.
    pub fn stack_value(&self) -> Value {
        self.stack
            .clone()
            .or_else(|| self.tech_stack.clone())
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// Directory layout hints, whichever synonym the blueprint used.
    pub fn directory_structure(&self) -> Vec<Value> {
        if self.directory_structure.is_empty() {
            self.directories.clone()
        } else {
            self.directory_structure.clone()
        }
    }
}

impl RawStep {
    /// Functional area with the `area` → `category` → `"feature"` fallback
    /// chain, lower-cased.
    pub fn area_text(&self) -> String {
        self.area
            .as_deref()
            .or(self.category.as_deref())
            .unwrap_or("feature")
            .to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Lenient decoding helpers. Each one deserializes into a Value first so the
// only way to fail is a transport-level error, never a shape mismatch.
// ---------------------------------------------------------------------------

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(scalar_to_string(&v))
}

/// Strings only, trimmed-non-blank; numbers and other scalars do not count.
fn strict_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::String(s) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(v.as_u64().and_then(|n| u32::try_from(n).ok()))
}

fn lenient_positive<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v = Value::deserialize(d)?;
    let n = match &v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    };
    Ok(n.filter(|n| *n > 0).and_then(|n| u32::try_from(n).ok()))
}

fn lenient_text_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::Array(items) => Ok(items.iter().filter_map(scalar_to_string).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_value_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

fn lenient_step_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RawStep>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_phase_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RawPhase>, D::Error> {
    let v = Value::deserialize(d)?;
    match v {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

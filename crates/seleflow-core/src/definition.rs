//! Declarative flow definitions.
//!
//! A definition names the target URL and the steps to append after the
//! bootstrap connect step. Definitions are input only; flows are never
//! written back.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::flow::{Flow, StepParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Yaml,
    Toml,
}

impl DefinitionFormat {
    /// Pick a format from the file extension, falling back to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => DefinitionFormat::Yaml,
            Some("toml") => DefinitionFormat::Toml,
            _ => DefinitionFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDefinition {
    pub kind: String,
    #[serde(default, deserialize_with = "deserialize_params")]
    pub params: StepParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDefinition {
    pub url: String,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

impl FlowDefinition {
    pub fn parse(content: &str, format: DefinitionFormat) -> Result<Self> {
        let definition: Self = match format {
            DefinitionFormat::Json => serde_json::from_str(content)?,
            DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
            DefinitionFormat::Toml => toml::from_str(content)?,
        };
        Ok(definition)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, DefinitionFormat::from_path(path))
    }

    /// Start a flow at `url` and append every step in order.
    pub fn into_flow(self) -> Result<Flow> {
        let mut flow = Flow::start(&self.url)?;
        for step in self.steps {
            flow.steps_mut().append(step.kind, step.params);
        }
        Ok(flow)
    }
}

/// Scalar parameter values. Strings pass through untouched; numbers and
/// booleans are re-rendered from their parsed value, so `5.0` becomes `5`
/// and `2.50` becomes `2.5`. Quote a value to keep its exact spelling.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParamValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl From<ParamValue> for String {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Text(text) => text,
            ParamValue::Integer(number) => number.to_string(),
            ParamValue::Unsigned(number) => number.to_string(),
            ParamValue::Float(number) => number.to_string(),
            ParamValue::Bool(flag) => flag.to_string(),
        }
    }
}

fn deserialize_params<'de, D>(deserializer: D) -> std::result::Result<StepParams, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, ParamValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| (name, String::from(value)))
        .collect())
}

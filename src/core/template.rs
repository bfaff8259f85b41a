//! Serializable block configurations used to spawn new blocks.
//!
//! A template carries geometry and material only; position and velocity are
//! supplied when the template is instantiated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

use super::block::Block;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub friction: f32,
    pub bounciness: f32,
    #[serde(default)]
    pub is_static: bool,
}

impl BlockTemplate {
    /// Captures the configurable properties of `block`.
    pub fn from_block(block: &Block) -> Self {
        Self {
            name: None,
            width: block.width(),
            height: block.height(),
            mass: block.mass,
            friction: block.friction,
            bounciness: block.bounciness,
            is_static: block.is_static,
        }
    }

    /// Builds an at-rest block with its top-left corner at `(x, y)`.
    pub fn instantiate(&self, x: f32, y: f32) -> Block {
        Block::new(x, y, self.width, self.height)
            .with_mass(self.mass)
            .with_friction(self.friction)
            .with_bounciness(self.bounciness)
            .with_static(self.is_static)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.instantiate(0.0, 0.0)
            .validate()
            .map_err(|err| match err {
                EngineError::InvalidBlock(reason) => reason,
                other => other.to_string(),
            })
    }
}

/// Parses a JSON list of templates. Every entry must parse and validate.
pub fn parse_templates(json: &str) -> EngineResult<Vec<BlockTemplate>> {
    let value: Value = serde_json::from_str(json).map_err(EngineError::TemplateParse)?;
    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(EngineError::TemplatesNotAList),
    };

    let mut templates = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let template: BlockTemplate = serde_json::from_value(entry).map_err(|err| {
            EngineError::InvalidTemplate {
                index,
                reason: err.to_string(),
            }
        })?;
        template
            .validate()
            .map_err(|reason| EngineError::InvalidTemplate { index, reason })?;
        templates.push(template);
    }
    Ok(templates)
}

pub fn templates_to_json(templates: &[BlockTemplate]) -> EngineResult<String> {
    serde_json::to_string_pretty(templates).map_err(EngineError::TemplateSerialize)
}

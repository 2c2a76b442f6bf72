//! Persisted block records.

use serde::{Deserialize, Serialize};

use crate::config::BlockConfigData;
use crate::template::TemplateType;

/// A saved, named block with its frozen generated output.
///
/// `generated_html`/`generated_css` are whatever was compiled last before saving.
/// They are never regenerated implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: u64,
    pub name: String,
    pub template_type: TemplateType,
    pub config: BlockConfigData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_css: Option<String>,
}

/// Input to `createBlock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlock {
    pub name: String,
    pub template_type: TemplateType,
    pub config: BlockConfigData,
    #[serde(default)]
    pub generated_html: Option<String>,
    #[serde(default)]
    pub generated_css: Option<String>,
}

impl NewBlock {
    /// Attach an id, producing the stored record.
    pub fn into_block(self, id: u64) -> Block {
        Block {
            id,
            name: self.name,
            template_type: self.template_type,
            config: self.config,
            generated_html: self.generated_html,
            generated_css: self.generated_css,
        }
    }
}

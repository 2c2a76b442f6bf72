//! Block documents: the YAML or JSON files a user edits.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::BlockConfigData;

/// A named block configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    /// Display name of the block
    pub name: String,

    /// Template tag. Kept raw so that unknown tags surface from the compiler.
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub config: BlockConfigData,
}

fn default_template() -> String {
    "pricing_card".to_string()
}

impl Default for BlockDocument {
    fn default() -> Self {
        Self {
            name: "My Block".to_string(),
            template: default_template(),
            config: BlockConfigData::default(),
        }
    }
}

/// Serialization format of a block document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Format::Yaml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

/// Parse a block document from source text.
pub fn parse_block_document(source: &str, format: Format) -> Result<BlockDocument, DocumentError> {
    match format {
        Format::Yaml => {
            serde_yaml::from_str(source).map_err(|e| DocumentError::InvalidYaml(e.to_string()))
        }
        Format::Json => {
            serde_json::from_str(source).map_err(|e| DocumentError::InvalidJson(e.to_string()))
        }
    }
}

/// Read and parse a block document, picking the format from the extension.
pub fn load_block_document(path: &Path) -> Result<BlockDocument, DocumentError> {
    let format = Format::from_path(path)
        .ok_or_else(|| DocumentError::UnsupportedFormat(path.display().to_string()))?;

    let source = fs::read_to_string(path)
        .map_err(|e| DocumentError::Read(format!("{}: {}", path.display(), e)))?;

    parse_block_document(&source, format)
}

/// Errors that can occur when loading a block document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read block document: {0}")]
    Read(String),

    #[error("Unsupported block document format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid YAML in block document: {0}")]
    InvalidYaml(String),

    #[error("Invalid JSON in block document: {0}")]
    InvalidJson(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parses_yaml_document() {
        let source = r##"
name: Pro plan
template: pricing_card
config:
  title: Pro
  colors:
    background: "#101010"
  content:
    items:
      - id: "1"
        type: text
        content: Feature A
        icon: check
"##;

        let doc = parse_block_document(source, Format::Yaml).unwrap();

        assert_eq!(doc.name, "Pro plan");
        assert_eq!(doc.template, "pricing_card");
        assert_eq!(doc.config.title, "Pro");
        assert_eq!(doc.config.colors.background, "#101010");
        assert_eq!(doc.config.content.items.len(), 1);
        assert_eq!(doc.config.content.items[0].icon.as_deref(), Some("check"));
        assert_eq!(doc.config.content.button.text, "Get Started");
    }

    #[test]
    fn keeps_unknown_template_tags() {
        let doc = parse_block_document(r#"{"name":"x","template":"foo_bar"}"#, Format::Json)
            .unwrap();
        assert_eq!(doc.template, "foo_bar");
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = parse_block_document("name: [broken", Format::Yaml);
        assert!(matches!(result, Err(DocumentError::InvalidYaml(_))));
    }

    #[test]
    fn loads_from_disk_by_extension() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("card.yml");
        fs::write(&path, "name: Card\n").unwrap();

        let doc = load_block_document(&path).unwrap();
        assert_eq!(doc.name, "Card");
        assert_eq!(doc.template, "pricing_card");

        let other = temp.path().join("card.txt");
        fs::write(&other, "name: Card\n").unwrap();
        assert!(matches!(
            load_block_document(&other),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }
}

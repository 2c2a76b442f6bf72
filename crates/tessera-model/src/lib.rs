//! Block configuration model for tessera.
//!
//! This crate holds the normalized configuration value a user edits, the closed set
//! of template types, range bounds, and loading of block documents from YAML or JSON.

pub mod block;
pub mod bounds;
pub mod config;
pub mod document;
pub mod template;

pub use block::{Block, NewBlock};
pub use bounds::{Bounds, ConfigError};
pub use config::{
    BlockConfigData, ButtonConfig, Colors, Content, ContentItem, Effects, ItemKind, Responsive,
    Spacing, Typography,
};
pub use document::{load_block_document, parse_block_document, BlockDocument, DocumentError, Format};
pub use template::{TemplateType, UnknownTemplate};

//! Template registry, HTML/CSS compiler and preview renderer for tessera blocks.
//!
//! Every template type maps to one declarative [`TemplateDefinition`]. The compiler
//! and the preview renderer are both visitors over the same walk of that definition,
//! so exported code and the on-screen preview cannot drift apart structurally.

pub mod cache;
pub mod compiler;
pub mod definition;
pub mod error;
pub mod escape;
pub mod preview;
pub mod registry;
pub mod resolve;
pub mod style;
pub mod templates;

pub use cache::CompileCache;
pub use compiler::{generate, generate_tag, Compiler, GeneratedCode};
pub use definition::{
    Align, ItemLayout, Region, RootLayout, Slot, SlotKind, TemplateDefinition, TextField, TextRole,
};
pub use error::CompileError;
pub use preview::{PreviewChild, PreviewNode, PreviewRenderer};
pub use registry::TemplateRegistry;
pub use resolve::{resolve, Element, NodeVisitor, ResolvedBlock, Scope};
pub use style::{Breakpoint, Declaration, MediaBlock, Rule, StyleSheet};

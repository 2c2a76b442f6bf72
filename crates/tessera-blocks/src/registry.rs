//! Template registry: the lookup table from template type to definition.

use std::sync::LazyLock;

use tessera_model::TemplateType;

use crate::definition::TemplateDefinition;
use crate::error::CompileError;
use crate::templates;

static BUILTIN: LazyLock<TemplateRegistry> = LazyLock::new(TemplateRegistry::new);

/// Every template definition, indexed by template type.
#[derive(Debug)]
pub struct TemplateRegistry {
    /// Definitions in `TemplateType::ALL` order
    definitions: Vec<TemplateDefinition>,
}

impl TemplateRegistry {
    /// Build a registry holding the built-in definitions.
    pub fn new() -> Self {
        let definitions = TemplateType::ALL
            .into_iter()
            .map(templates::definition)
            .collect();

        Self { definitions }
    }

    /// The process-wide registry of built-in templates.
    pub fn builtin() -> &'static TemplateRegistry {
        &BUILTIN
    }

    /// Definition for a known template type.
    pub fn get(&self, template: TemplateType) -> &TemplateDefinition {
        &self.definitions[template.index()]
    }

    /// Look up a definition by wire tag. Unknown tags never fall back to a default.
    pub fn lookup(&self, tag: &str) -> Result<&TemplateDefinition, CompileError> {
        let template: TemplateType = tag.parse()?;
        Ok(self.get(template))
    }

    /// All definitions in registry order.
    pub fn definitions(&self) -> &[TemplateDefinition] {
        &self.definitions
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

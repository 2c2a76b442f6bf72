//! Save a block document, with its generated code, to the block store.

use std::path::Path;

use anyhow::{Context, Result};
use tessera_blocks::generate;
use tessera_export::{BlockStore, FileBlockStore};
use tessera_model::{load_block_document, Block, NewBlock, TemplateType};

use crate::config::load_config;

/// Compile `file` and persist it as a new block.
pub fn save(store: &dyn BlockStore, file: &Path, name: Option<String>) -> Result<Block> {
    let doc = load_block_document(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let template: TemplateType = doc.template.parse()?;
    let code = generate(&doc.config, template)
        .with_context(|| format!("Failed to compile {}", file.display()))?;

    let block = store.create(NewBlock {
        name: name.unwrap_or(doc.name),
        template_type: template,
        config: doc.config,
        generated_html: Some(code.html),
        generated_css: Some(code.css),
    })?;

    Ok(block)
}

/// Run the save command.
pub async fn run(config_path: &Path, file: &Path, name: Option<String>) -> Result<()> {
    let file_config = load_config(config_path)?;
    let store = FileBlockStore::open(&file_config.store.dir)
        .with_context(|| format!("Failed to open block store at {}", file_config.store.dir))?;

    let block = save(&store, file, name)?;

    tracing::info!("Saved '{}' as block {}", block.name, block.id);
    println!("{}", block.id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn saves_with_generated_code() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("card.yaml");
        fs::write(&file, "name: Card\ntemplate: team_member\nconfig:\n  title: Ada Lovelace\n").unwrap();
        let store = FileBlockStore::open(temp.path().join("store")).unwrap();

        let first = save(&store, &file, None).unwrap();
        let second = save(&store, &file, Some("Renamed".to_string())).unwrap();

        assert_eq!(first.name, "Card");
        assert_eq!(first.template_type, TemplateType::TeamMember);
        assert!(first.generated_html.as_deref().unwrap().contains("AL"));
        assert!(first.generated_css.is_some());
        assert_eq!(second.name, "Renamed");
        assert!(second.id > first.id);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn unknown_template_saves_nothing() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("card.yaml");
        fs::write(&file, "name: Card\ntemplate: foo_bar\n").unwrap();
        let store = FileBlockStore::open(temp.path().join("store")).unwrap();

        let err = save(&store, &file, None).unwrap_err();
        assert!(err.to_string().contains("Unknown template: foo_bar"));
        assert!(store.list().unwrap().is_empty());
    }
}

//! Development server command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tessera_export::FileBlockStore;
use tessera_model::Format;
use tessera_server::{DevServer, DevServerConfig};
use walkdir::WalkDir;

use crate::config::load_config;

/// Run the dev server for `file`, or the first document in the blocks dir.
pub async fn run(
    config_path: &Path,
    file: Option<PathBuf>,
    port: Option<u16>,
    open: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;

    let block_file = match file {
        Some(file) => file,
        None => first_document(Path::new(&file_config.blocks.dir))?,
    };

    let store = FileBlockStore::open(&file_config.store.dir)
        .with_context(|| format!("Failed to open block store at {}", file_config.store.dir))?;

    let port = port.unwrap_or(file_config.server.port);
    tracing::info!(
        "Starting development server for {} on port {}",
        block_file.display(),
        port
    );

    let config = DevServerConfig {
        block_file,
        port,
        host: file_config.server.host,
        open,
        ..Default::default()
    };

    DevServer::new(config, Arc::new(store)).start().await?;

    Ok(())
}

/// First block document under `dir`, in path order.
fn first_document(dir: &Path) -> Result<PathBuf> {
    let mut docs: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && Format::from_path(e.path()).is_some())
        .map(|e| e.into_path())
        .collect();
    docs.sort();

    docs.into_iter().next().with_context(|| {
        format!(
            "No block documents found in {}. Run 'tessera init' or pass a file.",
            dir.display()
        )
    })
}

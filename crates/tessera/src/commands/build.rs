//! Export every block document into a gallery.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tessera_export::{BuildConfig, ExportBuilder};

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Exporting blocks...");

    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        blocks_dir: PathBuf::from(&file_config.blocks.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.blocks.output)),
        minify: minify.unwrap_or(file_config.build.minify),
        validate_css: file_config.build.validate_css,
        title: file_config.blocks.title,
    };

    let result = ExportBuilder::new(config).build()?;

    for failure in &result.failures {
        tracing::warn!("Skipped {}: {}", failure.path.display(), failure.message);
    }

    tracing::info!(
        "Exported {} blocks ({} failed) in {}ms",
        result.blocks,
        result.failures.len(),
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn exports_configured_blocks_dir() {
        let temp = tempdir().unwrap();
        let blocks = temp.path().join("blocks");
        let out = temp.path().join("out");
        fs::create_dir_all(&blocks).unwrap();
        fs::write(
            blocks.join("card.yaml"),
            "name: Card\ntemplate: service_card\nconfig:\n  title: Design\n",
        )
        .unwrap();

        let config_path = temp.path().join("tessera.toml");
        fs::write(
            &config_path,
            format!("[blocks]\ndir = {:?}\n", blocks.display().to_string()),
        )
        .unwrap();

        run(&config_path, Some(out.clone()), Some(false)).await.unwrap();

        assert!(out.join("index.html").exists());
        assert!(out.join("manifest.json").exists());
        let html = fs::read_to_string(out.join("card/block.html")).unwrap();
        assert!(html.contains('\n'));
    }
}

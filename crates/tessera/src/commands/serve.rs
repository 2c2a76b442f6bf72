//! Serve an exported gallery.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tessera_export::ManifestEntry;
use tower_http::services::ServeDir;

/// Check that `dir` holds an exported gallery and read its manifest.
///
/// A gallery without `manifest.json` is served as is and lists no blocks.
fn load_gallery(dir: &Path) -> Result<Vec<ManifestEntry>> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'tessera build' first.",
            dir.display()
        );
    }

    if !dir.join("index.html").is_file() {
        anyhow::bail!(
            "{} has no index.html. Run 'tessera build --output {}' to export a gallery there.",
            dir.display(),
            dir.display()
        );
    }

    let manifest = dir.join("manifest.json");
    if !manifest.is_file() {
        tracing::warn!("{} has no manifest.json", dir.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", manifest.display()))
}

/// Run the serve command.
pub async fn run(host: &str, port: u16, dir: PathBuf, open: bool) -> Result<()> {
    let blocks = load_gallery(&dir)?;

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid address")?;

    tracing::info!(
        "Serving {} blocks from {} at http://{}",
        blocks.len(),
        dir.display(),
        addr
    );
    for block in &blocks {
        tracing::debug!("  /{}.html ({})", block.slug, block.template_type);
    }

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    if open {
        let _ = open::that(format!("http://{}", addr));
    }

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use tessera_export::{BuildConfig, ExportBuilder};

    #[test]
    fn reads_an_exported_gallery() {
        let temp = tempdir().unwrap();
        let blocks = temp.path().join("blocks");
        let out = temp.path().join("dist");
        fs::create_dir_all(&blocks).unwrap();
        fs::write(
            blocks.join("cta.yaml"),
            "name: Join Us\ntemplate: cta_section\n",
        )
        .unwrap();

        ExportBuilder::new(BuildConfig {
            blocks_dir: blocks,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .unwrap();

        let gallery = load_gallery(&out).unwrap();
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery[0].slug, "join-us");
    }

    #[test]
    fn missing_directory_points_at_build() {
        let temp = tempdir().unwrap();

        let err = load_gallery(&temp.path().join("dist")).unwrap_err();
        assert!(err.to_string().contains("Run 'tessera build' first"));
    }

    #[test]
    fn directory_without_index_is_rejected() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.txt"), "hi").unwrap();

        let err = load_gallery(temp.path()).unwrap_err();
        assert!(err.to_string().contains("has no index.html"));
    }

    #[test]
    fn manifest_is_optional() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "<!DOCTYPE html>").unwrap();

        assert!(load_gallery(temp.path()).unwrap().is_empty());
    }
}

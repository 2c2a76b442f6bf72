//! Compile a single block document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tessera_blocks::{generate_tag, Breakpoint, GeneratedCode, PreviewRenderer};
use tessera_export::{bundle, minify_code};
use tessera_model::load_block_document;

/// What `generate` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<style>` block followed by the markup
    Bundle,
    Html,
    Css,
    /// `{"html": ..., "css": ...}`
    Json,
    /// Preview markup with inline styles
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl From<Viewport> for Breakpoint {
    fn from(v: Viewport) -> Self {
        match v {
            Viewport::Mobile => Breakpoint::Mobile,
            Viewport::Tablet => Breakpoint::Tablet,
            Viewport::Desktop => Breakpoint::Desktop,
        }
    }
}

/// Render `file` in `format`.
pub fn render(file: &Path, format: OutputFormat, minify: bool, viewport: Viewport) -> Result<String> {
    let doc = load_block_document(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    let compile = || -> Result<GeneratedCode> {
        let code = generate_tag(&doc.config, &doc.template)
            .with_context(|| format!("Failed to compile {}", file.display()))?;
        Ok(if minify { minify_code(&code) } else { code })
    };

    Ok(match format {
        OutputFormat::Bundle => bundle(&compile()?),
        OutputFormat::Html => compile()?.html,
        OutputFormat::Css => compile()?.css,
        OutputFormat::Json => serde_json::to_string_pretty(&compile()?)?,
        OutputFormat::Preview => PreviewRenderer::new()
            .render_tag(&doc.config, &doc.template, viewport.into())
            .with_context(|| format!("Failed to preview {}", file.display()))?
            .to_html(),
    })
}

/// Run the generate command.
pub async fn run(
    file: PathBuf,
    format: OutputFormat,
    minify: bool,
    viewport: Viewport,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = render(&file, format, minify, viewport)?;

    match output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

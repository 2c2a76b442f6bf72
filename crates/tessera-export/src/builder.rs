//! Batch export of a directory of block documents.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use tessera_blocks::{Compiler, GeneratedCode};
use tessera_model::{load_block_document, Format, TemplateType};

use crate::assets::AssetPipeline;
use crate::bundle::{bundle, slug};
use crate::minify::minify_code;
use crate::templates::{GalleryContext, GalleryEntry, GalleryError, TemplateEngine};

/// Configuration for an export build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding block documents
    pub blocks_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify generated HTML/CSS
    pub minify: bool,

    /// Parse every generated stylesheet with lightningcss
    pub validate_css: bool,

    /// Gallery page title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            blocks_dir: PathBuf::from("blocks"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            validate_css: true,
            title: "Blocks".to_string(),
        }
    }
}

/// A document that could not be exported.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of blocks exported
    pub blocks: usize,

    /// Documents that failed to load or compile
    pub failures: Vec<BuildFailure>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read blocks directory: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// One line of `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub name: String,
    pub slug: String,
    pub template_type: TemplateType,
    pub source: String,
    pub bundle: String,
    pub html: String,
    pub css: String,
}

/// A successfully compiled document.
#[derive(Debug)]
struct CompiledBlock {
    source: PathBuf,
    name: String,
    template: TemplateType,
    code: GeneratedCode,
}

/// Builds an export directory from block documents.
pub struct ExportBuilder {
    config: BuildConfig,
    compiler: Compiler,
    templates: TemplateEngine,
}

impl ExportBuilder {
    /// Create a new export builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            compiler: Compiler::new(),
            templates: TemplateEngine::new(),
        }
    }

    /// Export every block document.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let sources = self.discover()?;

        let results: Vec<Result<CompiledBlock, BuildFailure>> =
            sources.par_iter().map(|path| self.compile(path)).collect();

        let mut compiled = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(block) => compiled.push(block),
                Err(failure) => {
                    tracing::warn!("Skipping {}: {}", failure.path.display(), failure.message);
                    failures.push(failure);
                }
            }
        }

        let mut manifest = Vec::new();
        let mut gallery = Vec::new();
        let mut taken = HashSet::new();

        for block in &compiled {
            let slug = unique_slug(&block.name, &mut taken);
            let entry = self.write_block(block, &slug)?;

            gallery.push(GalleryEntry {
                name: block.name.clone(),
                slug: slug.clone(),
                template: block.template.tag().to_string(),
                label: block.template.label().to_string(),
                bundle: bundle(&block.code),
            });
            manifest.push(entry);
        }

        self.write_manifest(&manifest)?;
        self.write_gallery(gallery, &failures)?;

        let duration = start.elapsed();
        tracing::info!(
            "Exported {} blocks ({} failed) in {}ms",
            compiled.len(),
            failures.len(),
            duration.as_millis()
        );

        Ok(BuildResult {
            blocks: compiled.len(),
            failures,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Find block documents, sorted by path.
    fn discover(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.config.blocks_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Blocks directory not found: {}",
                self.config.blocks_dir.display()
            )));
        }

        let mut sources: Vec<PathBuf> = WalkDir::new(&self.config.blocks_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && Format::from_path(e.path()).is_some())
            .map(|e| e.path().to_path_buf())
            .collect();

        sources.sort();
        Ok(sources)
    }

    fn compile(&self, path: &Path) -> Result<CompiledBlock, BuildFailure> {
        let fail = |message: String| BuildFailure {
            path: path.to_path_buf(),
            message,
        };

        let doc = load_block_document(path).map_err(|e| fail(e.to_string()))?;
        let template: TemplateType = doc.template.parse().map_err(|e| fail(format!("{e}")))?;
        let code = self
            .compiler
            .generate(&doc.config, template)
            .map_err(|e| fail(e.to_string()))?;

        if self.config.validate_css {
            if let Err(e) = AssetPipeline::validate_css(&code.css) {
                tracing::warn!("{}: generated CSS did not validate: {}", path.display(), e);
            }
        }

        let code = if self.config.minify {
            minify_code(&code)
        } else {
            code
        };

        Ok(CompiledBlock {
            source: path.to_path_buf(),
            name: doc.name,
            template,
            code,
        })
    }

    fn write_block(&self, block: &CompiledBlock, slug: &str) -> Result<ManifestEntry, BuildError> {
        let out = &self.config.output_dir;
        let dir = out.join(slug);
        fs::create_dir_all(&dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let bundle_name = format!("{slug}.html");
        write(&out.join(&bundle_name), &bundle(&block.code))?;
        write(&dir.join("block.html"), &block.code.html)?;
        write(&dir.join("block.css"), &block.code.css)?;

        Ok(ManifestEntry {
            name: block.name.clone(),
            slug: slug.to_string(),
            template_type: block.template,
            source: block.source.display().to_string(),
            bundle: bundle_name,
            html: format!("{slug}/block.html"),
            css: format!("{slug}/block.css"),
        })
    }

    fn write_manifest(&self, entries: &[ManifestEntry]) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        write(&self.config.output_dir.join("manifest.json"), &json)
    }

    fn write_gallery(
        &self,
        entries: Vec<GalleryEntry>,
        failures: &[BuildFailure],
    ) -> Result<(), BuildError> {
        let css = AssetPipeline::gallery_css();
        let styles = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };

        let context = GalleryContext {
            title: self.config.title.clone(),
            entries,
            errors: failures
                .iter()
                .map(|f| GalleryError {
                    path: f.path.display().to_string(),
                    message: f.message.clone(),
                })
                .collect(),
            styles,
        };

        let html = self
            .templates
            .render_gallery(&context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write(&self.config.output_dir.join("index.html"), &html)
    }
}

fn write(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

/// Slug for `name` that is not yet in `taken`.
fn unique_slug(name: &str, taken: &mut HashSet<String>) -> String {
    let base = slug(name);
    let mut candidate = base.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

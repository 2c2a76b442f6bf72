//! Asset pipeline for the export gallery and CSS validation.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Errors from lightningcss processing.
#[derive(Debug, thiserror::Error)]
pub enum MinifyError {
    #[error("CSS parse error: {0}")]
    Parse(String),

    #[error("CSS print error: {0}")]
    Print(String),
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Stylesheet of the gallery page.
    pub fn gallery_css() -> String {
        GALLERY_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, MinifyError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| MinifyError::Parse(e.to_string()))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| MinifyError::Print(e.to_string()))?;

        Ok(minified.code)
    }

    /// Check that `css` parses as a stylesheet.
    pub fn validate_css(css: &str) -> Result<(), MinifyError> {
        StyleSheet::parse(css, ParserOptions::default())
            .map(|_| ())
            .map_err(|e| MinifyError::Parse(e.to_string()))
    }
}

const GALLERY_CSS: &str = r#"* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: #f4f5f7;
  color: #1d1f24;
}

.gallery-header {
  padding: 2rem;
  border-bottom: 1px solid #dcdfe4;
  background: #ffffff;
}

.gallery-header h1 {
  margin: 0;
  font-size: 1.5rem;
}

.gallery {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(360px, 1fr));
  gap: 2rem;
  padding: 2rem;
}

.gallery-item {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  padding: 1rem;
  border: 1px solid #dcdfe4;
  border-radius: 0.5rem;
  background: #ffffff;
}

.gallery-item h2 {
  margin: 0;
  font-size: 1rem;
}

.gallery-meta {
  font-size: 0.75rem;
  color: #6b7280;
}

.gallery-preview {
  display: flex;
  justify-content: center;
  padding: 1rem;
  background: #e5e7eb;
  border-radius: 0.375rem;
  overflow: auto;
}

.gallery-preview iframe {
  width: 100%;
  min-height: 24rem;
  border: 0;
}

.gallery-links a {
  margin-right: 1rem;
  font-size: 0.875rem;
  color: #4f46e5;
}

.gallery-errors {
  margin: 0 2rem 2rem;
  padding: 1rem;
  border: 1px solid #fca5a5;
  border-radius: 0.5rem;
  background: #fef2f2;
  color: #991b1b;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_css_is_valid() {
        let css = AssetPipeline::gallery_css();
        assert!(css.contains(".gallery"));
        assert!(AssetPipeline::validate_css(&css).is_ok());
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn validates_compiler_output() {
        let code = tessera_blocks::generate(
            &tessera_model::BlockConfigData::default(),
            tessera_model::TemplateType::CtaSection,
        )
        .unwrap();

        assert!(AssetPipeline::validate_css(&code.css).is_ok());
    }
}

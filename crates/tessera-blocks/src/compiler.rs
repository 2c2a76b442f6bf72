//! The HTML/CSS compiler.

use serde::{Deserialize, Serialize};
use tessera_model::{BlockConfigData, TemplateType};
use tracing::{debug, trace};

use crate::cache::CompileCache;
use crate::error::CompileError;
use crate::escape::escape_html;
use crate::registry::TemplateRegistry;
use crate::resolve::{resolve, Element, NodeVisitor};

/// Compiled output of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub html: String,
    pub css: String,
}

/// Block compiler with an optional memo cache.
#[derive(Debug)]
pub struct Compiler {
    registry: &'static TemplateRegistry,
    cache: Option<CompileCache>,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            registry: TemplateRegistry::builtin(),
            cache: None,
        }
    }

    /// Compiler that remembers up to `capacity` recent results.
    pub fn with_cache(capacity: usize) -> Self {
        Self {
            registry: TemplateRegistry::builtin(),
            cache: Some(CompileCache::new(capacity)),
        }
    }

    pub fn cache(&self) -> Option<&CompileCache> {
        self.cache.as_ref()
    }

    /// Compile `config` as `template`.
    pub fn generate(
        &self,
        config: &BlockConfigData,
        template: TemplateType,
    ) -> Result<GeneratedCode, CompileError> {
        let Some(cache) = &self.cache else {
            return compile(self.registry, config, template);
        };

        let key = CompileCache::key(template, config);
        if let Some(hit) = key.as_ref().and_then(|k| cache.get(k)) {
            trace!("Cache hit for {}", template);
            return Ok(hit);
        }

        let code = compile(self.registry, config, template)?;
        if let Some(key) = key {
            cache.insert(key, code.clone());
            debug!("Cached {} ({} entries)", template, cache.len());
        }
        Ok(code)
    }

    /// Compile using a template wire tag.
    pub fn generate_tag(
        &self,
        config: &BlockConfigData,
        tag: &str,
    ) -> Result<GeneratedCode, CompileError> {
        let template: TemplateType = tag.parse()?;
        self.generate(config, template)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `config` as `template` without caching.
pub fn generate(
    config: &BlockConfigData,
    template: TemplateType,
) -> Result<GeneratedCode, CompileError> {
    compile(TemplateRegistry::builtin(), config, template)
}

/// Compile using a template wire tag, failing on unknown tags.
pub fn generate_tag(config: &BlockConfigData, tag: &str) -> Result<GeneratedCode, CompileError> {
    let template: TemplateType = tag.parse()?;
    generate(config, template)
}

fn compile(
    registry: &TemplateRegistry,
    config: &BlockConfigData,
    template: TemplateType,
) -> Result<GeneratedCode, CompileError> {
    let block = resolve(registry, config, template)?;

    let mut emitter = HtmlEmitter::default();
    block.walk(&mut emitter);

    Ok(GeneratedCode {
        html: emitter.finish(),
        css: block.stylesheet().to_css(),
    })
}

/// Writes the walk as indented HTML. Elements holding only text stay on one line.
#[derive(Default)]
struct HtmlEmitter {
    out: String,
    /// One entry per open element: whether it has element children
    open: Vec<bool>,
}

impl HtmlEmitter {
    fn indent(&mut self) {
        self.out.push('\n');
        for _ in 0..self.open.len() {
            self.out.push_str("  ");
        }
    }

    fn finish(mut self) -> String {
        self.out.push('\n');
        self.out
    }
}

impl NodeVisitor for HtmlEmitter {
    fn enter(&mut self, element: &Element) {
        if let Some(parent) = self.open.last_mut() {
            *parent = true;
            self.indent();
        }

        self.out.push('<');
        self.out.push_str(element.tag);
        self.out.push_str(" class=\"");
        self.out.push_str(&escape_html(&element.classes.join(" ")));
        self.out.push('"');
        for (name, value) in &element.attrs {
            self.out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        self.out.push('>');

        self.open.push(false);
    }

    fn text(&mut self, text: &str) {
        let escaped = escape_html(text);
        debug_assert!(!escaped.contains('<') && !escaped.contains('>'));
        self.out.push_str(&escaped);
    }

    fn leave(&mut self, element: &Element) {
        let has_children = self.open.pop().unwrap_or(false);
        if has_children {
            self.indent();
        }
        self.out.push_str("</");
        self.out.push_str(element.tag);
        self.out.push('>');
    }
}

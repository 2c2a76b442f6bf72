//! Live preview renderer.
//!
//! Builds an in-memory element tree from the same walk the compiler uses, with
//! inline styles computed from the compiler's own stylesheet.

use serde::Serialize;
use tessera_model::{BlockConfigData, TemplateType};

use crate::error::CompileError;
use crate::escape::{escape_html, is_html_whitespace};
use crate::registry::TemplateRegistry;
use crate::resolve::{resolve, Element, NodeVisitor};
use crate::style::{Breakpoint, Declaration, StyleSheet};

/// One element of the preview tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(&'static str, String)>,
    /// Computed inline style
    pub style: Vec<Declaration>,
    pub children: Vec<PreviewChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PreviewChild {
    Element(PreviewNode),
    Text(String),
}

impl PreviewNode {
    fn from_element(element: &Element) -> Self {
        Self {
            tag: element.tag,
            classes: element.classes.clone(),
            attrs: element.attrs.clone(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Render with inline styles, for display.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, true);
        out
    }

    /// Unstyled structure in compact form.
    ///
    /// Equal to the minified HTML the compiler produces for the same input.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, false);
        out
    }

    /// Concatenated text content.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                PreviewChild::Element(node) => out.push_str(&node.text_content()),
                PreviewChild::Text(text) => out.push_str(text),
            }
        }
        out
    }

    /// All nodes in document order, this one first.
    pub fn descendants(&self) -> Vec<&PreviewNode> {
        let mut nodes = vec![self];
        for child in &self.children {
            if let PreviewChild::Element(node) = child {
                nodes.extend(node.descendants());
            }
        }
        nodes
    }

    /// Value of an inline style property.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    fn write(&self, out: &mut String, styled: bool) {
        out.push('<');
        out.push_str(self.tag);
        out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        for (name, value) in &self.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }
        if styled && !self.style.is_empty() {
            let style: Vec<String> = self
                .style
                .iter()
                .map(|d| format!("{}: {}", d.property, d.value))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape_html(&style.join("; "))));
        }
        out.push('>');

        for child in &self.children {
            match child {
                PreviewChild::Element(node) => node.write(out, styled),
                PreviewChild::Text(text) => {
                    let collapsed = collapse_whitespace(text);
                    if collapsed.chars().any(|c| !is_html_whitespace(c)) {
                        out.push_str(&escape_html(&collapsed));
                    }
                }
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_html_whitespace(c) {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Renders blocks as preview trees.
#[derive(Debug)]
pub struct PreviewRenderer {
    registry: &'static TemplateRegistry,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self {
            registry: TemplateRegistry::builtin(),
        }
    }

    /// Render `config` as `template` at the given viewport width class.
    pub fn render(
        &self,
        config: &BlockConfigData,
        template: TemplateType,
        viewport: Breakpoint,
    ) -> Result<PreviewNode, CompileError> {
        let block = resolve(self.registry, config, template)?;

        let mut builder = TreeBuilder::default();
        block.walk(&mut builder);
        let mut root = builder.root.ok_or_else(|| CompileError::InvalidConfig {
            path: String::new(),
            reason: "template produced no elements".to_string(),
        })?;

        apply_styles(&mut root, &block.stylesheet(), viewport);
        Ok(root)
    }

    /// Render using a template wire tag.
    pub fn render_tag(
        &self,
        config: &BlockConfigData,
        tag: &str,
        viewport: Breakpoint,
    ) -> Result<PreviewNode, CompileError> {
        let template: TemplateType = tag.parse()?;
        self.render(config, template, viewport)
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_styles(node: &mut PreviewNode, sheet: &StyleSheet, viewport: Breakpoint) {
    node.style = sheet.computed(&node.classes, Some(viewport));
    for child in &mut node.children {
        if let PreviewChild::Element(child) = child {
            apply_styles(child, sheet, viewport);
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<PreviewNode>,
    root: Option<PreviewNode>,
}

impl NodeVisitor for TreeBuilder {
    fn enter(&mut self, element: &Element) {
        self.stack.push(PreviewNode::from_element(element));
    }

    fn text(&mut self, text: &str) {
        if let Some(node) = self.stack.last_mut() {
            node.children.push(PreviewChild::Text(text.to_string()));
        }
    }

    fn leave(&mut self, _element: &Element) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(PreviewChild::Element(node)),
            None => self.root = Some(node),
        }
    }
}

//! Template engine for the export gallery page.

use minijinja::{context, Environment};
use serde::Serialize;

/// One exported block on the gallery page.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryEntry {
    /// Block name
    pub name: String,
    /// Output file stem
    pub slug: String,
    /// Template wire tag
    pub template: String,
    /// Template display label
    pub label: String,
    /// `<style>` + markup bundle, rendered in its own iframe document
    pub bundle: String,
}

/// A document that failed to compile.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryError {
    pub path: String,
    pub message: String,
}

/// Context for rendering the gallery.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryContext {
    /// Page title
    pub title: String,
    pub entries: Vec<GalleryEntry>,
    pub errors: Vec<GalleryError>,
    /// Gallery stylesheet, inlined
    pub styles: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the gallery templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("gallery.html".to_string(), GALLERY_TEMPLATE.to_string())
            .expect("Failed to add gallery template");

        Self { env }
    }

    /// Render the gallery page.
    pub fn render_gallery(&self, context: &GalleryContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("gallery.html")?;

        tmpl.render(context! {
            title => &context.title,
            entries => &context.entries,
            errors => &context.errors,
            styles => &context.styles,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <style>{{ styles | safe }}</style>
</head>
<body>
  <header class="gallery-header">
    <h1>{{ title }}</h1>
  </header>
  {% block content %}{% endblock %}
</body>
</html>"##;

const GALLERY_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<main class="gallery">
{% for entry in entries %}
  <article class="gallery-item" id="{{ entry.slug }}">
    <h2>{{ entry.name }}</h2>
    <div class="gallery-meta">{{ entry.label }} ({{ entry.template }})</div>
    <div class="gallery-preview">
      <iframe title="{{ entry.name }}" srcdoc="{{ entry.bundle }}" loading="lazy"></iframe>
    </div>
    <div class="gallery-links">
      <a href="{{ entry.slug }}.html" download>Download</a>
      <a href="{{ entry.slug }}/block.html">HTML</a>
      <a href="{{ entry.slug }}/block.css">CSS</a>
    </div>
  </article>
{% endfor %}
</main>

{% if errors %}
<section class="gallery-errors">
  <h2>Failed blocks</h2>
  <ul>
  {% for error in errors %}
    <li><code>{{ error.path }}</code>: {{ error.message }}</li>
  {% endfor %}
  </ul>
</section>
{% endif %}
{% endblock %}"##;

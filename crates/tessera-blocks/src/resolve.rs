//! Resolution of a config against a template definition, and the shared walk.
//!
//! [`resolve`] validates and clamps the config and fixes the class scope. The
//! resulting [`ResolvedBlock`] drives any [`NodeVisitor`] through the element tree,
//! which is how both the compiler and the preview renderer see a block.

use tessera_model::{BlockConfigData, ContentItem, TemplateType};

use crate::definition::{Region, Slot, SlotKind, TemplateDefinition};
use crate::error::CompileError;
use crate::escape::{class_token, short_digest, to_kebab_case};
use crate::registry::TemplateRegistry;
use crate::style::{self, StyleSheet};

/// An element as seen by a visitor. Text is delivered separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    /// Attribute values are raw; visitors escape them
    pub attrs: Vec<(&'static str, String)>,
}

impl Element {
    fn new(tag: &'static str, class: String) -> Self {
        Self {
            tag,
            classes: vec![class],
            attrs: Vec::new(),
        }
    }

    fn class(mut self, class: String) -> Self {
        self.classes.push(class);
        self
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }
}

/// Receives the element tree of a resolved block in document order.
pub trait NodeVisitor {
    fn enter(&mut self, element: &Element);

    /// Raw, unescaped text content of the innermost open element.
    fn text(&mut self, text: &str);

    fn leave(&mut self, element: &Element);
}

/// Class naming for one block instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    root: String,
}

impl Scope {
    /// Scope derived from the template and the item ids.
    pub fn new(template: TemplateType, config: &BlockConfigData) -> Self {
        let mut key = template.tag().to_string();
        for item in &config.content.items {
            key.push('\0');
            key.push_str(&item.id);
        }

        Self {
            root: format!(
                "tb-{}-{}",
                to_kebab_case(template.tag()),
                short_digest(&key, 8)
            ),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn element(&self, name: &str) -> String {
        format!("{}__{}", self.root, name)
    }

    pub fn modifier(&self, name: &str, token: &str) -> String {
        format!("{}__{}--{}", self.root, name, token)
    }
}

/// A validated, clamped config bound to its template definition.
#[derive(Debug, Clone)]
pub struct ResolvedBlock<'r> {
    pub definition: &'r TemplateDefinition,
    pub config: BlockConfigData,
    pub scope: Scope,
}

/// Validate `config`, check required slots, clamp, and bind it to `template`.
pub fn resolve<'r>(
    registry: &'r TemplateRegistry,
    config: &BlockConfigData,
    template: TemplateType,
) -> Result<ResolvedBlock<'r>, CompileError> {
    config.validate()?;

    let definition = registry.get(template);
    if let Some(slot) = definition
        .slots()
        .find(|s| s.required && !s.is_present(config))
    {
        return Err(CompileError::InvalidConfig {
            path: slot.config_path().to_string(),
            reason: "required field is empty".to_string(),
        });
    }

    Ok(ResolvedBlock {
        definition,
        config: config.clamped(),
        scope: Scope::new(template, config),
    })
}

impl ResolvedBlock<'_> {
    pub fn template(&self) -> TemplateType {
        self.definition.template
    }

    /// The stylesheet for this block, in output order.
    pub fn stylesheet(&self) -> StyleSheet {
        style::build(self.definition, &self.config, &self.scope)
    }

    /// Drive `visitor` through the element tree.
    pub fn walk<V: NodeVisitor>(&self, visitor: &mut V) {
        let root = Element::new(self.definition.root_tag, self.scope.root().to_string())
            .attr("data-template", self.template().tag());

        visitor.enter(&root);
        for region in &self.definition.regions {
            self.walk_region(region, visitor);
        }
        visitor.leave(&root);
    }

    fn walk_region<V: NodeVisitor>(&self, region: &Region, visitor: &mut V) {
        let present: Vec<&Slot> = region
            .slots
            .iter()
            .filter(|s| s.is_present(&self.config))
            .collect();
        if present.is_empty() {
            return;
        }

        let wrapper = Element::new(region.tag, self.scope.element(region.name));
        visitor.enter(&wrapper);
        for slot in present {
            self.walk_slot(slot, visitor);
        }
        visitor.leave(&wrapper);
    }

    fn walk_slot<V: NodeVisitor>(&self, slot: &Slot, visitor: &mut V) {
        let class = self.scope.element(slot.name);

        match &slot.kind {
            SlotKind::Text { tag, field, .. } => {
                leaf(visitor, Element::new(*tag, class), field.value(&self.config));
            }

            SlotKind::Avatar { source } => {
                let el = Element::new("div", class).attr("aria-hidden", "true");
                leaf(visitor, el, &initials(source.value(&self.config)));
            }

            SlotKind::Items { .. } => {
                let list = Element::new("ul", class);
                visitor.enter(&list);
                for item in &self.config.content.items {
                    let li = Element::new("li", self.scope.element(&format!("{}-item", slot.name)))
                        .class(
                            self.scope
                                .modifier(&format!("{}-item", slot.name), &class_token(&item.id)),
                        )
                        .attr("data-item-id", item.id.as_str());
                    visitor.enter(&li);
                    self.walk_item_body(slot.name, item, visitor);
                    visitor.leave(&li);
                }
                visitor.leave(&list);
            }

            SlotKind::Flow => {
                for item in &self.config.content.items {
                    let p = Element::new("p", class.clone())
                        .class(self.scope.modifier(slot.name, &class_token(&item.id)))
                        .attr("data-item-id", item.id.as_str());
                    visitor.enter(&p);
                    self.walk_item_body(slot.name, item, visitor);
                    visitor.leave(&p);
                }
            }

            SlotKind::Button => {
                let a = Element::new("a", class)
                    .attr("href", "#")
                    .attr("role", "button");
                leaf(visitor, a, &self.config.content.button.text);
            }
        }
    }

    fn walk_item_body<V: NodeVisitor>(&self, slot: &str, item: &ContentItem, visitor: &mut V) {
        if let Some(icon) = item.icon_name() {
            let span = Element::new("span", self.scope.element(&format!("{slot}-icon")))
                .attr("data-icon", icon)
                .attr("aria-hidden", "true");
            leaf(visitor, span, icon_glyph(icon));
        }

        let label = Element::new("span", self.scope.element(&format!("{slot}-label")));
        leaf(visitor, label, &item.content);
    }
}

fn leaf<V: NodeVisitor>(visitor: &mut V, element: Element, text: &str) {
    visitor.enter(&element);
    if !text.is_empty() {
        visitor.text(text);
    }
    visitor.leave(&element);
}

/// Glyph rendered for a named icon.
pub fn icon_glyph(name: &str) -> &'static str {
    match name.to_ascii_lowercase().as_str() {
        "check" => "\u{2713}",
        "star" => "\u{2605}",
        "heart" => "\u{2665}",
        "arrow" => "\u{2192}",
        "x" | "close" => "\u{2715}",
        "plus" => "+",
        "bolt" => "\u{26A1}",
        _ => "\u{2022}",
    }
}

/// Uppercase initials of up to the first two words.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_model::ContentItem;

    /// Records the walk as a flat list of events.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl NodeVisitor for Recorder {
        fn enter(&mut self, element: &Element) {
            self.events.push(format!("<{}>", element.tag));
        }

        fn text(&mut self, text: &str) {
            self.events.push(text.to_string());
        }

        fn leave(&mut self, element: &Element) {
            self.events.push(format!("</{}>", element.tag));
        }
    }

    fn walk(config: &BlockConfigData, template: TemplateType) -> Vec<String> {
        let block = resolve(TemplateRegistry::builtin(), config, template).unwrap();
        let mut recorder = Recorder::default();
        block.walk(&mut recorder);
        recorder.events
    }

    #[test]
    fn scope_depends_on_template_and_ids_only() {
        let config = BlockConfigData::default();
        let mut retitled = config.clone();
        retitled.title = "Other".to_string();

        let a = Scope::new(TemplateType::PricingCard, &config);
        assert_eq!(a, Scope::new(TemplateType::PricingCard, &retitled));
        assert_ne!(a, Scope::new(TemplateType::ServiceCard, &config));
        assert!(a.root().starts_with("tb-pricing-card-"));
        assert_eq!(a.root().len(), "tb-pricing-card-".len() + 8);
        assert_eq!(a.element("title"), format!("{}__title", a.root()));
    }

    #[test]
    fn missing_required_slot_is_reported_by_path() {
        let mut config = BlockConfigData::default();
        config.content.button.text = "  ".to_string();

        let err = resolve(TemplateRegistry::builtin(), &config, TemplateType::PricingCard)
            .unwrap_err();
        assert_eq!(err.path(), Some("content.button.text"));
    }

    #[test]
    fn optional_empty_slots_and_regions_are_omitted() {
        let mut config = BlockConfigData::default();
        config.description = String::new();
        config.content.button.text = String::new();

        let events = walk(&config, TemplateType::HeroSection);
        assert_eq!(
            events,
            [
                "<section>",
                "<div>",
                "<p>",
                "Subtitle",
                "</p>",
                "<h1>",
                "Your Title Here",
                "</h1>",
                "</div>",
                "</section>",
            ]
        );
    }

    #[test]
    fn items_render_icon_then_label() {
        let mut config = BlockConfigData::default();
        config.content.items = vec![ContentItem::text("a", "Alpha").with_icon("star")];

        let events = walk(&config, TemplateType::FeatureList);
        let start = events.iter().position(|e| e == "<ul>").unwrap();
        assert_eq!(
            &events[start..],
            [
                "<ul>", "<li>", "<span>", "\u{2605}", "</span>", "<span>", "Alpha", "</span>",
                "</li>", "</ul>", "</div>", "</section>",
            ]
        );
    }

    #[test]
    fn initials_take_two_words() {
        assert_eq!(initials("ada lovelace byron"), "AL");
        assert_eq!(initials("  \"Zed\" "), "Z");
        assert_eq!(icon_glyph("CHECK"), "\u{2713}");
        assert_eq!(icon_glyph("unknown"), "\u{2022}");
    }
}

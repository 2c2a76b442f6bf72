//! Declarative template definitions.
//!
//! A definition is the single description of a template's structure: root element,
//! ordered regions, and the slots inside each region. Nothing else in the crate
//! knows what a given template looks like.

use tessera_model::{BlockConfigData, TemplateType};

/// Horizontal alignment of a block's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Start,
}

/// How regions are arranged inside the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootLayout {
    /// Regions stacked vertically at every width
    Stack,
    /// Stacked on small screens, side by side on desktop
    Split,
}

/// The structure of one template.
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    pub template: TemplateType,

    /// Root element tag
    pub root_tag: &'static str,

    pub align: Align,
    pub layout: RootLayout,

    /// Maximum width on desktop, in pixels
    pub max_width: Option<f64>,

    /// Regions in document order
    pub regions: Vec<Region>,
}

impl TemplateDefinition {
    pub fn new(template: TemplateType, root_tag: &'static str) -> Self {
        Self {
            template,
            root_tag,
            align: Align::Start,
            layout: RootLayout::Stack,
            max_width: None,
            regions: Vec::new(),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn layout(mut self, layout: RootLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn max_width(mut self, px: f64) -> Self {
        self.max_width = Some(px);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// All slots in slot-list order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.regions.iter().flat_map(|r| r.slots.iter())
    }
}

/// A wrapper element grouping consecutive slots.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: &'static str,
    pub tag: &'static str,
    pub slots: Vec<Slot>,
}

impl Region {
    pub fn new(name: &'static str, tag: &'static str, slots: Vec<Slot>) -> Self {
        Self { name, tag, slots }
    }
}

/// A named substitution point bound to part of the config.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Class suffix, unique within a definition
    pub name: &'static str,
    pub kind: SlotKind,

    /// Compilation fails when a required slot has nothing to render
    pub required: bool,
}

impl Slot {
    pub fn text(name: &'static str, tag: &'static str, field: TextField, role: TextRole) -> Self {
        Self::new(name, SlotKind::Text { tag, field, role })
    }

    pub fn avatar(name: &'static str, source: TextField) -> Self {
        Self::new(name, SlotKind::Avatar { source })
    }

    pub fn items(name: &'static str, layout: ItemLayout) -> Self {
        Self::new(name, SlotKind::Items { layout })
    }

    pub fn flow(name: &'static str) -> Self {
        Self::new(name, SlotKind::Flow)
    }

    pub fn button(name: &'static str) -> Self {
        Self::new(name, SlotKind::Button)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn new(name: &'static str, kind: SlotKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    /// Config path this slot reads from.
    pub fn config_path(&self) -> &'static str {
        match &self.kind {
            SlotKind::Text { field, .. } | SlotKind::Avatar { source: field } => field.path(),
            SlotKind::Items { .. } | SlotKind::Flow => "content.items",
            SlotKind::Button => "content.button.text",
        }
    }

    /// Whether the slot renders anything for `config`.
    pub fn is_present(&self, config: &BlockConfigData) -> bool {
        match &self.kind {
            SlotKind::Text { field, .. } => !field.value(config).trim().is_empty(),
            SlotKind::Avatar { source } => source
                .value(config)
                .chars()
                .any(|c| c.is_alphanumeric()),
            SlotKind::Items { .. } | SlotKind::Flow => !config.content.items.is_empty(),
            SlotKind::Button => !config.content.button.text.trim().is_empty(),
        }
    }
}

/// What a slot renders.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    /// One element holding a text field
    Text {
        tag: &'static str,
        field: TextField,
        role: TextRole,
    },

    /// Initials badge derived from a text field
    Avatar { source: TextField },

    /// A list element with one entry per content item
    Items { layout: ItemLayout },

    /// One top-level element per content item, no list wrapper
    Flow,

    /// The call-to-action link
    Button,
}

/// Top-level text fields of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Subtitle,
    Description,
}

impl TextField {
    pub fn path(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Subtitle => "subtitle",
            TextField::Description => "description",
        }
    }

    pub fn value(self, config: &BlockConfigData) -> &str {
        match self {
            TextField::Title => &config.title,
            TextField::Subtitle => &config.subtitle,
            TextField::Description => &config.description,
        }
    }
}

/// Typographic role of a text slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Display,
    Price,
    Eyebrow,
    Caption,
    Body,
    Lead,
    Quote,
    Name,
}

impl TextRole {
    /// Headline roles shrink on smaller breakpoints.
    pub fn is_headline(self) -> bool {
        matches!(self, TextRole::Title | TextRole::Display | TextRole::Price)
    }
}

/// Arrangement of an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLayout {
    List,
    Grid { columns: u8 },
    Inline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_region_order() {
        let def = TemplateDefinition::new(TemplateType::Custom, "div")
            .region(Region::new(
                "a",
                "div",
                vec![Slot::text("one", "h2", TextField::Title, TextRole::Title)],
            ))
            .region(Region::new(
                "b",
                "div",
                vec![Slot::flow("two"), Slot::button("three")],
            ));

        let names: Vec<_> = def.slots().map(|s| s.name).collect();
        assert_eq!(names, ["one", "two", "three"]);
    }

    #[test]
    fn reports_config_paths() {
        assert_eq!(Slot::button("b").config_path(), "content.button.text");
        assert_eq!(Slot::flow("f").config_path(), "content.items");
        assert_eq!(
            Slot::avatar("a", TextField::Title).config_path(),
            "title"
        );
    }

    #[test]
    fn blank_text_is_not_present() {
        let mut config = BlockConfigData::default();
        config.subtitle = "   ".to_string();

        let slot = Slot::text("s", "p", TextField::Subtitle, TextRole::Caption);
        assert!(!slot.is_present(&config));

        config.title = "--".to_string();
        assert!(!Slot::avatar("a", TextField::Title).is_present(&config));
    }
}

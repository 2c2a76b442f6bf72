//! Style model shared by the compiler and the preview renderer.
//!
//! Every rule targets exactly one class, so the preview can apply a stylesheet to
//! its tree by plain class matching and get what a browser would compute from the
//! exported CSS.

use serde::{Deserialize, Serialize};
use tessera_model::{BlockConfigData, Responsive};

use crate::definition::{Align, ItemLayout, RootLayout, SlotKind, TemplateDefinition, TextRole};
use crate::escape::css_value;
use crate::resolve::Scope;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// A rule targeting a single class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Class name, without the leading dot
    pub class: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    fn new(class: String, declarations: Vec<Declaration>) -> Self {
        Self {
            class,
            declarations,
        }
    }

    fn write_css(&self, out: &mut String, indent: &str) {
        out.push_str(&format!("{indent}.{} {{\n", self.class));
        for d in &self.declarations {
            out.push_str(&format!("{indent}  {}: {};\n", d.property, d.value));
        }
        out.push_str(&format!("{indent}}}\n"));
    }
}

/// Responsive breakpoints, in ascending width order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const ASCENDING: [Breakpoint; 3] =
        [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop];

    pub fn media_query(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "(max-width: 767px)",
            Breakpoint::Tablet => "(min-width: 768px) and (max-width: 1023px)",
            Breakpoint::Desktop => "(min-width: 1024px)",
        }
    }

    /// Whether the config asks for this breakpoint's rules.
    pub fn enabled(self, responsive: &Responsive) -> bool {
        match self {
            Breakpoint::Mobile => responsive.mobile_view,
            Breakpoint::Tablet => responsive.tablet_view,
            Breakpoint::Desktop => responsive.desktop_view,
        }
    }
}

/// Rules that apply only inside one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaBlock {
    pub breakpoint: Breakpoint,
    pub rules: Vec<Rule>,
}

/// The complete stylesheet of a block, already in output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleSheet {
    /// Root and region rules
    pub base: Vec<Rule>,
    /// Slot rules in slot-list order
    pub slots: Vec<Rule>,
    /// Enabled breakpoints only, ascending
    pub media: Vec<MediaBlock>,
}

impl StyleSheet {
    /// Serialize as CSS text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();

        for rule in self.base.iter().chain(&self.slots) {
            if !out.is_empty() {
                out.push('\n');
            }
            rule.write_css(&mut out, "");
        }

        for block in &self.media {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("@media {} {{\n", block.breakpoint.media_query()));
            for (i, rule) in block.rules.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                rule.write_css(&mut out, "  ");
            }
            out.push_str("}\n");
        }

        out
    }

    /// Declarations that apply to an element carrying `classes`, as cascaded.
    ///
    /// `viewport` adds that breakpoint's rules if the stylesheet contains them.
    pub fn computed(&self, classes: &[String], viewport: Option<Breakpoint>) -> Vec<Declaration> {
        let media = self
            .media
            .iter()
            .filter(|m| Some(m.breakpoint) == viewport)
            .flat_map(|m| m.rules.iter());

        let mut computed: Vec<Declaration> = Vec::new();
        for rule in self.base.iter().chain(&self.slots).chain(media) {
            if !classes.iter().any(|c| *c == rule.class) {
                continue;
            }
            for d in &rule.declarations {
                match computed.iter_mut().find(|c| c.property == d.property) {
                    Some(existing) => existing.value = d.value.clone(),
                    None => computed.push(d.clone()),
                }
            }
        }
        computed
    }
}

/// Format a number with at most three decimals and no trailing zeros.
pub fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

/// Format a pixel length.
pub fn px(value: f64) -> String {
    format!("{}px", num(value))
}

const MOBILE_SCALE: f64 = 0.8;
const TABLET_SCALE: f64 = 0.9;

/// Build the stylesheet for a resolved block.
///
/// `config` must already be clamped.
pub fn build(def: &TemplateDefinition, config: &BlockConfigData, scope: &Scope) -> StyleSheet {
    let mut sheet = StyleSheet {
        base: base_rules(def, config, scope),
        ..Default::default()
    };

    for slot in def.slots() {
        sheet.slots.extend(slot_rules(def, &slot.kind, slot.name, config, scope));
    }

    for breakpoint in Breakpoint::ASCENDING {
        if !breakpoint.enabled(&config.responsive) {
            continue;
        }
        let rules = breakpoint_rules(def, breakpoint, config, scope);
        if !rules.is_empty() {
            sheet.media.push(MediaBlock { breakpoint, rules });
        }
    }

    sheet
}

fn base_rules(def: &TemplateDefinition, config: &BlockConfigData, scope: &Scope) -> Vec<Rule> {
    let colors = &config.colors;
    let spacing = &config.spacing;
    let effects = &config.effects;

    let (align_items, text_align) = match def.align {
        Align::Center => ("center", "center"),
        Align::Start => ("stretch", "left"),
    };

    let font = css_value(&config.typography.font_family, "sans-serif");
    let font = if font.contains(',') {
        font
    } else {
        format!("{font}, sans-serif")
    };

    let mut root = vec![
        Declaration::new("box-sizing", "border-box"),
        Declaration::new("display", "flex"),
        Declaration::new("flex-direction", "column"),
        Declaration::new("align-items", align_items),
        Declaration::new("gap", px(spacing.gap)),
        Declaration::new("padding", px(spacing.padding)),
        Declaration::new("margin", px(spacing.margin)),
        Declaration::new("background-color", css_value(&colors.background, "transparent")),
    ];

    // A gradient replaces the whole background; the color above stays as the
    // fallback when the gradient value is rejected
    if let Some(gradient) = colors.background_gradient.as_deref() {
        let gradient = css_value(gradient, "");
        if !gradient.is_empty() {
            root.push(Declaration::new("background", gradient));
        }
    }

    root.extend([
        Declaration::new("color", css_value(&colors.text_primary, "inherit")),
        Declaration::new("font-family", font),
        Declaration::new("line-height", num(config.typography.line_height)),
        Declaration::new("text-align", text_align),
        Declaration::new(
            "border",
            format!(
                "{} solid {}",
                px(effects.border_width),
                css_value(&colors.border_color, "transparent")
            ),
        ),
        Declaration::new("border-radius", px(spacing.border_radius)),
        Declaration::new("box-shadow", css_value(&effects.shadow, "none")),
        Declaration::new("opacity", num(effects.opacity)),
    ]);

    let mut rules = vec![Rule::new(scope.root().to_string(), root)];

    for region in &def.regions {
        rules.push(Rule::new(
            scope.element(region.name),
            vec![
                Declaration::new("display", "flex"),
                Declaration::new("flex-direction", "column"),
                Declaration::new("align-items", align_items),
                Declaration::new("gap", px(spacing.gap / 2.0)),
                Declaration::new("margin", "0"),
            ],
        ));
    }

    rules
}

fn text_declarations(role: TextRole, config: &BlockConfigData) -> Vec<Declaration> {
    let t = &config.typography;
    let c = &config.colors;
    let primary = css_value(&c.text_primary, "inherit");
    let secondary = css_value(&c.text_secondary, "inherit");
    let accent = css_value(&c.accent_color, "inherit");

    let mut d = vec![Declaration::new("margin", "0")];
    match role {
        TextRole::Title => d.extend([
            Declaration::new("font-size", px(t.title_size)),
            Declaration::new("font-weight", "700"),
            Declaration::new("line-height", "1.2"),
            Declaration::new("color", primary),
        ]),
        TextRole::Display => d.extend([
            Declaration::new("font-size", px(t.title_size * 1.5)),
            Declaration::new("font-weight", "800"),
            Declaration::new("line-height", "1.1"),
            Declaration::new("color", primary),
        ]),
        TextRole::Price => d.extend([
            Declaration::new("font-size", px(t.title_size * 1.25)),
            Declaration::new("font-weight", "800"),
            Declaration::new("line-height", "1.1"),
            Declaration::new("color", accent),
        ]),
        TextRole::Eyebrow => d.extend([
            Declaration::new("font-size", px(t.body_size * 0.875)),
            Declaration::new("font-weight", "600"),
            Declaration::new("letter-spacing", "0.08em"),
            Declaration::new("text-transform", "uppercase"),
            Declaration::new("color", accent),
        ]),
        TextRole::Caption => d.extend([
            Declaration::new("font-size", px(t.subtitle_size)),
            Declaration::new("font-weight", "500"),
            Declaration::new("color", accent),
        ]),
        TextRole::Body => d.extend([
            Declaration::new("font-size", px(t.body_size)),
            Declaration::new("color", secondary),
        ]),
        TextRole::Lead => d.extend([
            Declaration::new("font-size", px(t.subtitle_size)),
            Declaration::new("color", secondary),
        ]),
        TextRole::Quote => d.extend([
            Declaration::new("font-size", px(t.body_size * 1.125)),
            Declaration::new("font-style", "italic"),
            Declaration::new("color", primary),
        ]),
        TextRole::Name => d.extend([
            Declaration::new("font-size", px(t.subtitle_size)),
            Declaration::new("font-style", "normal"),
            Declaration::new("font-weight", "600"),
            Declaration::new("color", primary),
        ]),
    }
    d
}

fn slot_rules(
    def: &TemplateDefinition,
    kind: &SlotKind,
    name: &str,
    config: &BlockConfigData,
    scope: &Scope,
) -> Vec<Rule> {
    let t = &config.typography;
    let c = &config.colors;
    let s = &config.spacing;
    let self_align = match def.align {
        Align::Center => "center",
        Align::Start => "flex-start",
    };
    let accent = css_value(&c.accent_color, "inherit");
    let secondary = css_value(&c.text_secondary, "inherit");
    let border = format!(
        "{} solid {}",
        px(config.effects.border_width),
        css_value(&c.border_color, "transparent")
    );

    match kind {
        SlotKind::Text { role, .. } => {
            vec![Rule::new(scope.element(name), text_declarations(*role, config))]
        }

        SlotKind::Avatar { .. } => vec![Rule::new(
            scope.element(name),
            vec![
                Declaration::new("display", "flex"),
                Declaration::new("align-items", "center"),
                Declaration::new("justify-content", "center"),
                Declaration::new("align-self", self_align),
                Declaration::new("flex-shrink", "0"),
                Declaration::new("width", px(t.title_size * 2.0)),
                Declaration::new("height", px(t.title_size * 2.0)),
                Declaration::new("border-radius", "50%"),
                Declaration::new("background-color", accent),
                Declaration::new("color", css_value(&config.content.button.color, "inherit")),
                Declaration::new("font-size", px(t.title_size * 0.75)),
                Declaration::new("font-weight", "700"),
            ],
        )],

        SlotKind::Items { layout } => {
            let mut list = vec![
                Declaration::new("list-style", "none"),
                Declaration::new("margin", "0"),
                Declaration::new("padding", "0"),
            ];
            let mut item = vec![
                Declaration::new("display", "flex"),
                Declaration::new("align-items", "center"),
                Declaration::new("gap", px(s.gap / 2.0)),
                Declaration::new("font-size", px(t.body_size)),
                Declaration::new("color", secondary),
            ];

            match layout {
                ItemLayout::List => list.extend([
                    Declaration::new("display", "flex"),
                    Declaration::new("flex-direction", "column"),
                    Declaration::new("gap", px(s.gap / 2.0)),
                ]),
                ItemLayout::Grid { columns } => {
                    list.extend([
                        Declaration::new("display", "grid"),
                        Declaration::new("grid-template-columns", grid_columns(*columns)),
                        Declaration::new("gap", px(s.gap)),
                    ]);
                    item.extend([
                        Declaration::new("padding", px(s.gap)),
                        Declaration::new("border", border),
                        Declaration::new("border-radius", px(s.border_radius)),
                    ]);
                }
                ItemLayout::Inline => {
                    list.extend([
                        Declaration::new("display", "flex"),
                        Declaration::new("flex-wrap", "wrap"),
                        Declaration::new("justify-content", self_align),
                        Declaration::new("gap", px(s.gap / 2.0)),
                    ]);
                    item.extend([
                        Declaration::new("padding", format!("{} {}", px(s.gap / 3.0), px(s.gap))),
                        Declaration::new("border", border),
                        Declaration::new("border-radius", "999px"),
                    ]);
                }
            }

            vec![
                Rule::new(scope.element(name), list),
                Rule::new(scope.element(&format!("{name}-item")), item),
                icon_rule(scope.element(&format!("{name}-icon")), accent),
            ]
        }

        SlotKind::Flow => vec![
            Rule::new(
                scope.element(name),
                vec![
                    Declaration::new("display", "flex"),
                    Declaration::new("align-items", "center"),
                    Declaration::new("gap", px(s.gap / 2.0)),
                    Declaration::new("margin", "0"),
                    Declaration::new("font-size", px(t.body_size)),
                    Declaration::new("color", secondary),
                ],
            ),
            icon_rule(scope.element(&format!("{name}-icon")), accent),
        ],

        SlotKind::Button => {
            let b = &config.content.button;
            vec![Rule::new(
                scope.element(name),
                vec![
                    Declaration::new("display", "inline-block"),
                    Declaration::new("align-self", self_align),
                    Declaration::new(
                        "padding",
                        format!("{} {}", px(b.padding), px(b.padding * 2.0)),
                    ),
                    Declaration::new("color", css_value(&b.color, "inherit")),
                    Declaration::new(
                        "background-color",
                        css_value(&b.background_color, "transparent"),
                    ),
                    Declaration::new(
                        "border",
                        format!(
                            "{} solid {}",
                            px(config.effects.border_width),
                            css_value(&b.border_color, "transparent")
                        ),
                    ),
                    Declaration::new("border-radius", px(b.border_radius)),
                    Declaration::new("font-size", px(t.body_size)),
                    Declaration::new("font-weight", "600"),
                    Declaration::new("line-height", "1.2"),
                    Declaration::new("text-align", "center"),
                    Declaration::new("text-decoration", "none"),
                    Declaration::new("cursor", "pointer"),
                ],
            )]
        }
    }
}

fn icon_rule(class: String, accent: String) -> Rule {
    Rule::new(
        class,
        vec![
            Declaration::new("flex-shrink", "0"),
            Declaration::new("font-weight", "700"),
            Declaration::new("color", accent),
        ],
    )
}

fn grid_columns(columns: u8) -> String {
    format!("repeat({}, minmax(0, 1fr))", columns.max(1))
}

fn breakpoint_rules(
    def: &TemplateDefinition,
    breakpoint: Breakpoint,
    config: &BlockConfigData,
    scope: &Scope,
) -> Vec<Rule> {
    let t = &config.typography;
    let s = &config.spacing;
    let mut rules = Vec::new();

    let scale = match breakpoint {
        Breakpoint::Mobile => Some(MOBILE_SCALE),
        Breakpoint::Tablet => Some(TABLET_SCALE),
        Breakpoint::Desktop => None,
    };

    match breakpoint {
        Breakpoint::Mobile => rules.push(Rule::new(
            scope.root().to_string(),
            vec![
                Declaration::new("padding", px(s.padding * 0.75)),
                Declaration::new("gap", px(s.gap * 0.75)),
            ],
        )),
        Breakpoint::Tablet => rules.push(Rule::new(
            scope.root().to_string(),
            vec![Declaration::new("padding", px(s.padding * 0.875))],
        )),
        Breakpoint::Desktop => {
            let mut root = Vec::new();
            if let Some(width) = def.max_width {
                root.push(Declaration::new("max-width", px(width)));
            }
            if def.layout == RootLayout::Split {
                root.extend([
                    Declaration::new("flex-direction", "row"),
                    Declaration::new("align-items", "center"),
                    Declaration::new("justify-content", "space-between"),
                ]);
            }
            if !root.is_empty() {
                rules.push(Rule::new(scope.root().to_string(), root));
            }
        }
    }

    for slot in def.slots() {
        match &slot.kind {
            SlotKind::Text { role, .. } if role.is_headline() => {
                if let Some(scale) = scale {
                    let base = match role {
                        TextRole::Display => t.title_size * 1.5,
                        TextRole::Price => t.title_size * 1.25,
                        _ => t.title_size,
                    };
                    rules.push(Rule::new(
                        scope.element(slot.name),
                        vec![Declaration::new("font-size", px(base * scale))],
                    ));
                }
            }
            SlotKind::Items {
                layout: ItemLayout::Grid { columns },
            } => {
                let columns = match breakpoint {
                    Breakpoint::Mobile => Some(1),
                    Breakpoint::Tablet => Some((*columns).min(2)),
                    Breakpoint::Desktop => None,
                };
                if let Some(columns) = columns {
                    rules.push(Rule::new(
                        scope.element(slot.name),
                        vec![Declaration::new("grid-template-columns", grid_columns(columns))],
                    ));
                }
            }
            SlotKind::Button if breakpoint == Breakpoint::Mobile => {
                rules.push(Rule::new(
                    scope.element(slot.name),
                    vec![
                        Declaration::new("display", "block"),
                        Declaration::new("align-self", "stretch"),
                    ],
                ));
            }
            _ => {}
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbers_without_trailing_zeros() {
        assert_eq!(num(24.0), "24");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.0), "0");
        assert_eq!(px(18.0), "18px");
        assert_eq!(px(10.6667), "10.667px");
    }

    #[test]
    fn writes_rules_and_media_blocks() {
        let sheet = StyleSheet {
            base: vec![Rule::new("a".into(), vec![Declaration::new("color", "red")])],
            slots: vec![Rule::new("b".into(), vec![Declaration::new("margin", "0")])],
            media: vec![MediaBlock {
                breakpoint: Breakpoint::Mobile,
                rules: vec![Rule::new("a".into(), vec![Declaration::new("color", "blue")])],
            }],
        };

        assert_eq!(
            sheet.to_css(),
            ".a {\n  color: red;\n}\n\n.b {\n  margin: 0;\n}\n\n@media (max-width: 767px) {\n  .a {\n    color: blue;\n  }\n}\n"
        );
    }

    #[test]
    fn computed_styles_cascade_in_rule_order() {
        let sheet = StyleSheet {
            base: vec![Rule::new(
                "a".into(),
                vec![Declaration::new("color", "red"), Declaration::new("margin", "0")],
            )],
            slots: vec![],
            media: vec![MediaBlock {
                breakpoint: Breakpoint::Tablet,
                rules: vec![Rule::new("a".into(), vec![Declaration::new("color", "blue")])],
            }],
        };
        let classes = vec!["a".to_string()];

        let desktop = sheet.computed(&classes, Some(Breakpoint::Desktop));
        assert_eq!(desktop[0].value, "red");

        let tablet = sheet.computed(&classes, Some(Breakpoint::Tablet));
        assert_eq!(tablet[0].value, "blue");
        assert_eq!(tablet.len(), 2);
    }
}
